//! Typed response parsing and outbound body/query shaping.
//!
//! Every record's field table is its `Deserialize` derive: non-`Option` fields
//! without `#[serde(default)]` are required, everything else falls back to its
//! default, and wire keys with no matching field are ignored. One generic
//! routine handles every record type.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::naming::{from_wire, to_wire};

/// Parse a wire object into a record.
///
/// Keys are translated to client casing first, so records declare their
/// fields in plain `snake_case`. Anything but a JSON object is rejected.
pub fn parse<T: DeserializeOwned>(wire: Value) -> Result<T> {
    match wire {
        Value::Object(fields) => Ok(serde_json::from_value(Value::Object(from_wire(fields)))?),
        other => Err(unexpected("object", &other)),
    }
}

/// Parse a wire array element by element, keeping the server's order.
pub fn parse_list<T: DeserializeOwned>(wire: Value) -> Result<Vec<T>> {
    match wire {
        Value::Array(items) => items.into_iter().map(parse).collect(),
        other => Err(unexpected("array", &other)),
    }
}

/// Serialize an outbound body and translate it to wire casing.
///
/// Unset optional fields serialize as `null` and are dropped here, so they
/// never reach the server.
pub fn wire_body<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    match serde_json::to_value(body)? {
        Value::Object(fields) => Ok(Value::Object(to_wire(fields))),
        other => Ok(other),
    }
}

/// Flatten a query struct into string pairs, skipping absent values.
pub fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>> {
    let fields = match serde_json::to_value(query)? {
        Value::Object(fields) => fields,
        Value::Null => Map::new(),
        other => return Err(unexpected("object", &other)),
    };

    Ok(to_wire(fields)
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}

fn unexpected(expected: &str, got: &Value) -> Error {
    let kind = match got {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    Error::Json(serde::de::Error::custom(format!(
        "expected {expected}, got {kind}"
    )))
}
