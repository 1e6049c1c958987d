//! Mode-neutral request descriptors.
//!
//! Endpoints describe a call once as an [`ApiRequest`] plus a decoder. The
//! async and blocking clients only differ in how they send the request and
//! wait for bytes; status handling and body decoding live here.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{classify_status, Error, Result};
use crate::parse::{parse, parse_list, query_pairs, wire_body};
use crate::sse::{Framing, SseParser};

/// Method, path, query and wire body of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach query parameters. Absent values are left out.
    pub(crate) fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        self.query = query_pairs(query)?;
        Ok(self)
    }

    /// Attach a JSON body, translated to wire casing. Ignored for GET/DELETE.
    pub(crate) fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        if self.method == Method::POST || self.method == Method::PATCH {
            self.body = Some(wire_body(body)?);
        }
        Ok(self)
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }
}

type Decoder<T> = fn(Option<Value>) -> Result<T>;

/// A request/response call: what to send and how to read the answer.
pub struct Call<T> {
    pub(crate) request: ApiRequest,
    decode: Decoder<T>,
}

impl<T> Call<T> {
    pub(crate) fn decode(&self, payload: Option<Value>) -> Result<T> {
        (self.decode)(payload)
    }
}

impl<T: DeserializeOwned> Call<T> {
    /// Expect a single record.
    pub(crate) fn record(request: ApiRequest) -> Self {
        Self {
            request,
            decode: decode_record::<T>,
        }
    }
}

impl<T: DeserializeOwned> Call<Vec<T>> {
    /// Expect an array of records.
    pub(crate) fn list(request: ApiRequest) -> Self {
        Self {
            request,
            decode: decode_list::<T>,
        }
    }
}

impl Call<()> {
    /// Expect nothing worth reading.
    pub(crate) fn empty(request: ApiRequest) -> Self {
        Self {
            request,
            decode: |_| Ok(()),
        }
    }
}

fn decode_record<T: DeserializeOwned>(payload: Option<Value>) -> Result<T> {
    parse(payload.ok_or_else(missing_body)?)
}

fn decode_list<T: DeserializeOwned>(payload: Option<Value>) -> Result<Vec<T>> {
    parse_list(payload.ok_or_else(missing_body)?)
}

fn missing_body() -> Error {
    Error::Json(serde::de::Error::custom("expected a response body, got none"))
}

/// A streaming call: what to send and how to frame the event stream.
pub struct StreamCall<T> {
    pub(crate) request: ApiRequest,
    framing: Box<dyn Framing<Event = T> + Send>,
}

impl<T> StreamCall<T> {
    pub(crate) fn new(request: ApiRequest, framing: impl Framing<Event = T> + Send + 'static) -> Self {
        Self {
            request,
            framing: Box::new(framing),
        }
    }

    pub(crate) fn into_parser(self) -> SseParser<T> {
        SseParser::boxed(self.framing)
    }
}

/// Check the status of a finished response and decode its body.
///
/// Non-success statuses are classified into typed errors. On success, DELETE
/// and 204 answers to POST/PATCH yield nothing, JSON content types are
/// parsed, and anything else comes back as a string.
pub(crate) fn read_response(
    method: &Method,
    status: StatusCode,
    content_type: Option<&str>,
    body: String,
) -> Result<Option<Value>> {
    if !status.is_success() {
        return Err(classify_status(status, body));
    }

    if *method == Method::DELETE {
        return Ok(None);
    }
    if status == StatusCode::NO_CONTENT && *method != Method::GET {
        return Ok(None);
    }

    if content_type.is_some_and(|ct| ct.contains("application/json")) {
        Ok(Some(serde_json::from_str(&body)?))
    } else {
        Ok(Some(Value::String(body)))
    }
}
