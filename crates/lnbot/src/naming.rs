//! Field-name translation between client-side `snake_case` and wire `camelCase`.
//!
//! Only top-level keys are translated; nested objects and arrays pass through
//! untouched. Outbound maps drop `null` values, because the API has no notion
//! of an explicit null: an unset optional field is simply not sent.

use serde_json::{Map, Value};

/// Convert a `snake_case` identifier to `camelCase`.
///
/// The first segment is lower-cased; every following segment has its first
/// letter upper-cased and the remainder lower-cased.
pub fn to_camel(name: &str) -> String {
    let mut parts = name.split('_');
    let mut out = String::with_capacity(name.len());

    if let Some(first) = parts.next() {
        out.push_str(&first.to_lowercase());
    }
    for part in parts {
        let mut chars = part.chars();
        if let Some(head) = chars.next() {
            out.extend(head.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

/// Convert a `camelCase` identifier to `snake_case`.
///
/// An underscore is inserted before every upper-case letter whose preceding
/// character is a lower-case letter or a digit. Acronyms get no special
/// treatment: `userID` becomes `user_id`, `HTTPServer` becomes `httpserver`.
pub fn to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('_');
        }
        out.push(c);
        prev = Some(c);
    }
    out.to_lowercase()
}

/// Translate an outbound field map to wire casing, dropping null values.
pub fn to_wire(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (to_camel(&key), value))
        .collect()
}

/// Translate an inbound wire map to client casing. Values, including nulls,
/// are kept as they are.
pub fn from_wire(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (to_snake(&key), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_to_camel() {
        assert_eq!(to_camel("wallet_id"), "walletId");
        assert_eq!(to_camel("name"), "name");
        assert_eq!(to_camel("on_hold"), "onHold");
        assert_eq!(to_camel("recovery_passphrase"), "recoveryPassphrase");
        assert_eq!(to_camel("www_authenticate"), "wwwAuthenticate");
    }

    #[test]
    fn test_to_snake() {
        assert_eq!(to_snake("walletId"), "wallet_id");
        assert_eq!(to_snake("name"), "name");
        assert_eq!(to_snake("onHold"), "on_hold");
        assert_eq!(to_snake("recoveryPassphrase"), "recovery_passphrase");
        assert_eq!(to_snake("bolt11"), "bolt11");
    }

    #[test]
    fn test_to_snake_acronyms_are_not_special() {
        assert_eq!(to_snake("userID"), "user_id");
        assert_eq!(to_snake("HTTPServer"), "httpserver");
        assert_eq!(to_snake("hash2Value"), "hash2_value");
    }

    #[test]
    fn test_round_trip_for_snake_identifiers() {
        for name in [
            "amount",
            "wallet_id",
            "max_fee",
            "idempotency_key",
            "expiry_seconds",
            "target_wallet_key",
            "balance_after",
        ] {
            assert_eq!(to_snake(&to_camel(name)), name);
        }
    }

    #[test]
    fn test_to_wire_drops_nulls() {
        let wire = to_wire(map(json!({
            "amount": 100,
            "memo": null,
            "reference": null,
            "wallet_id": "wal_1",
        })));
        assert_eq!(Value::Object(wire), json!({"amount": 100, "walletId": "wal_1"}));
    }

    #[test]
    fn test_from_wire_keeps_nulls_and_nesting() {
        let fields = from_wire(map(json!({
            "walletId": "wal_1",
            "settledAt": null,
            "options": {"userVerification": "preferred"},
        })));
        assert_eq!(fields["wallet_id"], json!("wal_1"));
        assert!(fields.contains_key("settled_at"));
        assert_eq!(fields["options"], json!({"userVerification": "preferred"}));
    }

    #[test]
    fn test_wire_round_trip_preserves_values() {
        let original = map(json!({"on_hold": 50, "created_at": "2024-01-01T00:00:00Z"}));
        assert_eq!(from_wire(to_wire(original.clone())), original);
    }
}
