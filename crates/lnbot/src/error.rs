//! Client error types.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type.
///
/// HTTP-level failures carry the status, a human-readable message and the raw
/// response body. Transport failures are passed through from `reqwest`, with
/// timeouts split out so callers can tell them apart from everything else.
#[derive(Debug, Error)]
pub enum Error {
    /// 400 Bad Request.
    #[error("{message}")]
    BadRequest {
        /// Message extracted from the response body.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// 401 Unauthorized.
    #[error("{message}")]
    Unauthorized {
        /// Message extracted from the response body.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// 403 Forbidden.
    #[error("{message}")]
    Forbidden {
        /// Message extracted from the response body.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// 404 Not Found.
    #[error("{message}")]
    NotFound {
        /// Message extracted from the response body.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// 409 Conflict.
    #[error("{message}")]
    Conflict {
        /// Message extracted from the response body.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// The request or stream timed out.
    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),

    /// An event stream sent nothing, headers or data, for longer than the
    /// stream timeout.
    #[error("Stream idle for {0:?}")]
    StreamIdle(Duration),

    /// Network-level failure (connection refused, TLS, broken stream).
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a blocking response body failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err)
        } else {
            Error::Http(err)
        }
    }
}

impl Error {
    /// HTTP status of the failed response, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest { .. } => Some(400),
            Error::Unauthorized { .. } => Some(401),
            Error::Forbidden { .. } => Some(403),
            Error::NotFound { .. } => Some(404),
            Error::Conflict { .. } => Some(409),
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of the failed response, untouched.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::BadRequest { body, .. }
            | Error::Unauthorized { body, .. }
            | Error::Forbidden { body, .. }
            | Error::NotFound { body, .. }
            | Error::Conflict { body, .. }
            | Error::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Message extracted from the failed response.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::BadRequest { message, .. }
            | Error::Unauthorized { message, .. }
            | Error::Forbidden { message, .. }
            | Error::NotFound { message, .. }
            | Error::Conflict { message, .. }
            | Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Unauthorized { .. })
    }

    /// Check if the server reported the resource as already processed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }

    /// Check if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout(_) | Error::StreamIdle(_) => true,
            Error::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Map a non-success status and its raw body to a typed error.
///
/// `reason` is the transport's reason phrase, used as the fallback message for
/// statuses without a dedicated variant.
pub fn classify(status: u16, reason: Option<&str>, body: String) -> Error {
    match status {
        400 => Error::BadRequest {
            message: extract_message(&body, "Bad Request"),
            body,
        },
        401 => Error::Unauthorized {
            message: extract_message(&body, "Unauthorized"),
            body,
        },
        403 => Error::Forbidden {
            message: extract_message(&body, "Forbidden"),
            body,
        },
        404 => Error::NotFound {
            message: extract_message(&body, "Not Found"),
            body,
        },
        409 => Error::Conflict {
            message: extract_message(&body, "Conflict"),
            body,
        },
        _ => Error::Api {
            status,
            message: extract_message(&body, reason.unwrap_or("Error")),
            body,
        },
    }
}

/// Classify using the canonical reason phrase of `status`.
pub(crate) fn classify_status(status: StatusCode, body: String) -> Error {
    classify(status.as_u16(), status.canonical_reason(), body)
}

/// Pull a human-readable message out of a JSON error body.
///
/// `message` wins over `error`. Numbers and `true` are rendered as text;
/// empty strings, zero, `false`, null and nested values are skipped. Anything
/// unparseable falls back silently.
pub fn extract_message(body: &str, fallback: &str) -> String {
    let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) else {
        return fallback.to_string();
    };

    ["message", "error"]
        .iter()
        .filter_map(|key| fields.get(*key))
        .find_map(scalar_text)
        .unwrap_or_else(|| fallback.to_string())
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_named_statuses() {
        let cases = [
            (400, "Bad Request"),
            (401, "Unauthorized"),
            (403, "Forbidden"),
            (404, "Not Found"),
            (409, "Conflict"),
        ];
        for (status, fallback) in cases {
            let err = classify(status, None, "not json".to_string());
            assert_eq!(err.status(), Some(status));
            assert_eq!(err.message(), Some(fallback));
            assert_eq!(err.body(), Some("not json"));
        }
        assert!(matches!(
            classify(400, None, String::new()),
            Error::BadRequest { .. }
        ));
        assert!(matches!(
            classify(401, None, String::new()),
            Error::Unauthorized { .. }
        ));
        assert!(matches!(
            classify(403, None, String::new()),
            Error::Forbidden { .. }
        ));
        assert!(matches!(
            classify(404, None, String::new()),
            Error::NotFound { .. }
        ));
        assert!(matches!(
            classify(409, None, String::new()),
            Error::Conflict { .. }
        ));
    }

    #[test]
    fn test_classify_other_statuses_are_generic() {
        for status in [402, 418, 429, 500, 503] {
            let err = classify(status, Some("Reason"), "{}".to_string());
            assert!(matches!(err, Error::Api { status: s, .. } if s == status));
            assert_eq!(err.message(), Some("Reason"));
        }
    }

    #[test]
    fn test_generic_fallback_without_reason() {
        let err = classify(599, None, String::new());
        assert_eq!(err.message(), Some("Error"));
    }

    #[test]
    fn test_classify_status_uses_canonical_reason() {
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, String::new());
        assert_eq!(err.message(), Some("Internal Server Error"));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_extract_message_field() {
        assert_eq!(
            extract_message(r#"{"message":"invalid amount"}"#, "fallback"),
            "invalid amount"
        );
    }

    #[test]
    fn test_extract_error_field() {
        assert_eq!(extract_message(r#"{"error":"bad input"}"#, "fallback"), "bad input");
    }

    #[test]
    fn test_message_takes_precedence() {
        assert_eq!(extract_message(r#"{"message":"a","error":"b"}"#, "fallback"), "a");
    }

    #[test]
    fn test_extract_non_string_scalars() {
        assert_eq!(extract_message(r#"{"message":42}"#, "fallback"), "42");
        assert_eq!(extract_message(r#"{"message":"","error":1.5}"#, "fallback"), "1.5");
        assert_eq!(extract_message(r#"{"message":0,"error":"bad input"}"#, "fallback"), "bad input");
        assert_eq!(extract_message(r#"{"message":null}"#, "fallback"), "fallback");
        assert_eq!(extract_message(r#"{"message":{"code":1}}"#, "fallback"), "fallback");

        let err = classify(409, None, r#"{"error":7}"#.to_string());
        assert_eq!(err.message(), Some("7"));
    }

    #[test]
    fn test_extract_falls_back() {
        assert_eq!(extract_message("not json", "fallback"), "fallback");
        assert_eq!(extract_message(r#"{"detail":"x"}"#, "fallback"), "fallback");
        assert_eq!(extract_message(r#"["message"]"#, "fallback"), "fallback");
        assert_eq!(extract_message(r#"{"message":""}"#, "fallback"), "fallback");
    }

    #[test]
    fn test_display_is_message() {
        let err = classify(400, None, r#"{"message":"invalid amount"}"#.to_string());
        assert_eq!(err.to_string(), "invalid amount");

        let err = classify(500, Some("Internal Server Error"), "oops".to_string());
        assert_eq!(err.to_string(), "API error (500): Internal Server Error");
    }

    #[test]
    fn test_predicates() {
        assert!(classify(404, None, String::new()).is_not_found());
        assert!(classify(401, None, String::new()).is_auth_error());
        assert!(classify(409, None, String::new()).is_conflict());
        assert!(!classify(400, None, String::new()).is_server_error());
        assert!(!classify(400, None, String::new()).is_timeout());
    }

    #[test]
    fn test_stream_idle_is_timeout() {
        let err = Error::StreamIdle(Duration::from_secs(300));
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_io_timeout() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::TimedOut, "slow"));
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
    }
}
