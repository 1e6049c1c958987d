//! Client configuration and API key resolution.
//!
//! Resolution order for the API key:
//! 1. Explicit value passed to the builder
//! 2. `LNBOT_API_KEY` environment variable
//!
//! With neither, requests go out without an `Authorization` header, which is
//! only useful for the handful of unauthenticated endpoints.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::error::{Error, Result};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "LNBOT_API_KEY";

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.ln.bot";

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("lnbot-rust/", env!("CARGO_PKG_VERSION"));

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for streaming requests.
pub const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_secs(300);

pub(crate) const ACCEPT_JSON: &str = "application/json";
pub(crate) const ACCEPT_EVENT_STREAM: &str = "text/event-stream";

/// An API key together with where it came from.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    /// The key.
    pub value: String,
    /// Where the key was found.
    pub source: KeySource,
}

impl fmt::Debug for ResolvedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedKey")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Where an API key was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Passed to the builder.
    Explicit,
    /// Environment variable.
    EnvVar(String),
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Explicit => write!(f, "explicit"),
            KeySource::EnvVar(var) => write!(f, "env var {}", var),
        }
    }
}

/// Resolve the API key from an explicit value or the environment.
pub fn resolve_api_key(explicit: Option<&str>) -> Option<ResolvedKey> {
    resolve_api_key_with(explicit, |name| std::env::var(name).ok())
}

/// Resolve the API key with a custom environment lookup.
pub(crate) fn resolve_api_key_with(
    explicit: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<ResolvedKey> {
    if let Some(value) = explicit.filter(|v| !v.is_empty()) {
        return Some(ResolvedKey {
            value: value.to_string(),
            source: KeySource::Explicit,
        });
    }

    env(API_KEY_ENV)
        .filter(|v| !v.is_empty())
        .map(|value| ResolvedKey {
            value,
            source: KeySource::EnvVar(API_KEY_ENV.to_string()),
        })
}

/// Normalize a base URL: validate it and strip trailing slashes.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "unsupported base_url scheme: {}",
            parsed.scheme()
        )));
    }
    Ok(trimmed.to_string())
}

/// Immutable settings shared by the async and blocking clients.
#[derive(Debug, Clone)]
pub(crate) struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) api_key: Option<ResolvedKey>,
    pub(crate) timeout: Duration,
    pub(crate) stream_timeout: Duration,
    user_agent: HeaderValue,
    authorization: Option<HeaderValue>,
}

impl ClientConfig {
    pub(crate) fn new(
        base_url: &str,
        api_key: Option<ResolvedKey>,
        timeout: Duration,
        stream_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let user_agent = HeaderValue::from_str(user_agent)
            .map_err(|_| Error::Config("Invalid user agent".to_string()))?;

        let authorization = api_key
            .as_ref()
            .map(|key| {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", key.value))
                    .map_err(|_| Error::Config("Invalid API key".to_string()))?;
                value.set_sensitive(true);
                Ok::<_, Error>(value)
            })
            .transpose()?;

        Ok(Self {
            base_url,
            api_key,
            timeout,
            stream_timeout,
            user_agent,
            authorization,
        })
    }

    /// Build the full URL for an API path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Headers for one request. `accept` differs between JSON calls and streams.
    pub(crate) fn headers(&self, accept: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(accept));
        headers.insert(USER_AGENT, self.user_agent.clone());
        if let Some(auth) = &self.authorization {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }
}
