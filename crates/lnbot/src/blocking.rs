//! Blocking client.
//!
//! Same resources and semantics as the async [`crate::LnBot`], backed by
//! `reqwest::blocking`. Do not use it from inside an async runtime.
//!
//! ```no_run
//! use lnbot::blocking::LnBot;
//!
//! # fn example() -> lnbot::Result<()> {
//! let client = LnBot::new("key_...")?;
//! for event in client.invoices().watch(42, None)? {
//!     let event = event?;
//!     println!("{}: {:?}", event.event, event.data.status);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::client::ClientBuilder;
use crate::config::{ClientConfig, KeySource, ACCEPT_EVENT_STREAM, ACCEPT_JSON};
use crate::error::{classify_status, Error, Result};
use crate::request::{read_response, ApiRequest, Call, StreamCall};
use crate::sse::SseParser;

pub use crate::api::addresses::blocking::AddressesApi;
pub use crate::api::backup::blocking::BackupApi;
pub use crate::api::events::blocking::EventsApi;
pub use crate::api::invoices::blocking::InvoicesApi;
pub use crate::api::keys::blocking::KeysApi;
pub use crate::api::l402::blocking::L402Api;
pub use crate::api::payments::blocking::PaymentsApi;
pub use crate::api::restore::blocking::RestoreApi;
pub use crate::api::transactions::blocking::TransactionsApi;
pub use crate::api::wallets::blocking::WalletsApi;
pub use crate::api::webhooks::blocking::WebhooksApi;

const READ_CHUNK: usize = 8 * 1024;

/// Blocking LnBot API client.
#[derive(Clone)]
pub struct LnBot {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl fmt::Debug for LnBot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("blocking::LnBot")
            .field("base_url", &self.inner.config.base_url)
            .field("api_key", &self.inner.config.api_key)
            .finish()
    }
}

impl LnBot {
    /// Create a new client builder. Finish with
    /// [`ClientBuilder::build_blocking`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the production API with the given key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build_blocking()
    }

    /// Create a client with the key taken from `LNBOT_API_KEY`, if set.
    pub fn from_env() -> Result<Self> {
        Self::builder().build_blocking()
    }

    /// The client-wide timeout applies to every read from a response, so it
    /// acts as the idle limit on event streams. Calls override it with their
    /// own total deadline.
    pub(crate) fn from_config(config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.stream_timeout)
            .build()?;
        Ok(Self {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    /// Get the base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// Where the API key came from, if one is configured.
    pub fn api_key_source(&self) -> Option<&KeySource> {
        self.inner.config.api_key.as_ref().map(|key| &key.source)
    }

    /// Access the wallets API.
    pub fn wallets(&self) -> WalletsApi {
        WalletsApi::new(self.clone())
    }

    /// Access the keys API.
    pub fn keys(&self) -> KeysApi {
        KeysApi::new(self.clone())
    }

    /// Access the invoices API.
    pub fn invoices(&self) -> InvoicesApi {
        InvoicesApi::new(self.clone())
    }

    /// Access the payments API.
    pub fn payments(&self) -> PaymentsApi {
        PaymentsApi::new(self.clone())
    }

    /// Access the addresses API.
    pub fn addresses(&self) -> AddressesApi {
        AddressesApi::new(self.clone())
    }

    /// Access the transactions API.
    pub fn transactions(&self) -> TransactionsApi {
        TransactionsApi::new(self.clone())
    }

    /// Access the webhooks API.
    pub fn webhooks(&self) -> WebhooksApi {
        WebhooksApi::new(self.clone())
    }

    /// Access the wallet event stream.
    pub fn events(&self) -> EventsApi {
        EventsApi::new(self.clone())
    }

    /// Access the backup API.
    pub fn backup(&self) -> BackupApi {
        BackupApi::new(self.clone())
    }

    /// Access the restore API.
    pub fn restore(&self) -> RestoreApi {
        RestoreApi::new(self.clone())
    }

    /// Access the L402 API.
    pub fn l402(&self) -> L402Api {
        L402Api::new(self.clone())
    }

    fn send(
        &self,
        request: &ApiRequest,
        accept: &'static str,
        timeout: Option<Duration>,
    ) -> Result<reqwest::blocking::Response> {
        let config = &self.inner.config;
        tracing::debug!(method = %request.method, path = %request.path, "Sending request");

        let mut builder = self
            .inner
            .http
            .request(request.method.clone(), config.url(&request.path))
            .headers(config.headers(accept));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Ok(builder.send()?)
    }

    pub(crate) fn execute<T>(&self, call: Call<T>) -> Result<T> {
        let response = self.send(&call.request, ACCEPT_JSON, Some(self.inner.config.timeout))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = if status.is_success() {
            response.text()?
        } else {
            response.text().unwrap_or_default()
        };
        tracing::debug!(status = status.as_u16(), path = %call.request.path, "Received response");

        let payload = read_response(&call.request.method, status, content_type.as_deref(), body)?;
        call.decode(payload)
    }

    pub(crate) fn open_stream<T>(&self, call: StreamCall<T>) -> Result<EventIter<T>> {
        let response = self.send(&call.request, ACCEPT_EVENT_STREAM, None)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(classify_status(status, body));
        }

        tracing::debug!(path = %call.request.path, "Event stream opened");
        Ok(EventIter {
            response,
            parser: call.into_parser(),
            buf: vec![0; READ_CHUNK],
            exhausted: false,
            failed: false,
        })
    }
}

/// Blocking iterator over stream events.
///
/// Ends when the server closes the stream. A read failure is yielded once as
/// an error, after which the iterator is finished. Dropping it closes the
/// connection.
pub struct EventIter<T> {
    response: reqwest::blocking::Response,
    parser: SseParser<T>,
    buf: Vec<u8>,
    exhausted: bool,
    failed: bool,
}

impl<T> Iterator for EventIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(event) = self.parser.next_event() {
                return Some(Ok(event));
            }
            if self.exhausted {
                return None;
            }

            match self.response.read(&mut self.buf) {
                Ok(0) => {
                    self.parser.close();
                    self.exhausted = true;
                }
                Ok(n) => self.parser.push(&self.buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(read_error(e)));
                }
            }
        }
    }
}

/// Reads wrap transport failures, timeouts included, in an `io::Error`.
/// Unwrap them so they classify the same way as in async mode.
fn read_error(err: io::Error) -> Error {
    let wraps_transport = err
        .get_ref()
        .is_some_and(|inner| inner.is::<reqwest::Error>());
    if !wraps_transport {
        return err.into();
    }
    match err.into_inner().map(|inner| inner.downcast::<reqwest::Error>()) {
        Some(Ok(inner)) => Error::from(*inner),
        Some(Err(inner)) => Error::Io(io::Error::other(inner)),
        None => Error::Io(io::Error::other("event stream read failed")),
    }
}

impl<T> fmt::Debug for EventIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventIter")
            .field("url", &self.response.url().as_str())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_builder() {
        let client = LnBot::builder()
            .base_url("http://localhost:8080/")
            .api_key("key_test")
            .build_blocking()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.api_key_source(), Some(&KeySource::Explicit));
    }

    #[test]
    fn test_read_error_keeps_plain_io() {
        let err = read_error(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_timeout());

        let err = read_error(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_timeout());
    }
}
