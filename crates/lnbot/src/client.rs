//! Async client implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::api::{
    AddressesApi, BackupApi, EventsApi, InvoicesApi, KeysApi, L402Api, PaymentsApi, RestoreApi,
    TransactionsApi, WalletsApi, WebhooksApi,
};
use crate::config::{
    resolve_api_key, ClientConfig, KeySource, ACCEPT_EVENT_STREAM, ACCEPT_JSON, DEFAULT_BASE_URL,
    DEFAULT_STREAM_TIMEOUT, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
use crate::error::{classify_status, Error, Result};
use crate::request::{read_response, ApiRequest, Call, StreamCall};
use crate::sse::{event_stream, EventStream};

/// LnBot API client.
///
/// Cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```no_run
/// use lnbot::{CreateInvoiceRequest, LnBot};
///
/// # async fn example() -> lnbot::Result<()> {
/// let client = LnBot::new("key_...")?;
///
/// let wallet = client.wallets().current().await?;
/// println!("{} sats available", wallet.available);
///
/// let invoice = client
///     .invoices()
///     .create(CreateInvoiceRequest::new(1000).with_memo("coffee"))
///     .await?;
/// println!("{}", invoice.bolt11);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LnBot {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
}

impl fmt::Debug for LnBot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LnBot")
            .field("base_url", &self.inner.config.base_url)
            .field("api_key", &self.inner.config.api_key)
            .finish()
    }
}

impl LnBot {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the production API with the given key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a client with the key taken from `LNBOT_API_KEY`, if set.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    /// Get the base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// Where the API key came from, if one is configured.
    pub fn api_key_source(&self) -> Option<&KeySource> {
        self.inner.config.api_key.as_ref().map(|key| &key.source)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

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

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    async fn send(
        &self,
        request: &ApiRequest,
        accept: &'static str,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response> {
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

        Ok(builder.send().await?)
    }

    /// Send a request/response call and decode the answer.
    pub(crate) async fn execute<T>(&self, call: Call<T>) -> Result<T> {
        let response = self
            .send(&call.request, ACCEPT_JSON, Some(self.inner.config.timeout))
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = if status.is_success() {
            response.text().await?
        } else {
            response.text().await.unwrap_or_default()
        };
        tracing::debug!(status = status.as_u16(), path = %call.request.path, "Received response");

        let payload = read_response(&call.request.method, status, content_type.as_deref(), body)?;
        call.decode(payload)
    }

    /// Open an event stream. Error statuses fail here, before any event.
    ///
    /// The stream timeout bounds each wait for the server, not the stream's
    /// lifetime.
    pub(crate) async fn open_stream<T: Send + 'static>(
        &self,
        call: StreamCall<T>,
    ) -> Result<EventStream<T>> {
        let idle = self.inner.config.stream_timeout;
        let pending = self.send(&call.request, ACCEPT_EVENT_STREAM, None);
        let response = tokio::time::timeout(idle, pending)
            .await
            .map_err(|_| Error::StreamIdle(idle))??;

        let status = response.status();
        if !status.is_success() {
            let body = tokio::time::timeout(idle, response.text())
                .await
                .ok()
                .and_then(|text| text.ok())
                .unwrap_or_default();
            return Err(classify_status(status, body));
        }

        tracing::debug!(path = %call.request.path, "Event stream opened");
        Ok(event_stream(response.bytes_stream(), call.into_parser(), idle))
    }
}

/// Builder for [`LnBot`] and, with the `blocking` feature, its blocking twin.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    stream_timeout: Duration,
    user_agent: Option<String>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            stream_timeout: DEFAULT_STREAM_TIMEOUT,
            user_agent: None,
            http: None,
        }
    }

    /// Set the API base URL. Defaults to `https://api.ln.bot`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key. Falls back to `LNBOT_API_KEY` when unset.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how long an event stream may stay silent before it fails.
    /// Streams that keep delivering events or keep-alives never time out.
    pub fn stream_timeout(mut self, timeout: Duration) -> Self {
        self.stream_timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use a preconfigured HTTP client for the async client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    pub(crate) fn config(&self) -> Result<ClientConfig> {
        ClientConfig::new(
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            resolve_api_key(self.api_key.as_deref()),
            self.timeout,
            self.stream_timeout,
            self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        )
    }

    /// Build the async client.
    pub fn build(self) -> Result<LnBot> {
        let config = self.config()?;
        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder().build()?,
        };

        tracing::debug!(
            base_url = %config.base_url,
            key_source = ?config.api_key.as_ref().map(|k| &k.source),
            "LnBot client created"
        );

        Ok(LnBot {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    /// Build the blocking client.
    #[cfg(feature = "blocking")]
    pub fn build_blocking(self) -> Result<crate::blocking::LnBot> {
        crate::blocking::LnBot::from_config(self.config()?)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
