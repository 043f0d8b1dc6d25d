//! Main ConnectClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ConnectError;
use crate::request::ConnectRequest;
use crate::response::{ConnectResponse, ErrorBody};

/// Request timeout applied when the builder sets none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the connect-to-existing-kernel endpoint.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use nbconnect_lib::{ConnectClient, ConnectRequest, Transport};
///
/// let client = ConnectClient::builder()
///     .base_url("http://localhost:8888")
///     .build();
///
/// let request = ConnectRequest::new()
///     .connection_file("kernel-abc.json")
///     .transport(Transport::Tcp);
///
/// let response = client.connect_existing(&request).await?;
/// ```
#[derive(Clone)]
pub struct ConnectClient {
    inner: Arc<ConnectClientInner>,
}

struct ConnectClientInner {
    base_url: String,
    http_client: Client,
    timeout: Duration,
}

impl ConnectClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ConnectClientBuilder<Missing> {
        ConnectClientBuilder::new()
    }

    /// Builds the request target for a connect attempt.
    ///
    /// Joins the base URL with the fixed `existing` segment and appends the
    /// request's non-empty fields as query parameters. A request with no
    /// fields set produces a target with no query string at all.
    pub fn connect_url(&self, request: &ConnectRequest) -> Result<Url, ConnectError> {
        let target = format!("{}/existing", self.inner.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&target).map_err(|e| ConnectError::InvalidUrl(e.to_string()))?;

        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Attaches a notebook to an already-running kernel.
    ///
    /// Issues `POST <base>/existing` with no body and the request's fields
    /// as query parameters. Any failure (network error, timeout, non-2xx
    /// status, malformed body) collapses into a single `ConnectError`.
    pub async fn connect_existing(
        &self,
        request: &ConnectRequest,
    ) -> Result<ConnectResponse, ConnectError> {
        let url = self.connect_url(request)?;

        let response = self
            .inner
            .http_client
            .post(url)
            .timeout(self.inner.timeout)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await.map_err(ConnectError::Network)?;
            serde_json::from_str(&body)
                .map_err(|e| ConnectError::parse(e.to_string(), Some(body)))
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .unwrap_or_default()
                .message;
            Err(ConnectError::http(status.as_u16(), message))
        }
    }

    /// Returns the base URL the client was built with.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    fn map_send_error(&self, err: reqwest::Error) -> ConnectError {
        if err.is_timeout() {
            ConnectError::Timeout(self.inner.timeout)
        } else {
            ConnectError::Network(err)
        }
    }
}

impl std::fmt::Debug for ConnectClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ConnectClient`].
///
/// Uses the typestate pattern so the required base URL must be set before
/// `build` is available.
///
/// # Example
///
/// ```ignore
/// let client = ConnectClient::builder()
///     .base_url("http://localhost:8888")
///     .timeout(Duration::from_secs(10))
///     .build();
/// ```
pub struct ConnectClientBuilder<U> {
    base_url: U,
    timeout: Duration,
    http_client: Option<Client>,
}

impl ConnectClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            timeout: DEFAULT_TIMEOUT,
            http_client: None,
        }
    }

    /// Sets the base URL of the notebook server.
    pub fn base_url(self, url: impl Into<String>) -> ConnectClientBuilder<Set<String>> {
        ConnectClientBuilder {
            base_url: Set(url.into()),
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for ConnectClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ConnectClientBuilder<U> {
    /// Sets the request timeout. A hung request fails with
    /// [`ConnectError::Timeout`](crate::error::ConnectError::Timeout) once
    /// this elapses.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Supplies a preconfigured `reqwest::Client` instead of the default.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ConnectClientBuilder<Set<String>> {
    /// Builds the client.
    pub fn build(self) -> ConnectClient {
        let Set(base_url) = self.base_url;
        ConnectClient {
            inner: Arc::new(ConnectClientInner {
                base_url,
                http_client: self.http_client.unwrap_or_default(),
                timeout: self.timeout,
            }),
        }
    }
}
