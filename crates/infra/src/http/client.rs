use std::time::Duration;

use async_trait::async_trait;
use glide_core::transport_ports::{HttpMethod, HttpRequest, HttpResponse, Transport};
use glide_domain::TransportError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use tracing::debug;

use crate::errors::InfraError;

/// reqwest-backed [`Transport`] with timeout and optional retry support.
///
/// Retries cover connection failures, timeouts and 5xx responses. Token
/// exchanges are not idempotent (authorization codes are single use), so the
/// default is a single attempt.
#[derive(Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpTransport {
    /// Start building a new HTTP transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `TransportError::InvalidRequest` if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    fn prepare(&self, request: &HttpRequest) -> RequestBuilder {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        builder
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let attempts = self.max_attempts.max(1);
        let method = request.method.as_str();

        for attempt in 0..attempts {
            debug!(attempt = attempt + 1, method, url = %request.url, "sending HTTP request");

            match self.prepare(&request).send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, method, url = %request.url, %status, "received HTTP response");

                    if status.is_server_error() && attempt + 1 < attempts {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    let body = response.text().await.map_err(|err| TransportError::from(InfraError::from(err)))?;
                    let status = status.as_u16();
                    if status >= 400 {
                        return Err(TransportError::Status { status, body });
                    }
                    return Ok(HttpResponse { status, body });
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, method, url = %request.url, error = %err, "HTTP request failed");

                    if attempt + 1 < attempts && should_retry_error(&err) {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(InfraError::from(err).into());
                }
            }
        }

        Err(TransportError::Network("http transport exhausted retries without producing a result".into()))
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("max_attempts", &self.max_attempts)
            .field("base_backoff", &self.base_backoff)
            .finish_non_exhaustive()
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 1,
            base_backoff: Duration::from_millis(200),
            user_agent: Some(concat!("glide-sdk-rust/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl HttpTransportBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    /// Returns `TransportError::InvalidRequest` if the reqwest client cannot
    /// be built.
    pub fn build(self) -> Result<HttpTransport, TransportError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|err| TransportError::InvalidRequest(format!("failed to build HTTP client: {err}")))?;

        Ok(HttpTransport { client, max_attempts: self.max_attempts.max(1), base_backoff: self.base_backoff })
    }
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_request() || err.is_connect()
}
