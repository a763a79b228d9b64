//! Usage-metric delivery over HTTP.
//!
//! Each event is POSTed as JSON to the configured endpoint. Delivery is
//! best-effort: up to three attempts with 1s then 2s pauses, and anything
//! other than `200 OK` counts as a failed attempt. Final failures are logged
//! and dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use glide_common::resilience::BackoffStrategy;
use glide_core::transport_ports::{HttpRequest, Transport};
use glide_core::MetricsSink;
use glide_domain::{MetricEvent, TransportError};
use tracing::{debug, warn};

const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct HttpMetricsReporter {
    transport: Arc<dyn Transport>,
    url: String,
    max_attempts: u32,
    backoff: BackoffStrategy,
}

impl HttpMetricsReporter {
    /// Reporter posting to `url`; an empty URL disables delivery.
    pub fn new(transport: Arc<dyn Transport>, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: BackoffStrategy::doubling(Duration::from_secs(1), Duration::from_secs(2)),
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Deliver `event`, retrying per the configured policy.
    ///
    /// # Errors
    /// The last attempt's failure once every attempt has failed.
    pub async fn deliver(&self, event: &MetricEvent) -> Result<(), TransportError> {
        let request = HttpRequest::post(self.url.as_str()).json(event)?;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let outcome = match self.transport.execute(request.clone()).await {
                Ok(response) if response.status == 200 => return Ok(()),
                Ok(response) => TransportError::Status { status: response.status, body: response.body },
                Err(err) => err,
            };

            if attempt >= self.max_attempts {
                return Err(outcome);
            }

            let delay = self.backoff.calculate_delay(attempt - 1);
            debug!(attempt, ?delay, error = %outcome, metric = %event.metric_name, "metric delivery failed; retrying");
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl MetricsSink for HttpMetricsReporter {
    async fn report(&self, event: MetricEvent) {
        if !self.is_enabled() {
            return;
        }

        match self.deliver(&event).await {
            Ok(()) => debug!(metric = %event.metric_name, api = %event.api, "metric reported"),
            Err(err) => warn!(
                metric = %event.metric_name,
                attempts = self.max_attempts,
                error = %err,
                "failed to report metric"
            ),
        }
    }

    /// An empty URL disables delivery.
    fn is_enabled(&self) -> bool {
        !self.url.is_empty()
    }
}

impl std::fmt::Debug for HttpMetricsReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMetricsReporter")
            .field("url", &self.url)
            .field("max_attempts", &self.max_attempts)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}
