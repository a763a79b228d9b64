//! Metrics reporting port
//!
//! Usage metrics are best-effort: a sink never returns an error, and each
//! operation joins its pending deliveries before returning so no report
//! outlives the call that produced it.

use std::sync::Arc;

use async_trait::async_trait;
use glide_domain::MetricEvent;
use tokio::task::JoinSet;
use tracing::warn;

/// Port trait for metric delivery
///
/// Implementations own their retry policy and swallow delivery failures.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn report(&self, event: MetricEvent);

    /// Whether reported events go anywhere.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetricsSink;

#[async_trait]
impl MetricsSink for NoopMetricsSink {
    async fn report(&self, _event: MetricEvent) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Group of in-flight metric deliveries belonging to one operation.
///
/// Deliveries run concurrently; [`MetricsTasks::join`] is the barrier at
/// the end of the operation.
pub struct MetricsTasks {
    sink: Arc<dyn MetricsSink>,
    tasks: JoinSet<()>,
}

impl MetricsTasks {
    pub fn new(sink: Arc<dyn MetricsSink>) -> Self {
        Self { sink, tasks: JoinSet::new() }
    }

    /// Start delivering `event` in the background.
    pub fn submit(&mut self, event: MetricEvent) {
        let sink = Arc::clone(&self.sink);
        self.tasks.spawn(async move { sink.report(event).await });
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every submitted delivery to finish.
    pub async fn join(mut self) {
        while let Some(result) = self.tasks.join_next().await {
            if let Err(err) = result {
                warn!(error = %err, "metric delivery task failed");
            }
        }
    }
}
