//! In-memory test doubles for the transport and metrics ports.
//!
//! Enabled for unit tests and, for downstream crates, through the
//! `test-utils` feature.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use glide_domain::{MetricEvent, TransportError};
use parking_lot::Mutex;

use crate::metrics_ports::MetricsSink;
use crate::transport_ports::{HttpMethod, HttpRequest, HttpResponse, Transport};

type Reply = Result<HttpResponse, TransportError>;

struct Route {
    method: HttpMethod,
    path: String,
    replies: VecDeque<Reply>,
}

/// Scripted transport matching requests by method and URL path suffix.
///
/// Replies registered for the same route are served in order; the last
/// one repeats. Unmatched requests fail with `TransportError::Network`.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Queue a reply for `method` + `path`.
    pub fn on(&self, method: HttpMethod, path: &str, reply: Reply) -> &Self {
        let mut routes = self.routes.lock();
        if let Some(route) = routes.iter_mut().find(|r| r.method == method && r.path == path) {
            route.replies.push_back(reply);
        } else {
            routes.push(Route { method, path: path.to_string(), replies: VecDeque::from([reply]) });
        }
        self
    }

    /// Queue a JSON reply; statuses `>= 400` become `TransportError::Status`.
    pub fn on_json(&self, method: HttpMethod, path: &str, status: u16, body: serde_json::Value) -> &Self {
        let body = body.to_string();
        let reply = if status >= 400 {
            Err(TransportError::Status { status, body })
        } else {
            Ok(HttpResponse { status, body })
        };
        self.on(method, path, reply)
    }

    pub fn on_post(&self, path: &str, status: u16, body: serde_json::Value) -> &Self {
        self.on_json(HttpMethod::Post, path, status, body)
    }

    pub fn fail(&self, method: HttpMethod, path: &str, error: TransportError) -> &Self {
        self.on(method, path, Err(error))
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests.lock().iter().filter(|r| url_path(&r.url).ends_with(path)).cloned().collect()
    }

    #[must_use]
    pub fn count(&self, path: &str) -> usize {
        self.requests_to(path).len()
    }
}

fn url_path(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request.clone());

        let mut routes = self.routes.lock();
        let path = url_path(&request.url);
        let route = routes
            .iter_mut()
            .find(|r| r.method == request.method && path.ends_with(&r.path))
            .ok_or_else(|| {
                TransportError::Network(format!("no mock route for {} {}", request.method.as_str(), request.url))
            })?;

        if route.replies.len() > 1 {
            route.replies.pop_front().unwrap_or_else(|| Err(TransportError::Network("empty route".into())))
        } else {
            route.replies.front().cloned().unwrap_or_else(|| Err(TransportError::Network("empty route".into())))
        }
    }
}

/// Metrics sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingMetricsSink {
    events: Mutex<Vec<MetricEvent>>,
}

impl RecordingMetricsSink {
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn events(&self) -> Vec<MetricEvent> {
        self.events.lock().clone()
    }

    /// Metric names in delivery order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.metric_name.clone()).collect()
    }
}

#[async_trait]
impl MetricsSink for RecordingMetricsSink {
    async fn report(&self, event: MetricEvent) {
        self.events.lock().push(event);
    }
}
