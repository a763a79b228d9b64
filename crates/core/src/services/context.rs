//! Collaborators shared by every service client.

use std::sync::Arc;

use glide_common::auth::bearer_auth_header;
use glide_common::time::{Clock, SystemClock};
use glide_domain::{ApiConfig, GlideError, MetricEvent, Result, Settings};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::metrics_ports::{MetricsSink, MetricsTasks};
use crate::session::OAuthContext;
use crate::transport_ports::{HttpRequest, Transport, AUTHORIZATION};

/// Settings plus ports, cloned into each service client.
#[derive(Clone)]
pub struct ServiceContext {
    settings: Arc<Settings>,
    transport: Arc<dyn Transport>,
    metrics: Arc<dyn MetricsSink>,
    clock: Arc<dyn Clock>,
}

impl ServiceContext {
    pub fn new(settings: Settings, transport: Arc<dyn Transport>, metrics: Arc<dyn MetricsSink>) -> Self {
        Self { settings: Arc::new(settings), transport, metrics, clock: Arc::new(SystemClock) }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// OAuth context for `scope` sharing this context's transport and clock.
    #[must_use]
    pub fn oauth(&self, scope: &'static str) -> OAuthContext {
        OAuthContext::from_settings(Arc::clone(&self.transport), &self.settings, scope)
            .with_clock(Arc::clone(&self.clock))
    }

    /// Metrics recorder for one call; inert unless `conf` carries a session
    /// identifier.
    pub(crate) fn call_metrics(&self, conf: &ApiConfig, api: &'static str) -> CallMetrics {
        CallMetrics {
            session_id: conf.metrics_session_id().map(str::to_string),
            api,
            client_id: self.settings.client_id.clone(),
            tasks: MetricsTasks::new(Arc::clone(&self.metrics)),
        }
    }

    /// `<api_base_url><path>`.
    ///
    /// # Errors
    /// `GlideError::Configuration` when the API base URL is unset.
    pub(crate) fn api_url(&self, path: &str) -> Result<String> {
        Ok(format!("{}{path}", self.settings.require_api_base_url()?))
    }

    /// Authenticated JSON request against the domain API.
    pub(crate) async fn send_json<R: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: HttpRequest,
        access_token: &str,
    ) -> Result<R> {
        debug!(operation, url = %request.url, "calling Glide API");
        let request = request.header(AUTHORIZATION, bearer_auth_header(access_token));
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|source| GlideError::transport(operation, source))?;
        response.json().map_err(|e| GlideError::decode(operation, e))
    }

    /// POST `body` as JSON to `url` with a bearer token.
    pub(crate) async fn post_json<B, R>(
        &self,
        operation: &'static str,
        url: String,
        access_token: &str,
        body: &B,
    ) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let request = HttpRequest::post(url)
            .json(body)
            .map_err(|source| GlideError::transport(operation, source))?;
        self.send_json(operation, request, access_token).await
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("client_id", &self.settings.client_id)
            .field("api_base_url", &self.settings.internal.api_base_url)
            .finish_non_exhaustive()
    }
}

/// Rewrite a 404 from the domain API into [`GlideError::NotFound`].
pub(crate) fn not_found_as(err: GlideError, resource: &'static str, subject: &str) -> GlideError {
    if err.http_status() == Some(404) {
        GlideError::NotFound { resource, subject: subject.to_string() }
    } else {
        err
    }
}

/// Usage metrics emitted during one public operation.
pub(crate) struct CallMetrics {
    session_id: Option<String>,
    api: &'static str,
    client_id: String,
    tasks: MetricsTasks,
}

impl CallMetrics {
    pub(crate) fn enabled(&self) -> bool {
        self.session_id.is_some()
    }

    pub(crate) fn record(&mut self, metric_name: &str) {
        self.record_with_operator(metric_name, "");
    }

    pub(crate) fn record_with_operator(&mut self, metric_name: &str, operator: &str) {
        if let Some(session_id) = &self.session_id {
            let event = MetricEvent::now(session_id.as_str(), metric_name, self.api, self.client_id.as_str())
                .with_operator(operator);
            self.tasks.submit(event);
        }
    }

    /// Barrier: wait for every delivery started by this call.
    pub(crate) async fn finish(self) {
        self.tasks.join().await;
    }
}
