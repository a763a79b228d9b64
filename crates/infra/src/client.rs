//! SDK entry point wiring settings, transport and metrics into the service
//! clients.

use std::sync::Arc;

use glide_core::{
    KycMatchClient, MagicAuthClient, MetricsSink, NumberVerifyClient, ServiceContext, SimSwapClient,
    TelcoFinderClient, Transport,
};
use glide_domain::{GlideError, MetricReport, Result, Settings};
use tracing::{debug, info};

use crate::config::load_settings_from_env;
use crate::http::HttpTransport;
use crate::observability::HttpMetricsReporter;

/// Entry point to every Glide API.
///
/// All service clients share one transport and one metrics sink.
pub struct GlideClient {
    settings: Settings,
    metrics: Arc<dyn MetricsSink>,
    number_verify: NumberVerifyClient,
    sim_swap: SimSwapClient,
    magic_auth: MagicAuthClient,
    kyc_match: KycMatchClient,
    telco_finder: TelcoFinderClient,
}

impl GlideClient {
    /// Client over the default reqwest transport and HTTP metrics reporter.
    ///
    /// `settings` are merged over environment defaults; pass
    /// `Settings::default()` to configure from the environment alone.
    ///
    /// # Errors
    /// Returns `GlideError::Configuration` when `client_id` or the auth base
    /// URL is missing after the merge, or when the HTTP client cannot be
    /// built.
    pub fn new(settings: Settings) -> Result<Self> {
        let settings = settings.merged_over(load_settings_from_env()?);
        validate(&settings)?;

        let transport: Arc<dyn Transport> = Arc::new(
            HttpTransport::new().map_err(|e| GlideError::Configuration(format!("HTTP transport: {e}")))?,
        );
        let metrics = Arc::new(HttpMetricsReporter::new(Arc::clone(&transport), settings.metric_report_url.clone()));

        Self::assemble(settings, transport, metrics)
    }

    /// Client over injected collaborators. `settings` are used as given.
    ///
    /// # Errors
    /// Returns `GlideError::Configuration` when `client_id` or the auth base
    /// URL is missing.
    pub fn with_components(
        settings: Settings,
        transport: Arc<dyn Transport>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Result<Self> {
        validate(&settings)?;
        Self::assemble(settings, transport, metrics)
    }

    fn assemble(settings: Settings, transport: Arc<dyn Transport>, metrics: Arc<dyn MetricsSink>) -> Result<Self> {
        let ctx = ServiceContext::new(settings.clone(), transport, Arc::clone(&metrics));

        info!(
            client_id = %settings.client_id,
            auth_base_url = %settings.internal.auth_base_url,
            api_base_url = %settings.internal.api_base_url,
            log_level = %settings.internal.log_level,
            "Glide client initialised"
        );

        Ok(Self {
            number_verify: NumberVerifyClient::new(ctx.clone()),
            sim_swap: SimSwapClient::new(ctx.clone()),
            magic_auth: MagicAuthClient::new(ctx.clone()),
            kyc_match: KycMatchClient::new(ctx.clone()),
            telco_finder: TelcoFinderClient::new(ctx),
            settings,
            metrics,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn number_verify(&self) -> &NumberVerifyClient {
        &self.number_verify
    }

    #[must_use]
    pub fn sim_swap(&self) -> &SimSwapClient {
        &self.sim_swap
    }

    #[must_use]
    pub fn magic_auth(&self) -> &MagicAuthClient {
        &self.magic_auth
    }

    #[must_use]
    pub fn kyc_match(&self) -> &KycMatchClient {
        &self.kyc_match
    }

    #[must_use]
    pub fn telco_finder(&self) -> &TelcoFinderClient {
        &self.telco_finder
    }

    /// Submit a caller-built usage metric.
    ///
    /// The client id defaults to the configured one. Delivery is
    /// best-effort once the report is valid, and a disabled sink (no
    /// `REPORT_METRIC_URL`) drops it.
    ///
    /// # Errors
    /// Returns `GlideError::InvalidMetric` naming the first missing field.
    pub async fn report_metric(&self, report: MetricReport) -> Result<()> {
        let event = report.into_event(&self.settings.client_id)?;
        if !self.metrics.is_enabled() {
            debug!(
                metric = %event.metric_name,
                api = %event.api,
                "metrics reporting disabled (REPORT_METRIC_URL unset); dropping caller metric"
            );
            return Ok(());
        }
        debug!(metric = %event.metric_name, api = %event.api, "reporting caller metric");
        self.metrics.report(event).await;
        Ok(())
    }
}

impl std::fmt::Debug for GlideClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlideClient")
            .field("client_id", &self.settings.client_id)
            .field("auth_base_url", &self.settings.internal.auth_base_url)
            .field("api_base_url", &self.settings.internal.api_base_url)
            .finish_non_exhaustive()
    }
}

fn validate(settings: &Settings) -> Result<()> {
    if settings.client_id.is_empty() {
        return Err(GlideError::Configuration("clientId is unset".into()));
    }
    settings.require_auth_base_url()?;
    Ok(())
}
