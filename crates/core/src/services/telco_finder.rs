//! Telco finder: resolve which operator serves a number or IP.

use glide_domain::constants::{SCOPE_TELCO_FINDER, TELCO_FINDER_NETWORK_ID_PATH, TELCO_FINDER_SEARCH_PATH};
use glide_domain::{
    normalize_phone_number, ApiConfig, Result, TelcoFinderNetworkIdResponse, TelcoFinderSearchResponse,
};
use serde::Serialize;
use tracing::{debug, instrument};

use super::context::{not_found_as, ServiceContext};
use crate::session::{ClientCredentialsStrategy, SessionManager};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NetworkIdRequest {
    phone_number: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    resource: &'a str,
}

/// Telco finder client. Token endpoint errors are classified into
/// `Unauthorized`, `InvalidScope` and `InvalidRequest`.
#[derive(Debug)]
pub struct TelcoFinderClient {
    ctx: ServiceContext,
    sessions: SessionManager<ClientCredentialsStrategy>,
}

impl TelcoFinderClient {
    pub fn new(ctx: ServiceContext) -> Self {
        let sessions =
            SessionManager::new(ctx.oauth(SCOPE_TELCO_FINDER), ClientCredentialsStrategy::with_error_classification());
        Self { ctx, sessions }
    }

    /// Network id of the operator serving `phone_number`.
    ///
    /// # Errors
    /// `Configuration`, `NotFound` for unknown numbers, session failures,
    /// `Transport` or `Decode`.
    #[instrument(skip_all)]
    pub async fn network_id_for_number(
        &self,
        phone_number: &str,
        conf: &ApiConfig,
    ) -> Result<TelcoFinderNetworkIdResponse> {
        let url = self.ctx.api_url(TELCO_FINDER_NETWORK_ID_PATH)?;
        let session = self.sessions.get_session(conf.session.as_ref()).await?;

        let body = NetworkIdRequest { phone_number: normalize_phone_number(phone_number) };
        self.ctx
            .post_json("telco finder network id", url, &session.access_token, &body)
            .await
            .map_err(|err| not_found_as(err, "network id", phone_number))
    }

    /// # Errors
    /// See [`lookup`](Self::lookup).
    pub async fn lookup_ip(&self, ip: &str, conf: &ApiConfig) -> Result<TelcoFinderSearchResponse> {
        self.lookup(&format!("ipport:{ip}"), conf).await
    }

    /// # Errors
    /// See [`lookup`](Self::lookup).
    pub async fn lookup_number(&self, phone_number: &str, conf: &ApiConfig) -> Result<TelcoFinderSearchResponse> {
        self.lookup(&format!("tel:{}", normalize_phone_number(phone_number)), conf).await
    }

    /// Search for the operator owning `subject` (`tel:...` or `ipport:...`).
    ///
    /// # Errors
    /// `Configuration`, `NotFound` naming the subject, session failures,
    /// `Transport` or `Decode`.
    #[instrument(skip_all, fields(subject = subject))]
    pub async fn lookup(&self, subject: &str, conf: &ApiConfig) -> Result<TelcoFinderSearchResponse> {
        let url = self.ctx.api_url(TELCO_FINDER_SEARCH_PATH)?;
        let session = self.sessions.get_session(conf.session.as_ref()).await?;

        let response: TelcoFinderSearchResponse = self
            .ctx
            .post_json("telco finder lookup", url, &session.access_token, &SearchRequest { resource: subject })
            .await
            .map_err(|err| not_found_as(err, "telco lookup", subject))?;
        debug!(operator = %response.properties.operator_id, "telco lookup resolved");
        Ok(response)
    }
}
