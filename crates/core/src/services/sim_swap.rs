//! SIM swap detection over a CIBA session.

use glide_common::resilience::PollConfig;
use glide_domain::constants::{SCOPE_SIM_SWAP, SIM_SWAP_CHECK_PATH, SIM_SWAP_RETRIEVE_DATE_PATH};
use glide_domain::{
    normalize_phone_number, ApiConfig, GlideError, Result, Session, SimSwapCheckParams, SimSwapCheckResponse,
    SimSwapRetrieveDateParams, SimSwapRetrieveDateResponse, UserIdentifier,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::context::{not_found_as, ServiceContext};
use crate::session::{CibaStrategy, PendingAuthRequest, SessionManager};

#[derive(Debug, Clone)]
pub struct SimSwapClient {
    ctx: ServiceContext,
}

impl SimSwapClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a backchannel authentication request for `identifier` and
    /// return a client bound to it.
    ///
    /// The session itself is not ready until the end user has consented;
    /// check [`SimSwapUserClient::requires_consent`] and poll with
    /// [`SimSwapUserClient::poll_and_wait_for_session`].
    ///
    /// # Errors
    /// `Credentials`, `Configuration`, `Transport` or `Decode` from the
    /// backchannel request.
    pub async fn for_user(&self, identifier: UserIdentifier) -> Result<SimSwapUserClient> {
        let client = SimSwapUserClient {
            sessions: SessionManager::new(
                self.ctx.oauth(SCOPE_SIM_SWAP),
                CibaStrategy::for_identifier(&identifier),
            ),
            identifier,
            ctx: self.ctx.clone(),
        };
        client.start_session().await?;
        Ok(client)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckRequest {
    phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_age: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrieveDateRequest {
    phone_number: String,
}

#[derive(Debug)]
pub struct SimSwapUserClient {
    ctx: ServiceContext,
    identifier: UserIdentifier,
    sessions: SessionManager<CibaStrategy>,
}

impl SimSwapUserClient {
    #[must_use]
    pub fn identifier(&self) -> &UserIdentifier {
        &self.identifier
    }

    /// Whether the end user must open [`consent_url`](Self::consent_url)
    /// before a session can be issued.
    #[must_use]
    pub fn requires_consent(&self) -> bool {
        self.sessions.strategy().requires_consent()
    }

    #[must_use]
    pub fn consent_url(&self) -> Option<String> {
        self.sessions.strategy().consent_url()
    }

    /// (Re)start the backchannel authentication request.
    ///
    /// # Errors
    /// See [`SimSwapClient::for_user`].
    pub async fn start_session(&self) -> Result<PendingAuthRequest> {
        self.sessions.strategy().start(self.sessions.context()).await
    }

    /// Cached or freshly exchanged session.
    ///
    /// # Errors
    /// Session manager failures, unchanged.
    pub async fn get_session(&self, explicit: Option<&Session>) -> Result<Session> {
        self.sessions.get_session(explicit).await
    }

    /// Wait for the end user to complete authentication.
    ///
    /// # Errors
    /// `Timeout`, `PollExhausted`, `Cancelled` or a non-retryable session
    /// error.
    pub async fn poll_and_wait_for_session(&self, config: &PollConfig, cancel: &CancellationToken) -> Result<Session> {
        self.sessions.poll_and_wait_for_session(config, cancel).await
    }

    /// Whether the number's SIM changed within `max_age` hours (operator
    /// default when unset).
    ///
    /// # Errors
    /// `Configuration`, `InvalidInput` when no phone number is known,
    /// `NotFound` when the operator has no record of the number, session
    /// and transport failures.
    #[instrument(skip_all)]
    pub async fn check(&self, params: &SimSwapCheckParams, conf: &ApiConfig) -> Result<SimSwapCheckResponse> {
        let url = self.ctx.api_url(SIM_SWAP_CHECK_PATH)?;
        let phone = self.resolve_phone(params.phone_number.as_deref())?;
        let session = self.sessions.get_session(conf.session.as_ref()).await?;

        debug!(max_age = ?params.max_age, "checking sim swap");
        let body = CheckRequest { phone_number: normalize_phone_number(&phone), max_age: params.max_age };
        self.ctx
            .post_json("sim swap check", url, &session.access_token, &body)
            .await
            .map_err(|err| not_found_as(err, "network id", &phone))
    }

    /// Timestamp of the latest SIM change for the number.
    ///
    /// # Errors
    /// Same as [`check`](Self::check).
    #[instrument(skip_all)]
    pub async fn retrieve_date(
        &self,
        params: &SimSwapRetrieveDateParams,
        conf: &ApiConfig,
    ) -> Result<SimSwapRetrieveDateResponse> {
        let url = self.ctx.api_url(SIM_SWAP_RETRIEVE_DATE_PATH)?;
        let phone = self.resolve_phone(params.phone_number.as_deref())?;
        let session = self.sessions.get_session(conf.session.as_ref()).await?;

        let body = RetrieveDateRequest { phone_number: normalize_phone_number(&phone) };
        self.ctx
            .post_json("sim swap retrieve date", url, &session.access_token, &body)
            .await
            .map_err(|err| not_found_as(err, "network id", &phone))
    }

    fn resolve_phone(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .filter(|n| !n.is_empty())
            .or_else(|| self.identifier.phone_number())
            .map(str::to_string)
            .ok_or_else(|| GlideError::InvalidInput(format!("phone number is required for {}", self.identifier)))
    }
}
