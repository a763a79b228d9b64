//! KYC attribute matching over a CIBA session.

use glide_common::resilience::PollConfig;
use glide_domain::constants::{KYC_MATCH_PATH, METRIC_API_KYC_MATCH, SCOPE_KYC_MATCH};
use glide_domain::{
    normalize_phone_number, ApiConfig, KycMatchProps, KycMatchResponse, Result, Session, UserIdentifier,
};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::context::{CallMetrics, ServiceContext};
use crate::session::{CibaStrategy, PendingAuthRequest, SessionManager};

#[derive(Debug, Clone)]
pub struct KycMatchClient {
    ctx: ServiceContext,
}

impl KycMatchClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a backchannel authentication request for `identifier`.
    ///
    /// # Errors
    /// `Credentials`, `Configuration`, `Transport` or `Decode` from the
    /// backchannel request.
    pub async fn for_user(&self, identifier: UserIdentifier) -> Result<KycMatchUserClient> {
        let client = KycMatchUserClient {
            sessions: SessionManager::new(
                self.ctx.oauth(SCOPE_KYC_MATCH),
                CibaStrategy::for_identifier(&identifier),
            ),
            identifier,
            ctx: self.ctx.clone(),
        };
        client.start_session().await?;
        Ok(client)
    }
}

#[derive(Debug)]
pub struct KycMatchUserClient {
    ctx: ServiceContext,
    identifier: UserIdentifier,
    sessions: SessionManager<CibaStrategy>,
}

impl KycMatchUserClient {
    #[must_use]
    pub fn identifier(&self) -> &UserIdentifier {
        &self.identifier
    }

    #[must_use]
    pub fn requires_consent(&self) -> bool {
        self.sessions.strategy().requires_consent()
    }

    #[must_use]
    pub fn consent_url(&self) -> Option<String> {
        self.sessions.strategy().consent_url()
    }

    /// # Errors
    /// See [`KycMatchClient::for_user`].
    pub async fn start_session(&self) -> Result<PendingAuthRequest> {
        self.sessions.strategy().start(self.sessions.context()).await
    }

    /// # Errors
    /// Session manager failures, unchanged.
    pub async fn get_session(&self, explicit: Option<&Session>) -> Result<Session> {
        self.sessions.get_session(explicit).await
    }

    /// # Errors
    /// `Timeout`, `PollExhausted`, `Cancelled` or a non-retryable session
    /// error.
    pub async fn poll_and_wait_for_session(&self, config: &PollConfig, cancel: &CancellationToken) -> Result<Session> {
        self.sessions.poll_and_wait_for_session(config, cancel).await
    }

    /// Compare `props` with the operator's subscriber records.
    ///
    /// Attributes the operator did not evaluate come back as
    /// `"not_available"`.
    ///
    /// # Errors
    /// `Configuration`, session failures, `Transport` or `Decode`.
    #[instrument(skip_all)]
    pub async fn match_user(&self, props: &KycMatchProps, conf: &ApiConfig) -> Result<KycMatchResponse> {
        let mut metrics = self.ctx.call_metrics(conf, METRIC_API_KYC_MATCH);
        let result = self.run_match(props, conf, &mut metrics).await;
        if result.is_ok() {
            metrics.record("Glide match complete");
        }
        metrics.finish().await;
        result
    }

    async fn run_match(
        &self,
        props: &KycMatchProps,
        conf: &ApiConfig,
        metrics: &mut CallMetrics,
    ) -> Result<KycMatchResponse> {
        let url = self.ctx.api_url(KYC_MATCH_PATH)?;
        metrics.record("Glide start");

        let session = self.sessions.get_session(conf.session.as_ref()).await?;
        let mut body = props.clone();
        if !body.phone_number.is_empty() {
            body.phone_number = normalize_phone_number(&body.phone_number);
        }
        self.ctx.post_json("kyc match", url, &session.access_token, &body).await
    }
}
