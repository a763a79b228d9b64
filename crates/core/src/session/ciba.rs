//! Client-Initiated Backchannel Authentication (OpenID CIBA, poll mode).
//!
//! `start` registers an authentication request for the end user and may
//! hand back a consent URL the user has to visit. `acquire` then exchanges
//! the pending `auth_req_id` at the token endpoint, starting a new request
//! first if none is pending.

use async_trait::async_trait;
use glide_domain::constants::{BACKCHANNEL_AUTH_PATH, GRANT_CIBA};
use glide_domain::{GlideError, Result, Session, UserIdentifier};
use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{debug, info};

use super::context::OAuthContext;
use super::strategy::SessionStrategy;

/// State of the outstanding backchannel request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingAuthRequest {
    pub auth_req_id: Option<String>,
    pub consent_url: Option<String>,
    pub requires_consent: bool,
}

#[derive(Debug, Deserialize)]
struct BackchannelResponse {
    #[serde(default)]
    auth_req_id: Option<String>,
    #[serde(rename = "consentUrl", default)]
    consent_url: Option<String>,
}

#[derive(Debug)]
pub struct CibaStrategy {
    login_hint: Option<String>,
    pending: Mutex<PendingAuthRequest>,
}

impl CibaStrategy {
    #[must_use]
    pub fn for_identifier(identifier: &UserIdentifier) -> Self {
        Self { login_hint: identifier.login_hint(), pending: Mutex::new(PendingAuthRequest::default()) }
    }

    /// Start a backchannel authentication request.
    ///
    /// A `consentUrl` in the response flips `requires_consent`; the flag
    /// stays set for the lifetime of the client.
    ///
    /// # Errors
    /// `GlideError::Credentials`, `GlideError::Transport` or
    /// `GlideError::Decode`.
    pub async fn start(&self, ctx: &OAuthContext) -> Result<PendingAuthRequest> {
        ctx.require_credentials()?;

        let mut pairs = vec![("scope", ctx.scope())];
        if let Some(hint) = self.login_hint.as_deref() {
            pairs.push(("login_hint", hint));
        }

        let response = ctx.post_form("backchannel authentication", BACKCHANNEL_AUTH_PATH, &pairs).await?;
        let body: BackchannelResponse =
            response.json().map_err(|e| GlideError::decode("backchannel authentication response", e))?;

        let mut pending = self.pending.lock();
        if let Some(url) = body.consent_url.filter(|url| !url.is_empty()) {
            info!(scope = ctx.scope(), "backchannel authentication requires user consent");
            pending.requires_consent = true;
            pending.consent_url = Some(url);
        }
        pending.auth_req_id = body.auth_req_id.filter(|id| !id.is_empty());
        debug!(scope = ctx.scope(), has_auth_req_id = pending.auth_req_id.is_some(), "backchannel request started");

        Ok(pending.clone())
    }

    #[must_use]
    pub fn pending(&self) -> PendingAuthRequest {
        self.pending.lock().clone()
    }

    #[must_use]
    pub fn requires_consent(&self) -> bool {
        self.pending.lock().requires_consent
    }

    #[must_use]
    pub fn consent_url(&self) -> Option<String> {
        self.pending.lock().consent_url.clone()
    }

    fn clear_auth_req_id(&self) {
        self.pending.lock().auth_req_id = None;
    }
}

#[async_trait]
impl SessionStrategy for CibaStrategy {
    async fn acquire(&self, ctx: &OAuthContext) -> Result<Session> {
        ctx.require_credentials()?;

        let mut auth_req_id = self.pending.lock().auth_req_id.clone();
        if auth_req_id.is_none() {
            auth_req_id = self.start(ctx).await?.auth_req_id;
        }
        let auth_req_id = auth_req_id.ok_or(GlideError::SessionStartFailed)?;

        let result = ctx
            .exchange_token(
                "backchannel token exchange",
                &[("grant_type", GRANT_CIBA), ("auth_req_id", &auth_req_id)],
            )
            .await;

        match result {
            Ok(session) => {
                self.clear_auth_req_id();
                Ok(session)
            }
            Err(err @ GlideError::Transport { .. }) => {
                debug!(scope = ctx.scope(), error = %err, "backchannel token exchange failed; discarding auth_req_id");
                self.clear_auth_req_id();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}
