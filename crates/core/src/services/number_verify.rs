//! Number verification
//!
//! Two-step flow: the end user's device opens [`NumberVerifyClient::auth_url`]
//! over mobile data, the redirect carries an authorization code, and
//! [`NumberVerifyClient::for_user`] exchanges that code for a session bound
//! to the device's number.

use glide_common::auth::read_operator;
use glide_domain::constants::{
    AUTHORIZE_PATH, METRIC_API_NUMBER_VERIFY, NUMBER_VERIFY_PATH, NUMBER_VERIFY_PURPOSE, SCOPE_OPENID,
};
use glide_domain::{
    normalize_phone_number, ApiConfig, GlideError, NumberVerifyAuthUrlInput, NumberVerifyClientForParams,
    NumberVerifyResponse, Result, Session,
};
use serde::Serialize;
use tracing::{instrument, warn};
use url::Url;
use uuid::Uuid;

use super::context::ServiceContext;
use crate::session::{AuthorizationCodeStrategy, SessionManager};

#[derive(Debug, Clone)]
pub struct NumberVerifyClient {
    ctx: ServiceContext,
}

impl NumberVerifyClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Authorization URL the end user's device must open.
    ///
    /// `state` and `nonce` default to random UUIDs.
    ///
    /// # Errors
    /// `GlideError::Configuration` if the auth base URL or client id is
    /// missing or the URL cannot be parsed.
    pub fn auth_url(&self, opts: &NumberVerifyAuthUrlInput) -> Result<String> {
        let settings = self.ctx.settings();
        let base = settings.require_auth_base_url()?;
        if settings.client_id.is_empty() {
            return Err(GlideError::Configuration("client id is required to generate an auth url".into()));
        }

        let mut url = Url::parse(&format!("{base}{AUTHORIZE_PATH}"))
            .map_err(|e| GlideError::Configuration(format!("invalid auth base url: {e}")))?;

        let state = opts.state.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
        let nonce = Uuid::new_v4().to_string();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &settings.client_id).append_pair("response_type", "code");
            if !settings.redirect_uri.is_empty() {
                query.append_pair("redirect_uri", &settings.redirect_uri);
            }
            query
                .append_pair("scope", SCOPE_OPENID)
                .append_pair("purpose", NUMBER_VERIFY_PURPOSE)
                .append_pair("state", &state)
                .append_pair("nonce", &nonce)
                .append_pair("max_age", "0");
            if let Some(number) = opts.use_dev_number.as_deref().filter(|n| !n.is_empty()) {
                query.append_pair("login_hint", &format!("tel:{number}"));
            }
            if opts.print_code {
                query.append_pair("dev_print", "true");
            }
        }

        Ok(url.into())
    }

    /// Exchange the authorization code and return a client bound to the
    /// verified device.
    ///
    /// # Errors
    /// Session start failures (`Configuration`, `Credentials`,
    /// `InvalidInput` for an empty code, `Transport`, `Decode`).
    pub async fn for_user(&self, params: NumberVerifyClientForParams) -> Result<NumberVerifyUserClient> {
        let client = NumberVerifyUserClient {
            sessions: SessionManager::new(
                self.ctx.oauth(SCOPE_OPENID),
                AuthorizationCodeStrategy::new(params.code),
            ),
            phone_number: params.phone_number.filter(|n| !n.is_empty()),
            ctx: self.ctx.clone(),
        };
        client.start_session().await?;
        Ok(client)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest {
    phone_number: String,
}

/// Number-verify client bound to one authorization code.
#[derive(Debug)]
pub struct NumberVerifyUserClient {
    ctx: ServiceContext,
    sessions: SessionManager<AuthorizationCodeStrategy>,
    phone_number: Option<String>,
}

impl NumberVerifyUserClient {
    /// Exchange the authorization code for a session.
    ///
    /// # Errors
    /// See [`NumberVerifyClient::for_user`].
    pub async fn start_session(&self) -> Result<Session> {
        self.sessions.generate_new_session().await
    }

    pub async fn session(&self) -> Option<Session> {
        self.sessions.cached_session().await
    }

    /// Operator named in the session's access token (`ext.operator`).
    ///
    /// The token signature is not verified.
    ///
    /// # Errors
    /// `GlideError::SessionRequired` without a session,
    /// `GlideError::Decode` if the token is not a readable JWT.
    pub async fn operator(&self) -> Result<String> {
        let session = self.sessions.cached_session().await.ok_or(GlideError::SessionRequired("get operator"))?;
        read_operator(&session.access_token).map_err(|e| GlideError::decode("access token claims", e))
    }

    /// Ask the operator whether `number` (or the number given at
    /// [`NumberVerifyClient::for_user`]) belongs to the authenticated device.
    ///
    /// # Errors
    /// `SessionRequired`, `Configuration`, `InvalidInput` when no number is
    /// known, `Transport` or `Decode`.
    #[instrument(skip_all)]
    pub async fn verify_number(&self, number: Option<&str>, conf: &ApiConfig) -> Result<NumberVerifyResponse> {
        let mut metrics = self.ctx.call_metrics(conf, METRIC_API_NUMBER_VERIFY);
        if metrics.enabled() {
            let operator = self.operator().await.unwrap_or_else(|err| {
                warn!(error = %err, "cannot read operator for metrics");
                String::new()
            });
            metrics.record_with_operator("Glide numberVerify start function", &operator);
        }

        let result = self.verify(number, conf).await;
        if let Ok(response) = &result {
            metrics.record("Glide success");
            metrics.record(if response.device_phone_number_verified { "Glide verified" } else { "Glide unverified" });
        }
        metrics.finish().await;
        result
    }

    async fn verify(&self, number: Option<&str>, conf: &ApiConfig) -> Result<NumberVerifyResponse> {
        let session = match &conf.session {
            Some(explicit) => explicit.clone(),
            None => self.sessions.cached_session().await.ok_or(GlideError::SessionRequired("verify a number"))?,
        };
        let url = self.ctx.api_url(NUMBER_VERIFY_PATH)?;

        let phone = number
            .filter(|n| !n.is_empty())
            .or(self.phone_number.as_deref())
            .ok_or_else(|| GlideError::InvalidInput("phone number is required to verify a number".into()))?;

        let body = VerifyRequest { phone_number: normalize_phone_number(phone) };
        self.ctx.post_json("number verification", url, &session.access_token, &body).await
    }
}
