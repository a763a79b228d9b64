//! Magic auth: silent network authentication with OTP or link fallback.

use glide_domain::constants::{
    MAGIC_AUTH_CHECK_PATH, MAGIC_AUTH_CHECK_SERVER_AUTH_PATH, MAGIC_AUTH_START_PATH,
    MAGIC_AUTH_START_SERVER_AUTH_PATH, METRIC_API_MAGIC_AUTH, SCOPE_MAGIC_AUTH,
};
use glide_domain::{
    normalize_phone_number, ApiConfig, FallbackChannel, GlideError, MagicAuthCheckResponse,
    MagicAuthCheckServerAuthResponse, MagicAuthStartProps, MagicAuthStartResponse, MagicAuthStartServerAuthProps,
    MagicAuthStartServerAuthResponse, MagicAuthVerifyProps, Result,
};
use serde::Serialize;
use tracing::instrument;
use url::Url;

use super::context::{CallMetrics, ServiceContext};
use crate::session::{ClientCredentialsStrategy, SessionManager};
use crate::transport_ports::HttpRequest;

/// End-user contact the verification is addressed to.
#[derive(Serialize)]
enum Contact {
    #[serde(rename = "phoneNumber")]
    Phone(String),
    #[serde(rename = "email")]
    Email(String),
}

impl Contact {
    /// Phone wins over email.
    fn pick(phone_number: &str, email: &str) -> Result<Self> {
        if !phone_number.is_empty() {
            Ok(Self::Phone(normalize_phone_number(phone_number)))
        } else if !email.is_empty() {
            Ok(Self::Email(email.to_string()))
        } else {
            Err(GlideError::InvalidInput("phone number or email is required".into()))
        }
    }
}

#[derive(Serialize)]
enum Proof<'a> {
    #[serde(rename = "code")]
    Code(&'a str),
    #[serde(rename = "token")]
    Token(&'a str),
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartRequest<'a> {
    #[serde(flatten)]
    contact: Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_channel: Option<FallbackChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_ip_address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    otp_confirmation_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rcs_confirmation_url: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    #[serde(flatten)]
    contact: Contact,
    #[serde(flatten)]
    proof: Proof<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_ip_address: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartServerAuthRequest<'a> {
    phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_url: Option<&'a str>,
}

/// Magic auth client. Uses a client-credentials session for the
/// `magic-auth` scope.
#[derive(Debug)]
pub struct MagicAuthClient {
    ctx: ServiceContext,
    sessions: SessionManager<ClientCredentialsStrategy>,
}

impl MagicAuthClient {
    pub fn new(ctx: ServiceContext) -> Self {
        let sessions = SessionManager::new(ctx.oauth(SCOPE_MAGIC_AUTH), ClientCredentialsStrategy::new());
        Self { ctx, sessions }
    }

    /// Start a verification for a phone number or email address.
    ///
    /// # Errors
    /// `Configuration`, `InvalidInput` without phone and email, session
    /// failures, `Transport` or `Decode`.
    #[instrument(skip_all)]
    pub async fn start_auth(&self, props: &MagicAuthStartProps, conf: &ApiConfig) -> Result<MagicAuthStartResponse> {
        let mut metrics = self.ctx.call_metrics(conf, METRIC_API_MAGIC_AUTH);
        let result = self.start(props, conf, &mut metrics).await;
        metrics.finish().await;
        result
    }

    async fn start(
        &self,
        props: &MagicAuthStartProps,
        conf: &ApiConfig,
        metrics: &mut CallMetrics,
    ) -> Result<MagicAuthStartResponse> {
        let url = self.ctx.api_url(MAGIC_AUTH_START_PATH)?;
        metrics.record("Glide start");

        let session = self.sessions.get_session(conf.session.as_ref()).await?;
        let body = StartRequest {
            contact: Contact::pick(&props.phone_number, &props.email)?,
            redirect_url: non_empty(&props.redirect_url),
            state: non_empty(&props.state),
            fallback_channel: props.fallback_channel,
            device_ip_address: non_empty(&props.device_ip_address),
            otp_confirmation_url: non_empty(&props.otp_confirmation_url),
            rcs_confirmation_url: non_empty(&props.rcs_confirmation_url),
        };
        let response: MagicAuthStartResponse =
            self.ctx.post_json("magic auth start", url, &session.access_token, &body).await?;

        if let Some(operator) = response.operator_id.as_deref().filter(|op| !op.is_empty()) {
            metrics.record_with_operator("Glide verificationStartRes", operator);
        }
        Ok(response)
    }

    /// Check an OTP `code` or link `token` for a started verification.
    ///
    /// # Errors
    /// `Configuration`, `InvalidInput` without phone and email or without
    /// code and token, session failures, `Transport` or `Decode`.
    #[instrument(skip_all)]
    pub async fn verify_auth(&self, props: &MagicAuthVerifyProps, conf: &ApiConfig) -> Result<MagicAuthCheckResponse> {
        let mut metrics = self.ctx.call_metrics(conf, METRIC_API_MAGIC_AUTH);
        let result = self.verify(props, conf).await;
        if let Ok(response) = &result {
            metrics.record("Glide success");
            metrics.record(if response.verified { "Glide verified" } else { "Glide unverified" });
        }
        metrics.finish().await;
        result
    }

    async fn verify(&self, props: &MagicAuthVerifyProps, conf: &ApiConfig) -> Result<MagicAuthCheckResponse> {
        let url = self.ctx.api_url(MAGIC_AUTH_CHECK_PATH)?;
        let session = self.sessions.get_session(conf.session.as_ref()).await?;

        let proof = match (non_empty(&props.code), non_empty(&props.token)) {
            (Some(code), _) => Proof::Code(code),
            (None, Some(token)) => Proof::Token(token),
            (None, None) => return Err(GlideError::InvalidInput("code or token is required".into())),
        };
        let body = VerifyRequest {
            contact: Contact::pick(&props.phone_number, &props.email)?,
            proof,
            device_ip_address: non_empty(&props.device_ip_address),
        };
        self.ctx.post_json("magic auth check", url, &session.access_token, &body).await
    }

    /// Start a server-driven verification; the end user opens `auth_url`
    /// and the server polls [`check_server_auth`](Self::check_server_auth).
    ///
    /// # Errors
    /// `Configuration`, `InvalidInput` without a phone number, session
    /// failures, `Transport` or `Decode`.
    #[instrument(skip_all)]
    pub async fn start_server_auth(
        &self,
        props: &MagicAuthStartServerAuthProps,
        conf: &ApiConfig,
    ) -> Result<MagicAuthStartServerAuthResponse> {
        let url = self.ctx.api_url(MAGIC_AUTH_START_SERVER_AUTH_PATH)?;
        if props.phone_number.is_empty() {
            return Err(GlideError::InvalidInput("phone number is required to start server auth".into()));
        }
        let session = self.sessions.get_session(conf.session.as_ref()).await?;

        let body = StartServerAuthRequest {
            phone_number: normalize_phone_number(&props.phone_number),
            state: non_empty(&props.state),
            redirect_url: non_empty(&props.redirect_url),
        };
        self.ctx.post_json("magic auth start server auth", url, &session.access_token, &body).await
    }

    /// Status of a server-driven verification.
    ///
    /// # Errors
    /// `Configuration`, `InvalidInput` for an empty session id, session
    /// failures, `Transport` or `Decode`.
    #[instrument(skip_all, fields(session_id = session_id))]
    pub async fn check_server_auth(
        &self,
        session_id: &str,
        conf: &ApiConfig,
    ) -> Result<MagicAuthCheckServerAuthResponse> {
        let base = self.ctx.api_url(MAGIC_AUTH_CHECK_SERVER_AUTH_PATH)?;
        if session_id.is_empty() {
            return Err(GlideError::InvalidInput("session id is required to check server auth".into()));
        }
        let mut url = Url::parse(&base).map_err(|e| GlideError::Configuration(format!("invalid api base url: {e}")))?;
        url.query_pairs_mut().append_pair("sessionId", session_id);

        let session = self.sessions.get_session(conf.session.as_ref()).await?;
        self.ctx
            .send_json("magic auth check server auth", HttpRequest::get(String::from(url)), &session.access_token)
            .await
    }
}
