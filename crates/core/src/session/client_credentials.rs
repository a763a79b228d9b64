//! Client-credentials grant (RFC 6749 §4.4).

use async_trait::async_trait;
use glide_domain::constants::GRANT_CLIENT_CREDENTIALS;
use glide_domain::{GlideError, Result, Session, TransportError};
use serde::Deserialize;

use super::context::OAuthContext;
use super::strategy::SessionStrategy;

/// Machine-to-machine token for a fixed scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientCredentialsStrategy {
    classify_token_errors: bool,
}

impl ClientCredentialsStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate 401/400 token responses into [`GlideError::Unauthorized`],
    /// [`GlideError::InvalidScope`] and [`GlideError::InvalidRequest`].
    #[must_use]
    pub fn with_error_classification() -> Self {
        Self { classify_token_errors: true }
    }
}

#[async_trait]
impl SessionStrategy for ClientCredentialsStrategy {
    async fn acquire(&self, ctx: &OAuthContext) -> Result<Session> {
        ctx.require_credentials()?;

        let result = ctx
            .exchange_token(
                "client credentials token request",
                &[("grant_type", GRANT_CLIENT_CREDENTIALS), ("scope", ctx.scope())],
            )
            .await;

        match result {
            Err(err) if self.classify_token_errors => Err(classify_token_error(err)),
            other => other,
        }
    }
}

#[derive(Deserialize)]
struct OAuthErrorBody {
    #[serde(default)]
    error: String,
}

/// Map token endpoint rejections onto dedicated error variants.
fn classify_token_error(err: GlideError) -> GlideError {
    match err {
        GlideError::Transport { source: TransportError::Status { status: 401, .. }, .. } => {
            GlideError::Unauthorized
        }
        GlideError::Transport { source: TransportError::Status { status: 400, ref body }, .. } => {
            let code = serde_json::from_str::<OAuthErrorBody>(body).map(|b| b.error).unwrap_or_default();
            if code == "invalid_scope" {
                GlideError::InvalidScope
            } else {
                GlideError::InvalidRequest
            }
        }
        other => other,
    }
}
