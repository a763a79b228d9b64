//! Authorization-code grant (RFC 6749 §4.1), token leg only.

use async_trait::async_trait;
use glide_domain::constants::GRANT_AUTHORIZATION_CODE;
use glide_domain::{GlideError, Result, Session};

use super::context::OAuthContext;
use super::strategy::SessionStrategy;

/// Exchanges the code returned on the redirect. Codes are single use, so a
/// second `acquire` is expected to be rejected by the server.
#[derive(Debug, Clone)]
pub struct AuthorizationCodeStrategy {
    code: String,
}

impl AuthorizationCodeStrategy {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[async_trait]
impl SessionStrategy for AuthorizationCodeStrategy {
    async fn acquire(&self, ctx: &OAuthContext) -> Result<Session> {
        ctx.require_auth_base_url()?;
        ctx.require_credentials()?;
        if self.code.is_empty() {
            return Err(GlideError::InvalidInput("code is required to start a session".into()));
        }

        ctx.exchange_token(
            "authorization code exchange",
            &[("grant_type", GRANT_AUTHORIZATION_CODE), ("code", &self.code)],
        )
        .await
    }
}
