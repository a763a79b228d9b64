//! Shared OAuth plumbing for session strategies.

use std::sync::Arc;

use glide_common::auth::basic_auth_header;
use glide_common::time::{Clock, SystemClock};
use glide_domain::constants::TOKEN_PATH;
use glide_domain::{GlideError, Result, Session, Settings, TokenResponse};
use tracing::debug;

use crate::transport_ports::{HttpRequest, HttpResponse, Transport, AUTHORIZATION};

/// Everything a strategy needs to talk to the authorization server for one
/// scope.
#[derive(Clone)]
pub struct OAuthContext {
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    auth_base_url: String,
    client_id: String,
    client_secret: String,
    scope: &'static str,
}

impl OAuthContext {
    pub fn new(
        transport: Arc<dyn Transport>,
        auth_base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: &'static str,
    ) -> Self {
        Self {
            transport,
            clock: Arc::new(SystemClock),
            auth_base_url: auth_base_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope,
        }
    }

    /// Context for `scope` using the credentials and auth URL in `settings`.
    pub fn from_settings(transport: Arc<dyn Transport>, settings: &Settings, scope: &'static str) -> Self {
        Self::new(
            transport,
            settings.internal.auth_base_url.clone(),
            settings.client_id.clone(),
            settings.client_secret.clone(),
            scope,
        )
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn scope(&self) -> &'static str {
        self.scope
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// # Errors
    /// Returns `GlideError::Credentials` if the client id or secret is empty.
    pub fn require_credentials(&self) -> Result<()> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(GlideError::Credentials);
        }
        Ok(())
    }

    /// # Errors
    /// Returns `GlideError::Configuration` if the auth base URL is empty.
    pub fn require_auth_base_url(&self) -> Result<&str> {
        if self.auth_base_url.is_empty() {
            return Err(GlideError::Configuration("internal.authBaseUrl is unset".into()));
        }
        Ok(&self.auth_base_url)
    }

    /// POST a client-authenticated form to `<auth_base_url><path>`.
    ///
    /// # Errors
    /// Transport failures are wrapped as `GlideError::Transport` named after
    /// `operation`.
    pub async fn post_form(
        &self,
        operation: &'static str,
        path: &str,
        pairs: &[(&str, &str)],
    ) -> Result<HttpResponse> {
        let url = format!("{}{path}", self.auth_base_url);
        debug!(%url, scope = self.scope, operation, "posting OAuth form");

        let request = HttpRequest::post(url)
            .header(AUTHORIZATION, basic_auth_header(&self.client_id, &self.client_secret))
            .form(pairs);

        self.transport.execute(request).await.map_err(|source| GlideError::transport(operation, source))
    }

    /// Exchange a grant at the token endpoint and build a session from the
    /// response, stamped with the receipt time.
    ///
    /// # Errors
    /// `GlideError::Transport` on HTTP failure, `GlideError::Decode` if the
    /// body is not a token response.
    pub async fn exchange_token(&self, operation: &'static str, pairs: &[(&str, &str)]) -> Result<Session> {
        let response = self.post_form(operation, TOKEN_PATH, pairs).await?;
        let token: TokenResponse =
            response.json().map_err(|e| GlideError::decode("token response", e))?;

        let session = Session::from_token_response(token, self.clock.now());
        debug!(
            scope = self.scope,
            expires_at = %session.expires_at,
            scopes = ?session.scopes,
            "obtained access token"
        );
        Ok(session)
    }
}

impl std::fmt::Debug for OAuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthContext")
            .field("auth_base_url", &self.auth_base_url)
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
