//! Session acquisition strategies.

use async_trait::async_trait;
use glide_domain::{Result, Session};

use super::context::OAuthContext;

/// One way of obtaining a fresh access token for a scope.
///
/// The [`SessionManager`](super::SessionManager) owns caching and
/// validation; a strategy only talks to the authorization server.
#[async_trait]
pub trait SessionStrategy: Send + Sync {
    async fn acquire(&self, ctx: &OAuthContext) -> Result<Session>;
}
