//! OAuth sessions and per-call API options.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SESSION_EXPIRY_MARGIN_SECS;

/// Bearer token issued by the authorization server.
///
/// Sessions are replaced, never mutated: regeneration builds a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub scopes: BTreeSet<String>,
}

impl Session {
    #[must_use]
    pub fn new<I, S>(access_token: impl Into<String>, expires_at: DateTime<Utc>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            access_token: access_token.into(),
            expires_at,
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a session from a token endpoint response received at `now`.
    ///
    /// `expires_at` is `now + expires_in`, saturating at the bounds of
    /// `DateTime<Utc>`; the space-delimited `scope` string becomes the scope
    /// set.
    #[must_use]
    pub fn from_token_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        let scopes = response
            .scope
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Self {
            access_token: response.access_token,
            expires_at: expiry_after(now, response.expires_in),
            scopes,
        }
    }

    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// A session is usable for `scope` iff it carries the scope and does not
    /// expire within the safety margin.
    #[must_use]
    pub fn is_valid(&self, scope: &str, now: DateTime<Utc>) -> bool {
        self.expires_at > now + Duration::seconds(SESSION_EXPIRY_MARGIN_SECS)
            && self.has_scope(scope)
    }

    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds()
    }
}

/// Token endpoint response (RFC 6749 section 5.1).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Per-call options accepted by every service operation.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Caller's correlation id; metrics are reported only when set.
    pub session_identifier: Option<String>,
    /// Session to use verbatim instead of the client's cached one.
    pub session: Option<Session>,
}

impl ApiConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session_identifier(mut self, id: impl Into<String>) -> Self {
        self.session_identifier = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Session identifier to tag metrics with, if metrics are enabled for
    /// this call.
    #[must_use]
    pub fn metrics_session_id(&self) -> Option<&str> {
        self.session_identifier.as_deref().filter(|id| !id.is_empty())
    }
}

fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    Duration::try_seconds(expires_in).and_then(|delta| now.checked_add_signed(delta)).unwrap_or(
        if expires_in < 0 { DateTime::<Utc>::MIN_UTC } else { DateTime::<Utc>::MAX_UTC },
    )
}
