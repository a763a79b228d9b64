//! HTTP Basic credentials for the OAuth token endpoints.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// `Authorization` header value for client authentication (RFC 6749 §2.3.1).
///
/// ```
/// use glide_common::auth::basic_auth_header;
///
/// assert_eq!(basic_auth_header("id", "secret"), "Basic aWQ6c2VjcmV0");
/// ```
#[must_use]
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{client_id}:{client_secret}")))
}

/// `Authorization` header value for a bearer token.
#[must_use]
pub fn bearer_auth_header(access_token: &str) -> String {
    format!("Bearer {access_token}")
}
