//! Unsigned JWT fixtures.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Compact JWT with an `alg: none` header, the given JSON payload and a
/// dummy signature.
#[must_use]
pub fn unsigned_jwt(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}

/// Access token carrying `ext.operator`.
#[must_use]
pub fn token_with_operator(operator: &str) -> String {
    unsigned_jwt(&serde_json::json!({ "ext": { "operator": operator }, "sub": "test-user" }))
}
