//! Unverified JWT claims reader.
//!
//! Only the payload segment is decoded. The signature is NOT checked: the
//! values read here are informational (e.g. the operator name used to tag
//! metrics) and must not drive authorization decisions.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("invalid access token format")]
    Malformed,

    #[error("failed to decode token payload: {0}")]
    Encoding(String),

    #[error("failed to parse token claims: {0}")]
    Json(String),
}

/// Decode the payload segment of a compact JWT into `T`.
///
/// # Errors
/// - `ClaimsError::Malformed` if the token has fewer than two segments
/// - `ClaimsError::Encoding` if the payload is not base64
/// - `ClaimsError::Json` if the payload does not match `T`
pub fn decode_payload<T: DeserializeOwned>(token: &str) -> Result<T, ClaimsError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next()) {
        (Some(_header), Some(payload)) => payload.trim_end_matches('='),
        _ => return Err(ClaimsError::Malformed),
    };

    // Tokens are base64url per RFC 7519, some issuers emit the standard alphabet.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .map_err(|e| ClaimsError::Encoding(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Json(e.to_string()))
}

#[derive(Debug, Default, Deserialize)]
struct OperatorClaims {
    #[serde(default)]
    ext: ExtClaims,
}

#[derive(Debug, Default, Deserialize)]
struct ExtClaims {
    #[serde(default)]
    operator: String,
}

/// Read `ext.operator` from an access token. Missing claim yields `""`.
///
/// # Errors
/// See [`decode_payload`].
pub fn read_operator(access_token: &str) -> Result<String, ClaimsError> {
    decode_payload::<OperatorClaims>(access_token).map(|claims| claims.ext.operator)
}
