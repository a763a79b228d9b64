//! Magic auth (silent network auth with OTP/link fallback) shapes.

use serde::{Deserialize, Serialize};

/// Channel used when network authentication is not possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FallbackChannel {
    Sms,
    Email,
    NoFallback,
}

/// Parameters for `start_auth`. Empty strings are omitted from the request.
#[derive(Debug, Clone, Default)]
pub struct MagicAuthStartProps {
    pub email: String,
    /// Takes precedence over `email` when both are set.
    pub phone_number: String,
    pub state: String,
    pub redirect_url: String,
    pub fallback_channel: Option<FallbackChannel>,
    pub device_ip_address: String,
    pub otp_confirmation_url: String,
    pub rcs_confirmation_url: String,
}

/// Parameters for `verify_auth`. Either `code` (OTP) or `token` (link).
#[derive(Debug, Clone, Default)]
pub struct MagicAuthVerifyProps {
    pub email: String,
    pub phone_number: String,
    pub code: String,
    pub token: String,
    pub device_ip_address: String,
}

#[derive(Debug, Clone, Default)]
pub struct MagicAuthStartServerAuthProps {
    pub phone_number: String,
    pub state: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicAuthStartResponse {
    /// Verification kind chosen by the operator (e.g. `MAGIC`, `SMS`).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_auth_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicAuthCheckResponse {
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicAuthStartServerAuthResponse {
    pub session_id: String,
    pub auth_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerAuthStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicAuthCheckServerAuthResponse {
    pub status: ServerAuthStatus,
    #[serde(default)]
    pub verified: bool,
}
