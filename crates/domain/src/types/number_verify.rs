//! Number verification request and response shapes.

use serde::{Deserialize, Serialize};

/// Options for building the number-verification authorization URL.
#[derive(Debug, Clone, Default)]
pub struct NumberVerifyAuthUrlInput {
    /// Opaque state echoed back on redirect; a random UUID when `None`.
    pub state: Option<String>,
    /// Test number forwarded as `login_hint=tel:<number>`.
    pub use_dev_number: Option<String>,
    /// Ask the sandbox to print the authorization code.
    pub print_code: bool,
}

/// Parameters for binding a number-verify client to one end user.
#[derive(Debug, Clone, Default)]
pub struct NumberVerifyClientForParams {
    /// Authorization code returned on the redirect.
    pub code: String,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberVerifyResponse {
    #[serde(default)]
    pub device_phone_number_verified: bool,
}
