//! Client settings and their merge rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GlideError;

/// Verbosity requested by the SDK user.
///
/// `Unset` means "not chosen"; consumers treat it as [`LogLevel::Error`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Unset,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Level to apply once defaults have been resolved.
    #[must_use]
    pub fn effective(self) -> Self {
        match self {
            Self::Unset => Self::Error,
            other => other,
        }
    }

    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub fn as_directive(self) -> &'static str {
        match self.effective() {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Unset | Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("unset"),
            other => f.write_str(other.as_directive()),
        }
    }
}

impl FromStr for LogLevel {
    type Err = GlideError;

    /// Accepts level names (case-insensitive) or their numeric form `0..=4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "unset" => Ok(Self::Unset),
            "1" | "debug" => Ok(Self::Debug),
            "2" | "info" => Ok(Self::Info),
            "3" | "warn" | "warning" => Ok(Self::Warn),
            "4" | "error" => Ok(Self::Error),
            other => Err(GlideError::Configuration(format!("unknown log level: {other}"))),
        }
    }
}

/// Endpoint and diagnostics settings rarely changed by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalSettings {
    pub auth_base_url: String,
    pub api_base_url: String,
    #[serde(default)]
    pub log_level: LogLevel,
}

/// SDK settings shared by every service client.
///
/// Empty strings mean "unset": they never override a default during
/// [`Settings::merged_over`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub internal: InternalSettings,
    /// Destination of usage metrics; metrics are dropped when empty.
    #[serde(default)]
    pub metric_report_url: String,
}

impl Settings {
    /// Overlay `self` on top of `defaults`, field by field.
    ///
    /// A non-empty value in `self` wins; an empty one keeps the default.
    #[must_use]
    pub fn merged_over(self, defaults: Settings) -> Settings {
        Settings {
            client_id: pick(self.client_id, defaults.client_id),
            client_secret: pick(self.client_secret, defaults.client_secret),
            redirect_uri: pick(self.redirect_uri, defaults.redirect_uri),
            internal: InternalSettings {
                auth_base_url: pick(self.internal.auth_base_url, defaults.internal.auth_base_url),
                api_base_url: pick(self.internal.api_base_url, defaults.internal.api_base_url),
                log_level: match self.internal.log_level {
                    LogLevel::Unset => defaults.internal.log_level,
                    explicit => explicit,
                },
            },
            metric_report_url: pick(self.metric_report_url, defaults.metric_report_url),
        }
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// Ensure the API base URL is configured before a domain call.
    ///
    /// # Errors
    /// Returns `GlideError::Configuration` if `internal.api_base_url` is empty.
    pub fn require_api_base_url(&self) -> Result<&str, GlideError> {
        non_empty(&self.internal.api_base_url, "internal.apiBaseUrl is unset")
    }

    /// # Errors
    /// Returns `GlideError::Configuration` if `internal.auth_base_url` is empty.
    pub fn require_auth_base_url(&self) -> Result<&str, GlideError> {
        non_empty(&self.internal.auth_base_url, "internal.authBaseUrl is unset")
    }
}

fn pick(explicit: String, default: String) -> String {
    if explicit.is_empty() {
        default
    } else {
        explicit
    }
}

fn non_empty<'a>(value: &'a str, message: &str) -> Result<&'a str, GlideError> {
    if value.is_empty() {
        Err(GlideError::Configuration(message.to_string()))
    } else {
        Ok(value)
    }
}
