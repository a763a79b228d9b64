//! Configuration loader
//!
//! Builds default [`Settings`] from environment variables. Explicit settings
//! passed to the client are later merged over these defaults.
//!
//! ## Environment Variables
//! - `GLIDE_CLIENT_ID`: OAuth client id
//! - `GLIDE_CLIENT_SECRET`: OAuth client secret
//! - `GLIDE_REDIRECT_URI`: Redirect URI for number verification
//! - `GLIDE_AUTH_BASE_URL`: Authorization server (default
//!   `https://oidc.gateway-x.io`)
//! - `GLIDE_API_BASE_URL`: Domain API (default `https://api.gateway-x.io`)
//! - `GLIDE_LOG_LEVEL`: `debug`/`info`/`warn`/`error` or `1`..`4`
//! - `REPORT_METRIC_URL`: Usage metrics endpoint (metrics disabled when unset)
//!
//! A variable set to the empty string counts as unset.

use std::path::Path;

use glide_domain::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_AUTH_BASE_URL, ENV_API_BASE_URL, ENV_AUTH_BASE_URL, ENV_CLIENT_ID,
    ENV_CLIENT_SECRET, ENV_LOG_LEVEL, ENV_REDIRECT_URI, ENV_REPORT_METRIC_URL,
};
use glide_domain::{GlideError, InternalSettings, LogLevel, Result, Settings};

/// Load default settings from the process environment.
///
/// # Errors
/// Returns `GlideError::Configuration` if `GLIDE_LOG_LEVEL` is not a
/// recognised level.
pub fn load_settings_from_env() -> Result<Settings> {
    load_settings_with(|key| std::env::var(key).ok())
}

/// Load default settings through `lookup` instead of the process
/// environment.
///
/// # Errors
/// See [`load_settings_from_env`].
pub fn load_settings_with<F>(lookup: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let log_level = match env_var(&lookup, ENV_LOG_LEVEL) {
        Some(raw) => raw.parse::<LogLevel>()?,
        None => LogLevel::Unset,
    };

    let settings = Settings {
        client_id: env_or(&lookup, ENV_CLIENT_ID, ""),
        client_secret: env_or(&lookup, ENV_CLIENT_SECRET, ""),
        redirect_uri: env_or(&lookup, ENV_REDIRECT_URI, ""),
        internal: InternalSettings {
            auth_base_url: env_or(&lookup, ENV_AUTH_BASE_URL, DEFAULT_AUTH_BASE_URL),
            api_base_url: env_or(&lookup, ENV_API_BASE_URL, DEFAULT_API_BASE_URL),
            log_level,
        },
        metric_report_url: env_or(&lookup, ENV_REPORT_METRIC_URL, ""),
    };

    tracing::debug!(
        client_id_set = !settings.client_id.is_empty(),
        auth_base_url = %settings.internal.auth_base_url,
        api_base_url = %settings.internal.api_base_url,
        metrics_enabled = !settings.metric_report_url.is_empty(),
        "Loaded default settings from environment"
    );
    Ok(settings)
}

/// Load settings from a JSON file (`clientId`, `clientSecret`, `internal`,
/// ... in camelCase). Missing fields stay empty.
///
/// # Errors
/// Returns `GlideError::Configuration` if the file cannot be read or is not
/// valid JSON.
pub fn load_settings_from_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(GlideError::Configuration(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading settings from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| GlideError::Configuration(format!("Failed to read config file: {e}")))?;
    parse_settings(&contents)
}

fn parse_settings(contents: &str) -> Result<Settings> {
    serde_json::from_str(contents).map_err(|e| GlideError::Configuration(format!("Invalid JSON format: {e}")))
}

/// Non-empty value of `key`.
fn env_var<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.is_empty())
}

/// Value of `key`, or `default` when unset or empty.
fn env_or<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: &str) -> String {
    env_var(lookup, key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let settings = load_settings_with(lookup(&[])).unwrap();

        assert_eq!(settings.client_id, "");
        assert_eq!(settings.internal.auth_base_url, DEFAULT_AUTH_BASE_URL);
        assert_eq!(settings.internal.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.internal.log_level, LogLevel::Unset);
        assert_eq!(settings.metric_report_url, "");
    }

    #[test]
    fn reads_every_variable() {
        let settings = load_settings_with(lookup(&[
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
            (ENV_REDIRECT_URI, "https://app/cb"),
            (ENV_AUTH_BASE_URL, "https://auth.local"),
            (ENV_API_BASE_URL, "https://api.local"),
            (ENV_LOG_LEVEL, "2"),
            (ENV_REPORT_METRIC_URL, "https://metrics.local"),
        ]))
        .unwrap();

        assert_eq!(settings.client_id, "id");
        assert_eq!(settings.client_secret, "secret");
        assert_eq!(settings.redirect_uri, "https://app/cb");
        assert_eq!(settings.internal.auth_base_url, "https://auth.local");
        assert_eq!(settings.internal.api_base_url, "https://api.local");
        assert_eq!(settings.internal.log_level, LogLevel::Info);
        assert_eq!(settings.metric_report_url, "https://metrics.local");
    }

    #[test]
    fn empty_variable_counts_as_unset() {
        let settings = load_settings_with(lookup(&[(ENV_AUTH_BASE_URL, ""), (ENV_LOG_LEVEL, "")])).unwrap();
        assert_eq!(settings.internal.auth_base_url, DEFAULT_AUTH_BASE_URL);
        assert_eq!(settings.internal.log_level, LogLevel::Unset);
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let err = load_settings_with(lookup(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(matches!(err, GlideError::Configuration(_)));
    }

    #[test]
    fn parses_camel_case_json() {
        let settings = parse_settings(
            r#"{
                "clientId": "file-id",
                "clientSecret": "file-secret",
                "redirectUri": "",
                "internal": {"authBaseUrl": "https://auth.file", "apiBaseUrl": "", "logLevel": "warn"}
            }"#,
        )
        .unwrap();

        assert_eq!(settings.client_id, "file-id");
        assert_eq!(settings.internal.auth_base_url, "https://auth.file");
        assert_eq!(settings.internal.log_level, LogLevel::Warn);
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let err = load_settings_from_file(Path::new("/nonexistent/glide.json")).unwrap_err();
        assert!(matches!(err, GlideError::Configuration(msg) if msg.contains("not found")));
    }
}
