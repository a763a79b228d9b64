//! Shared fixtures for `glide-core` integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use glide_core::testing::{MockTransport, RecordingMetricsSink};
use glide_core::ServiceContext;
use glide_domain::{InternalSettings, Settings};
use serde_json::{json, Value};

pub const AUTH_BASE_URL: &str = "https://auth.test";
pub const API_BASE_URL: &str = "https://api.test";

pub fn settings() -> Settings {
    Settings {
        client_id: "test-client".into(),
        client_secret: "test-secret".into(),
        redirect_uri: "https://app.test/callback".into(),
        internal: InternalSettings {
            auth_base_url: AUTH_BASE_URL.into(),
            api_base_url: API_BASE_URL.into(),
            ..InternalSettings::default()
        },
        metric_report_url: String::new(),
    }
}

/// Context wired to the given doubles.
pub fn context(transport: &Arc<MockTransport>, metrics: &Arc<RecordingMetricsSink>) -> ServiceContext {
    context_with(settings(), transport, metrics)
}

pub fn context_with(
    settings: Settings,
    transport: &Arc<MockTransport>,
    metrics: &Arc<RecordingMetricsSink>,
) -> ServiceContext {
    ServiceContext::new(settings, transport.clone(), metrics.clone())
}

/// Token endpoint body granting `scope` for one hour.
pub fn token_body(access_token: &str, scope: &str) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 3600,
        "scope": scope,
    })
}

/// Parsed JSON body of a recorded request.
pub fn json_body(request: &glide_core::HttpRequest) -> Value {
    request.body.as_deref().map(|b| serde_json::from_str(b).unwrap()).unwrap_or(Value::Null)
}
