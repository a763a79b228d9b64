//! HTTP transport port
//!
//! Every outbound call of the SDK (OAuth and domain APIs) goes through
//! [`Transport`]. Infrastructure provides the reqwest implementation; tests
//! script responses with an in-memory one.

use async_trait::async_trait;
use glide_common::auth::encode_form;
use glide_domain::TransportError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One outbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: None }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Form-encoded body; pairs keep their order.
    #[must_use]
    pub fn form(self, pairs: &[(&str, &str)]) -> Self {
        let mut request = self.header(CONTENT_TYPE, FORM_URLENCODED);
        request.body = Some(encode_form(pairs));
        request
    }

    /// JSON body.
    ///
    /// # Errors
    /// Returns `TransportError::InvalidRequest` if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, TransportError> {
        let encoded =
            serde_json::to_string(body).map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let mut request = self.header(CONTENT_TYPE, APPLICATION_JSON);
        request.body = Some(encoded);
        Ok(request)
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Successful (status < 400) HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// # Errors
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Port trait for executing HTTP requests
///
/// Implementations must map any status `>= 400` to
/// [`TransportError::Status`] with the raw body, and connection-level
/// failures to [`TransportError::Network`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn form_sets_content_type_and_body() {
        let request = HttpRequest::post("https://auth/oauth2/token")
            .header(AUTHORIZATION, "Basic abc")
            .form(&[("grant_type", "client_credentials"), ("scope", "magic-auth")]);

        assert_eq!(request.header_value("content-type"), Some(FORM_URLENCODED));
        assert_eq!(request.header_value("authorization"), Some("Basic abc"));
        assert_eq!(request.body.as_deref(), Some("grant_type=client_credentials&scope=magic-auth"));
    }

    #[test]
    fn json_body() {
        let request = HttpRequest::post("https://api/x").json(&json!({"phoneNumber": "+1"})).unwrap();
        assert_eq!(request.header_value(CONTENT_TYPE), Some(APPLICATION_JSON));
        assert_eq!(request.body.as_deref(), Some(r#"{"phoneNumber":"+1"}"#));
        assert_eq!(request.method.as_str(), "POST");
    }
}
