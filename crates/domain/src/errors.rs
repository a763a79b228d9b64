//! Error types used throughout the SDK

use thiserror::Error;

/// Failure reported by an HTTP transport implementation.
///
/// A response with status `>= 400` is always surfaced as
/// [`TransportError::Status`] carrying the raw payload, so callers can
/// inspect OAuth error bodies or translate 404s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// HTTP status code when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Raw response body when the server answered at all.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body.as_str()),
            Self::Network(_) | Self::InvalidRequest(_) => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Main error type for the Glide SDK
#[derive(Error, Debug)]
pub enum GlideError {
    /// A required setting (`authBaseUrl`, `apiBaseUrl`, `clientId`, ...) is
    /// missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("client credentials are required to generate a new session")]
    Credentials,

    #[error("failed to start session: backchannel authentication returned no auth_req_id")]
    SessionStartFailed,

    #[error("session is required to {0}")]
    SessionRequired(&'static str),

    #[error("{operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("failed to decode {context}: {message}")]
    Decode { context: &'static str, message: String },

    #[error("{resource} not found for {subject}")]
    NotFound { resource: &'static str, subject: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid client credentials")]
    Unauthorized,

    #[error("client does not have required scopes to access this method")]
    InvalidScope,

    #[error("invalid request")]
    InvalidRequest,

    #[error("invalid metric: {0}")]
    InvalidMetric(String),

    #[error("gave up waiting for session after {attempts} attempts: {last_error}")]
    PollExhausted { attempts: u32, last_error: Box<GlideError> },

    #[error("timed out waiting for session after {0:?}")]
    Timeout(std::time::Duration),

    #[error("operation cancelled")]
    Cancelled,
}

impl GlideError {
    /// Wrap a transport failure with the name of the failing operation.
    #[must_use]
    pub fn transport(operation: &'static str, source: TransportError) -> Self {
        Self::Transport { operation, source }
    }

    #[must_use]
    pub fn decode(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode { context, message: err.to_string() }
    }

    /// Status code of the underlying transport failure, if any.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Transport { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether trying the same call again later could succeed.
    ///
    /// Missing configuration, credentials or input never fix themselves.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::Configuration(_)
                | Self::Credentials
                | Self::InvalidInput(_)
                | Self::Unauthorized
                | Self::InvalidScope
                | Self::InvalidMetric(_)
                | Self::Cancelled
        )
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, GlideError>;
