//! Conversions from external infrastructure errors into port errors.

use glide_domain::TransportError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the port error.
#[derive(Debug)]
pub struct InfraError(pub TransportError);

impl From<InfraError> for TransportError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TransportError> for InfraError {
    fn from(value: TransportError) -> Self {
        InfraError(value)
    }
}

trait IntoTransportError {
    fn into_transport(self) -> TransportError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

impl IntoTransportError for HttpError {
    fn into_transport(self) -> TransportError {
        if self.is_timeout() {
            return TransportError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return TransportError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return TransportError::InvalidRequest(self.to_string());
        }

        if let Some(status) = self.status() {
            return TransportError::Status {
                status: status.as_u16(),
                body: status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
        }

        TransportError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_transport())
    }
}
