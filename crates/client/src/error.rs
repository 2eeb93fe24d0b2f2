//! Client error type.

use thiserror::Error;
use warband_shared::ErrorResponse;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {}", body.error)]
    Status { status: u16, body: ErrorResponse },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The client could not be built or a request could not be formed.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    #[error("Giving up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<ClientError> },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::RetriesExhausted { last, .. } => last.status(),
            _ => None,
        }
    }

    /// Server-side validation errors carried by a 400 response.
    pub fn validation_errors(&self) -> &[warband_domain::ValidationError] {
        match self {
            Self::Status { body, .. } => &body.errors,
            Self::RetriesExhausted { last, .. } => last.validation_errors(),
            _ => &[],
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else if e.is_builder() {
            Self::Config(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}
