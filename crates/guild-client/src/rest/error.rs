//! Transport error types

/// Transport failure, returned unmodified from every confirmed mutation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The service answered with a non-success status
    #[error("Remote rejected request ({status}): {message}")]
    Status { status: u16, message: String },

    /// The request never completed
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Status { .. } => "REMOTE_REJECTED",
            Self::Request(_) => "REQUEST_FAILED",
            Self::Decode(_) => "DECODE_ERROR",
        }
    }

    /// HTTP status, when the service answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for transport calls
pub type TransportResult<T> = Result<T, TransportError>;
