//! Client error types
//!
//! Provides a unified error type for member operations.

use std::fmt;

use guild_core::DomainError;

use crate::rest::TransportError;

/// Client error type
#[derive(Debug)]
pub enum ClientError {
    /// The remote service rejected a confirmed mutation, or the exchange failed
    Transport(TransportError),

    /// A payload violated a domain rule
    Domain(DomainError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{e}"),
            Self::Domain(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Domain(e) => Some(e),
        }
    }
}

impl ClientError {
    /// Check if the remote service answered with a rejection
    pub fn is_remote_rejection(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Status { .. }))
    }

    /// The transport error, if this came from the transport
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Domain(_) => None,
        }
    }

    /// Get the error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(e) => e.code(),
            Self::Domain(e) => e.code(),
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
