//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Raw payload errors
    // =========================================================================
    /// A timestamp field held something that is not RFC 3339.
    #[error("Invalid timestamp in `{field}`: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    // =========================================================================
    // Lookups
    // =========================================================================
    #[error("Unknown computed field: {0}")]
    UnknownField(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidField`]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Get an error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidField { .. } => "INVALID_FIELD",
            Self::UnknownField(_) => "UNKNOWN_FIELD",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error came from a malformed raw payload
    pub fn is_malformed_payload(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimestamp { .. } | Self::MissingField(_) | Self::InvalidField { .. }
        )
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
