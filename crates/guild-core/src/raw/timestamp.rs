//! Timestamp parsing for raw payload fields

use chrono::{DateTime, Utc};

use crate::error::{DomainError, DomainResult};

/// Parse an RFC 3339 timestamp such as `2015-04-26T06:26:56.936000+00:00`
pub fn parse_timestamp(field: &'static str, value: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DomainError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}
