//! Activity - what a user is currently doing (game, stream, custom status)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::raw::RawAttributes;
use crate::traits::{FromRaw, Origin};

/// Activity type as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ActivityType {
    #[default]
    Playing,
    Streaming,
    Listening,
    Watching,
    Custom,
    Competing,
    Unknown(u8),
}

impl From<u8> for ActivityType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Playing,
            1 => Self::Streaming,
            2 => Self::Listening,
            3 => Self::Watching,
            4 => Self::Custom,
            5 => Self::Competing,
            other => Self::Unknown(other),
        }
    }
}

impl From<ActivityType> for u8 {
    fn from(kind: ActivityType) -> Self {
        match kind {
            ActivityType::Playing => 0,
            ActivityType::Streaming => 1,
            ActivityType::Listening => 2,
            ActivityType::Watching => 3,
            ActivityType::Custom => 4,
            ActivityType::Competing => 5,
            ActivityType::Unknown(other) => other,
        }
    }
}

/// A single activity. `Activity::default()` is the empty activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Activity {
    /// Check if this is the empty activity (nothing is being done)
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build an activity from a raw value; absent or `null` is the empty activity
    pub fn from_value(field: &'static str, value: Option<&Value>) -> DomainResult<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| DomainError::invalid(field, e.to_string())),
        }
    }

    /// Read the single activity stored under `field`
    pub fn read(raw: &RawAttributes, field: &'static str) -> DomainResult<Self> {
        Self::from_value(field, raw.get(field))
    }

    /// Read the activity sequence stored under `field`, element by element
    pub fn read_all(raw: &RawAttributes, field: &'static str) -> DomainResult<Vec<Self>> {
        match raw.get_present(field) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| Self::from_value(field, Some(item)))
                .collect(),
            Some(other) => Err(DomainError::invalid(
                field,
                format!("expected an array, got {other}"),
            )),
        }
    }

    /// Raw JSON form of the activity
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl FromRaw for Activity {
    const KIND: &'static str = "activity";

    fn from_raw(raw: &RawAttributes, _origin: Origin) -> DomainResult<Self> {
        serde_json::from_value(raw.clone().into_value())
            .map_err(|e| DomainError::invalid("activity", e.to_string()))
    }
}
