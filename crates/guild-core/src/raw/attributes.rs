//! Raw attribute store - last-known field values as received from the network

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::timestamp::parse_timestamp;
use crate::error::{DomainError, DomainResult};
use crate::value_objects::Snowflake;

/// Field name to raw JSON value mapping.
///
/// The store performs no validation. Cloning is a deep, structural copy:
/// a clone never observes later writes to the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAttributes(Map<String, Value>);

impl RawAttributes {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a store from a JSON value, which must be an object
    pub fn from_value(value: Value) -> DomainResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::invalid(
                "raw",
                format!("expected an object, got {other}"),
            )),
        }
    }

    /// Merge `patch` into the store.
    ///
    /// Keys present in `patch` overwrite (including explicit `null`);
    /// keys absent from `patch` are left untouched.
    pub fn merge(&mut self, patch: RawAttributes) {
        for (key, value) in patch.0 {
            self.0.insert(key, value);
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value unless it is absent or `null`
    #[inline]
    pub fn get_present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep only the listed keys
    #[must_use]
    pub fn project(&self, keys: &[&str]) -> Self {
        keys.iter()
            .filter_map(|k| self.0.get(*k).map(|v| ((*k).to_string(), v.clone())))
            .collect()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    // =========================================================================
    // Typed reads
    // =========================================================================

    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    pub fn i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    pub fn snowflake(&self, key: &str) -> Option<Snowflake> {
        self.0.get(key).and_then(Snowflake::from_value)
    }

    /// Copy of a nested object
    pub fn object(&self, key: &str) -> Option<RawAttributes> {
        match self.0.get(key) {
            Some(Value::Object(map)) => Some(Self(map.clone())),
            _ => None,
        }
    }

    /// Read a sequence of snowflakes; absent or `null` reads as empty
    pub fn snowflakes(&self, key: &'static str) -> DomainResult<Vec<Snowflake>> {
        match self.get_present(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| {
                    Snowflake::from_value(v)
                        .ok_or_else(|| DomainError::invalid(key, format!("bad snowflake {v}")))
                })
                .collect(),
            Some(other) => Err(DomainError::invalid(
                key,
                format!("expected an array, got {other}"),
            )),
        }
    }

    /// Read an optional timestamp.
    ///
    /// Absent or `null` is `Ok(None)`; anything unparsable is an error.
    pub fn timestamp(&self, key: &'static str) -> DomainResult<Option<DateTime<Utc>>> {
        match self.get_present(key) {
            None => Ok(None),
            Some(Value::String(s)) => parse_timestamp(key, s).map(Some),
            Some(other) => Err(DomainError::InvalidTimestamp {
                field: key,
                value: other.to_string(),
            }),
        }
    }
}

impl From<Map<String, Value>> for RawAttributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<RawAttributes> for Value {
    fn from(raw: RawAttributes) -> Self {
        raw.into_value()
    }
}

impl FromIterator<(String, Value)> for RawAttributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
