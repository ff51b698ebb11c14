//! Role entity - a guild role, and the reference a member holds to one

use crate::error::{DomainError, DomainResult};
use crate::raw::RawAttributes;
use crate::traits::{FromRaw, Origin};
use crate::value_objects::Snowflake;

/// Role entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    pub color: u32,
    pub hoist: bool,
    pub position: i64,
    /// Permission bitfield, kept as the decimal string the wire carries
    pub permissions: String,
    pub managed: bool,
    pub mentionable: bool,
}

impl Role {
    /// Create a new Role
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: 0,
            hoist: false,
            position: 0,
            permissions: "0".to_string(),
            managed: false,
            mentionable: false,
        }
    }

    /// Compare role positions for hierarchy (higher position = more authority)
    #[inline]
    pub fn is_higher_than(&self, other: &Role) -> bool {
        self.position > other.position
    }

    /// Get the color as a hex string (without #)
    pub fn color_hex(&self) -> String {
        format!("{:06x}", self.color)
    }
}

impl FromRaw for Role {
    const KIND: &'static str = "role";

    fn from_raw(raw: &RawAttributes, _origin: Origin) -> DomainResult<Self> {
        let id = raw.snowflake("id").ok_or(DomainError::MissingField("role.id"))?;
        let permissions = match raw.get_present("permissions") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => "0".to_string(),
        };

        Ok(Self {
            id,
            name: raw.str("name").unwrap_or_default().to_string(),
            color: raw
                .i64("color")
                .and_then(|c| u32::try_from(c).ok())
                .unwrap_or(0),
            hoist: raw.bool("hoist").unwrap_or(false),
            position: raw.i64("position").unwrap_or(0),
            permissions,
            managed: raw.bool("managed").unwrap_or(false),
            mentionable: raw.bool("mentionable").unwrap_or(false),
        })
    }
}

impl From<&Role> for Snowflake {
    fn from(role: &Role) -> Self {
        role.id
    }
}

/// A member's view of one of its roles.
///
/// `Unresolved` is the degraded-data path: the owning guild is not cached, so
/// only the id stored on the member is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRef {
    Resolved(Role),
    Unresolved(Snowflake),
}

impl RoleRef {
    pub fn id(&self) -> Snowflake {
        match self {
            Self::Resolved(role) => role.id,
            Self::Unresolved(id) => *id,
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn as_role(&self) -> Option<&Role> {
        match self {
            Self::Resolved(role) => Some(role),
            Self::Unresolved(_) => None,
        }
    }

    /// Role name, if resolved
    pub fn name(&self) -> Option<&str> {
        self.as_role().map(|r| r.name.as_str())
    }
}
