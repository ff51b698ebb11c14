//! Guild entity - a server, with its canonical role collection

use serde_json::Value;

use super::Role;
use crate::error::{DomainError, DomainResult};
use crate::raw::RawAttributes;
use crate::traits::{FromRaw, Origin};
use crate::value_objects::Snowflake;

/// Guild (server) entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub icon: Option<String>,
    pub owner_id: Snowflake,
    /// Roles in the guild's canonical order
    pub roles: Vec<Role>,
}

impl Guild {
    /// Create a new Guild
    pub fn new(id: Snowflake, name: impl Into<String>, owner_id: Snowflake) -> Self {
        Self {
            id,
            name: name.into(),
            icon: None,
            owner_id,
            roles: Vec::new(),
        }
    }

    /// Check if a user is the guild owner
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Find a role by ID
    pub fn role(&self, id: Snowflake) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Get the guild icon URL if set
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|hash| format!("/icons/{}/{}.png", self.id, hash))
    }
}

impl FromRaw for Guild {
    const KIND: &'static str = "guild";

    fn from_raw(raw: &RawAttributes, origin: Origin) -> DomainResult<Self> {
        let id = raw.snowflake("id").ok_or(DomainError::MissingField("guild.id"))?;

        let roles = match raw.get_present("roles") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    let raw = RawAttributes::from_value(item.clone())?;
                    Role::from_raw(&raw, origin)
                })
                .collect::<DomainResult<Vec<_>>>()?,
            Some(other) => {
                return Err(DomainError::invalid(
                    "guild.roles",
                    format!("expected an array, got {other}"),
                ))
            }
        };

        Ok(Self {
            id,
            name: raw.str("name").unwrap_or_default().to_string(),
            icon: raw.str("icon").map(String::from),
            owner_id: raw.snowflake("owner_id").unwrap_or_default(),
            roles,
        })
    }
}
