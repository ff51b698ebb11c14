//! User entity - a global account, shared across guilds

use crate::error::{DomainError, DomainResult};
use crate::raw::RawAttributes;
use crate::traits::{FromRaw, Origin};
use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub discriminator: String,
    pub global_name: Option<String>,
    pub avatar: Option<String>,
    pub bot: bool,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: impl Into<String>, discriminator: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            discriminator: discriminator.into(),
            global_name: None,
            avatar: None,
            bot: false,
        }
    }

    /// Stand-in for a user known only by id, with an empty username
    pub fn stand_in(id: Snowflake) -> Self {
        Self::new(id, "", "0")
    }

    #[inline]
    pub fn is_stand_in(&self) -> bool {
        self.username.is_empty()
    }

    /// Get the full tag: username#discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }

    /// Get avatar URL or default avatar URL
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => format!("/avatars/{}/{}.png", self.id, hash),
            None => format!("/embed/avatars/{}.png", self.default_avatar_index()),
        }
    }

    /// Default avatar index (0-4) based on discriminator
    fn default_avatar_index(&self) -> u8 {
        (self.discriminator.parse::<u16>().unwrap_or(0) % 5) as u8
    }

    #[inline]
    pub fn is_bot(&self) -> bool {
        self.bot
    }
}

impl FromRaw for User {
    const KIND: &'static str = "user";

    fn from_raw(raw: &RawAttributes, _origin: Origin) -> DomainResult<Self> {
        let id = raw.snowflake("id").ok_or(DomainError::MissingField("user.id"))?;
        let username = raw
            .str("username")
            .ok_or(DomainError::MissingField("user.username"))?;

        Ok(Self {
            id,
            username: username.to_string(),
            discriminator: raw.str("discriminator").unwrap_or("0").to_string(),
            global_name: raw.str("global_name").map(String::from),
            avatar: raw.str("avatar").map(String::from),
            bot: raw.bool("bot").unwrap_or(false),
        })
    }
}
