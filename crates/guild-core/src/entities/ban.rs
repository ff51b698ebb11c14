//! Ban - a user barred from a guild

use std::sync::Arc;

use super::{Guild, User};
use crate::error::{DomainError, DomainResult};
use crate::raw::RawAttributes;
use crate::traits::{FromRaw, Origin};
use crate::value_objects::Snowflake;

/// Ban record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ban {
    pub guild_id: Snowflake,
    /// The guild, when it was cached at the time the ban was recorded
    pub guild: Option<Arc<Guild>>,
    pub user: Arc<User>,
    pub reason: Option<String>,
}

impl Ban {
    pub fn new(guild_id: Snowflake, guild: Option<Arc<Guild>>, user: Arc<User>) -> Self {
        Self {
            guild_id,
            guild,
            user,
            reason: None,
        }
    }

    #[inline]
    pub fn user_id(&self) -> Snowflake {
        self.user.id
    }
}

impl FromRaw for Ban {
    const KIND: &'static str = "ban";

    fn from_raw(raw: &RawAttributes, origin: Origin) -> DomainResult<Self> {
        let user = raw
            .object("user")
            .ok_or(DomainError::MissingField("ban.user"))?;

        Ok(Self {
            guild_id: raw
                .snowflake("guild_id")
                .ok_or(DomainError::MissingField("ban.guild_id"))?,
            guild: None,
            user: Arc::new(User::from_raw(&user, origin)?),
            reason: raw.str("reason").map(String::from),
        })
    }
}
