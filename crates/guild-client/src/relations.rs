//! Relationship resolver
//!
//! Resolves a member's user, guild and roles through the shared repositories.
//! Misses never fail: they degrade to stand-ins built from what the member
//! itself carries.

use std::sync::Arc;

use guild_core::{
    DomainError, FromRaw, Guild, GuildRepository, Origin, RawAttributes, RoleRef,
    Snowflake, User, UserRepository,
};
use serde_json::Value;
use tracing::debug;

use crate::cache::EntityRegistry;

/// Read-only handles to the user and guild repositories
#[derive(Clone)]
pub struct Relations {
    users: Arc<dyn UserRepository>,
    guilds: Arc<dyn GuildRepository>,
}

impl Relations {
    pub fn new(users: Arc<dyn UserRepository>, guilds: Arc<dyn GuildRepository>) -> Self {
        Self { users, guilds }
    }

    /// Resolve both relationships through one registry
    pub fn from_registry(registry: &Arc<EntityRegistry>) -> Self {
        Self {
            users: Arc::clone(registry) as Arc<dyn UserRepository>,
            guilds: Arc::clone(registry) as Arc<dyn GuildRepository>,
        }
    }

    /// Look up a guild; `None` when it is not cached
    pub fn guild(&self, id: Snowflake) -> Option<Arc<Guild>> {
        let guild = self.guilds.get(id);
        if guild.is_none() {
            debug!(kind = Guild::KIND, id = %id, "Relationship miss");
        }
        guild
    }

    /// Look up a user, falling back to the embedded payload.
    ///
    /// The fallback is a transient value: it is never inserted into the
    /// repository, and two misses yield two distinct allocations. A payload
    /// too partial to build a user from (an id alone, as presence updates
    /// carry) degrades to `User::stand_in`.
    pub fn user(&self, id: Snowflake, embedded: Option<&Value>) -> Arc<User> {
        if let Some(user) = self.users.get(id) {
            return user;
        }

        debug!(kind = User::KIND, id = %id, "Relationship miss, using embedded payload");
        let user = embedded
            .cloned()
            .ok_or(DomainError::MissingField("user"))
            .and_then(RawAttributes::from_value)
            .and_then(|raw| User::from_raw(&raw, Origin::Network))
            .unwrap_or_else(|err| {
                debug!(kind = User::KIND, id = %id, error = %err, "Embedded user incomplete");
                User::stand_in(id)
            });
        Arc::new(user)
    }

    /// Resolve role ids against the guild's role collection.
    ///
    /// Resolved roles come back in the guild's canonical order. When the guild
    /// is not cached this is the degraded path: one `RoleRef::Unresolved` per
    /// stored id, in stored order.
    pub fn roles(&self, guild_id: Snowflake, role_ids: &[Snowflake]) -> Vec<RoleRef> {
        match self.guild(guild_id) {
            Some(guild) => guild
                .roles
                .iter()
                .filter(|role| role_ids.contains(&role.id))
                .cloned()
                .map(RoleRef::Resolved)
                .collect(),
            None => role_ids.iter().copied().map(RoleRef::Unresolved).collect(),
        }
    }
}
