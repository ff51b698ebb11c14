//! In-memory entity registry
//!
//! Shared, externally-mutated cache of users and guilds keyed by id. Members
//! only ever read from it.

use std::sync::Arc;

use dashmap::DashMap;
use guild_core::{Guild, GuildRepository, Snowflake, User, UserRepository};

/// Concurrent id-keyed store of users and guilds
#[derive(Debug, Default)]
pub struct EntityRegistry {
    users: DashMap<Snowflake, Arc<User>>,
    guilds: DashMap<Snowflake, Arc<Guild>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry wrapped in an `Arc`
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Insert or replace a user, returning the cached handle
    pub fn insert_user(&self, user: User) -> Arc<User> {
        let user = Arc::new(user);
        self.users.insert(user.id, Arc::clone(&user));
        user
    }

    /// Insert or replace a guild, returning the cached handle
    pub fn insert_guild(&self, guild: Guild) -> Arc<Guild> {
        let guild = Arc::new(guild);
        self.guilds.insert(guild.id, Arc::clone(&guild));
        guild
    }

    pub fn remove_user(&self, id: Snowflake) -> Option<Arc<User>> {
        self.users.remove(&id).map(|(_, user)| user)
    }

    pub fn remove_guild(&self, id: Snowflake) -> Option<Arc<Guild>> {
        self.guilds.remove(&id).map(|(_, guild)| guild)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }
}

impl UserRepository for EntityRegistry {
    fn get(&self, id: Snowflake) -> Option<Arc<User>> {
        self.users.get(&id).map(|entry| Arc::clone(entry.value()))
    }
}

impl GuildRepository for EntityRegistry {
    fn get(&self, id: Snowflake) -> Option<Arc<Guild>> {
        self.guilds.get(&id).map(|entry| Arc::clone(entry.value()))
    }
}
