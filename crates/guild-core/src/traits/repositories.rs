//! Repository traits (ports) - shared entity caches
//!
//! These are read-only from the member's point of view: it looks entities up
//! and never writes into them. Implementations are mutated externally (by the
//! gateway/collection layer) and must tolerate concurrent reads.

use std::sync::Arc;

use crate::entities::{Guild, User};
use crate::value_objects::Snowflake;

// ============================================================================
// User Repository
// ============================================================================

pub trait UserRepository: Send + Sync {
    /// Find a cached user by ID
    fn get(&self, id: Snowflake) -> Option<Arc<User>>;
}

// ============================================================================
// Guild Repository
// ============================================================================

pub trait GuildRepository: Send + Sync {
    /// Find a cached guild by ID
    fn get(&self, id: Snowflake) -> Option<Arc<Guild>>;
}
