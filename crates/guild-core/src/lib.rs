//! # guild-core
//!
//! Domain layer: the raw attribute store, the entities a guild member relates
//! to, the entity constructor, and the repository ports used to resolve them.
//! This crate has no dependency on transport or runtime.

pub mod entities;
pub mod error;
pub mod raw;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Activity, ActivityType, Ban, ClientStatus, Guild, Presence, Role, RoleRef, User, UserStatus,
};
pub use error::{DomainError, DomainResult};
pub use raw::{parse_timestamp, RawAttributes};
pub use traits::{FromRaw, GuildRepository, Origin, UserRepository};
pub use value_objects::{Snowflake, SnowflakeParseError};
