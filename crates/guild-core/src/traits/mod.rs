//! Domain traits - entity construction and repository ports

mod entity;
mod repositories;

pub use entity::{FromRaw, Origin};
pub use repositories::{GuildRepository, UserRepository};
