//! # guild-client
//!
//! The guild member overlay: a raw attribute store with computed fields,
//! relationship resolution through shared repositories, presence merges that
//! hand back the previous state, and the remote mutations a member supports.

pub mod cache;
pub mod context;
pub mod error;
pub mod gateway;
pub mod member;
pub mod relations;
pub mod rest;


// Re-export commonly used types at crate root
pub use cache::EntityRegistry;
pub use context::ClientContext;
pub use error::{ClientError, ClientResult};
pub use gateway::{MemberUpdateEvent, PartialUser, PresenceUpdateEvent};
pub use member::{Member, PremiumSince, COMPUTED_FIELDS};
pub use relations::Relations;
pub use rest::{HttpTransport, Method, RestTransport, Route, TransportError, TransportResult};
