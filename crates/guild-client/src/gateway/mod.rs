//! Gateway dispatch payloads

mod payloads;

pub use payloads::{MemberUpdateEvent, PartialUser, PresenceUpdateEvent};
