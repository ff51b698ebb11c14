//! Raw attribute store and helpers for reading raw payloads

mod attributes;
mod timestamp;

pub use attributes::RawAttributes;
pub use timestamp::parse_timestamp;
