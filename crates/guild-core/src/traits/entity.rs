//! Entity construction from raw payloads

use crate::error::DomainResult;
use crate::raw::RawAttributes;

/// Where a raw payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// Received from the remote service; reflects persisted state
    #[default]
    Network,
    /// Built locally (snapshots, stand-ins, transient objects)
    Local,
}

impl Origin {
    #[inline]
    pub fn is_network(self) -> bool {
        matches!(self, Self::Network)
    }
}

/// Build an entity from a raw payload.
///
/// Entities that do not track provenance ignore `origin`.
pub trait FromRaw: Sized {
    /// Entity kind, used in logs
    const KIND: &'static str;

    fn from_raw(raw: &RawAttributes, origin: Origin) -> DomainResult<Self>;
}
