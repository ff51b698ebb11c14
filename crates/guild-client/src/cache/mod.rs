//! Local entity caches

mod registry;

pub use registry::EntityRegistry;
