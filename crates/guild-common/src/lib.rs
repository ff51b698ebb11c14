//! # guild-common
//!
//! Shared utilities: configuration and telemetry.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    ApiConfig, AppSettings, CacheConfig, ClientConfig, ConfigError, Environment, IdentityConfig,
};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
