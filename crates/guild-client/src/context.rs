//! Client context - dependency container shared by every member
//!
//! Holds the transport, the relationship resolver, and the acting identity.

use std::sync::Arc;

use guild_common::ClientConfig;
use guild_core::Snowflake;

use crate::cache::EntityRegistry;
use crate::error::ClientResult;
use crate::relations::Relations;
use crate::rest::{HttpTransport, RestTransport};

/// Client context containing all dependencies
#[derive(Clone)]
pub struct ClientContext {
    transport: Arc<dyn RestTransport>,
    relations: Relations,
    /// The identity requests are made as
    self_id: Snowflake,
    materialize_activity_defaults: bool,
}

impl ClientContext {
    pub fn new(self_id: Snowflake, transport: Arc<dyn RestTransport>, relations: Relations) -> Self {
        Self {
            transport,
            relations,
            self_id,
            materialize_activity_defaults: false,
        }
    }

    /// Write the empty `game`/`activities` default into the raw store on first read
    #[must_use]
    pub fn with_materialized_activity_defaults(mut self, enabled: bool) -> Self {
        self.materialize_activity_defaults = enabled;
        self
    }

    /// Build a context from configuration and an existing transport
    pub fn from_config(
        config: &ClientConfig,
        transport: Arc<dyn RestTransport>,
        relations: Relations,
    ) -> Self {
        Self::new(config.identity.self_id, transport, relations)
            .with_materialized_activity_defaults(config.cache.materialize_activity_defaults)
    }

    /// Build a context backed by the HTTP transport and a shared registry
    pub fn connect(config: &ClientConfig, registry: &Arc<EntityRegistry>) -> ClientResult<Arc<Self>> {
        let transport = HttpTransport::new(&config.api)?;
        Ok(Arc::new(Self::from_config(
            config,
            Arc::new(transport),
            Relations::from_registry(registry),
        )))
    }

    // Accessors

    pub fn transport(&self) -> &dyn RestTransport {
        self.transport.as_ref()
    }

    pub fn relations(&self) -> &Relations {
        &self.relations
    }

    pub fn self_id(&self) -> Snowflake {
        self.self_id
    }

    pub fn materialize_activity_defaults(&self) -> bool {
        self.materialize_activity_defaults
    }
}
