//! # Table Actor
//!
//! The table registry and the session ledger. One actor owns every [`Table`];
//! registry operations (add, remove, list) map to the generic CRUD requests
//! and session operations to [`TableAction`]s.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Table`]
//! - [`session`] - the status state machine as plain mutations
//! - [`error`] - [`TableError`]
//! - [`actions`] - [`TableAction`] and [`TableActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor runs with a [`LedgerContext`]: configuration, the clock, the
//! event bus, and a [`CatalogClient`] for selling catalog products.
//!
//! ```rust,ignore
//! let (actor, generic_client) = table_actor::new();
//! let ctx = LedgerContext::new(config, Arc::new(SystemClock), events, catalog_client);
//! tokio::spawn(actor.run(ctx));
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod session;

pub use actions::*;
pub use error::*;
pub use session::Transition;

use crate::clients::CatalogClient;
use crate::clock::SharedClock;
use crate::config::LedgerConfig;
use crate::events::EventBus;
use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Table;

/// Runtime dependencies injected into the table actor.
#[derive(Clone)]
pub struct LedgerContext {
    pub config: LedgerConfig,
    pub clock: SharedClock,
    pub events: EventBus,
    pub catalog: CatalogClient,
}

impl LedgerContext {
    pub fn new(config: LedgerConfig, clock: SharedClock, events: EventBus, catalog: CatalogClient) -> Self {
        Self {
            config,
            clock,
            events,
            catalog,
        }
    }
}

/// Creates a new table actor and its client.
pub fn new() -> (ResourceActor<Table>, ResourceClient<Table>) {
    ResourceActor::new(32)
}
