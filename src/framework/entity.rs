//! # ActorEntity Trait
//!
//! The contract every resource (tables, catalog products) implements to be
//! managed by the generic [`ResourceActor`](crate::framework::ResourceActor).
//!
//! Identities are caller-assigned: the entity reports its own id via
//! [`ActorEntity::id`], and the actor refuses a second entity with the same id.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are async so they may call other actors through clients carried in
/// the `Context`. The context is injected at `run()` time, not at construction.
///
/// # Transactional hooks
/// `on_update` and `handle_action` run against a draft copy of the entity.
/// The actor commits the draft only when the hook returns `Ok`, so a hook may
/// fail halfway through without leaving a partial mutation behind.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique, caller-assigned identifier.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// One error enum for the whole actor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identity this entity is stored under.
    fn id(&self) -> Self::Id;

    /// Construct the entity from its creation payload.
    fn from_create_params(params: Self::Create, ctx: &Self::Context) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction, before the entity is inserted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called before the entity is removed. Returning an error vetoes removal.
    async fn on_delete(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
