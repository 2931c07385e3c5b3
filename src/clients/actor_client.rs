//! # ActorClient Trait
//!
//! Common interface for resource-specific clients, adding default `get`,
//! `list` and `delete` methods built on top of a generic `ResourceClient`.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard CRUD operations.
///
/// Implementors only say how to reach the actor and how to turn a
/// [`FrameworkError`] into their own error type.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map a framework error for a request about `id` to the resource error type.
    ///
    /// Implementations should recover their own entity errors with
    /// [`FrameworkError::downcast_entity`].
    fn map_error(id: &T::Id, e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .get(id.clone())
            .await
            .map_err(|e| Self::map_error(&id, e))
    }

    /// All entities, in insertion order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .list()
            .await
            .map_err(|e| Self::Error::from(e.to_string()))
    }

    /// Delete an entity by ID, returning its last state.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .delete(id.clone())
            .await
            .map_err(|e| Self::map_error(&id, e))
    }
}
