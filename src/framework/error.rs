//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself. Entity-level failures travel
//! boxed inside [`FrameworkError::EntityError`] and are recovered with
//! [`FrameworkError::downcast_entity`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Returns true when the actor behind the channel is gone for good.
    pub fn is_disconnected(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }

    /// Recovers a typed entity error, handing the original back on mismatch.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}
