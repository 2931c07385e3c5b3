//! # Generic Messages
//!
//! The request envelope exchanged between [`ResourceClient`](crate::framework::ResourceClient)
//! and [`ResourceActor`](crate::framework::ResourceActor).

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map onto the resource lifecycle:
///
/// - **Create**: inserts a new entity under its caller-assigned id.
/// - **Get** / **List**: snapshots of one entity or of all of them in insertion order.
/// - **Update**: state mutation through [`ActorEntity::Update`].
/// - **Delete**: removal, returning the last snapshot.
/// - **Action**: a custom [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
