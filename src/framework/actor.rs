//! # Generic Actor Server
//!
//! [`ResourceActor`] owns the entity store for one resource type and processes
//! messages strictly one at a time, which is what makes every operation atomic
//! with respect to every other one.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`)
/// and the receiver end of the channel. No `Mutex` guards the store: the run
/// loop is the only code that ever touches it.
///
/// The store remembers insertion order so that `List` is stable for display.
///
/// # Operations
///
/// * **Create**: builds the entity, rejects a duplicate id, runs `on_create`, inserts.
/// * **Get** / **List**: clone snapshots.
/// * **Update** / **Action**: run the hook on a draft copy; commit on success only.
/// * **Delete**: runs `on_delete` (which may veto), then removes and returns the snapshot.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Table" instead of "billiard_ledger::model::table::Table"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let mut item = match T::from_create_params(params, &context) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    let id = item.id();
                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Duplicate id");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, %id, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), item);
                    self.order.push(id.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self
                        .order
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(mut draft) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    match draft.on_update(update, &context).await {
                        Ok(()) => {
                            self.store.insert(id.clone(), draft.clone());
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(draft));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(mut draft) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = draft.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    self.order.retain(|existing| existing != &id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(draft));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(mut draft) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    match draft.handle_action(action, &context).await {
                        Ok(result) => {
                            self.store.insert(id.clone(), draft);
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
