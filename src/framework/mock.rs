//! # Mock Clients
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of scripted expectations instead of a running actor.
//! Use it to test a client wrapper, or an actor whose context depends on
//! another actor, without spawning that dependency.
//!
//! ```rust,ignore
//! let mut catalog = MockClient::<Product>::new();
//! catalog
//!     .expect_action(ProductSku::new("beer"))
//!     .return_ok(ProductActionResult::ReserveStock(beer));
//!
//! let ctx = LedgerContext::new(config, clock, events, CatalogClient::new(catalog.client()));
//! // ... drive the real table actor ...
//! catalog.verify();
//! ```
//!
//! Requests are matched strictly in order. A request of the wrong kind, or for
//! a different id than expected, panics the mock task and the caller sees
//! [`FrameworkError::ActorDropped`].

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn check_id<Id: PartialEq + std::fmt::Debug>(expected: &Id, got: &Id) {
    if expected != got {
        panic!("Mock expected a request for {expected:?}, got {got:?}");
    }
}

fn kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::List { .. } => "List",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Delete { .. } => "Delete",
        ResourceRequest::Action { .. } => "Action",
    }
}

/// A mock client with expectation tracking.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        check_id(&want, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        check_id(&want, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        check_id(&want, &id);
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected {} request or expectation mismatch", kind(&request));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> Expect<T, Option<T>> {
        self.expect(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> Expect<T, T::Id> {
        self.expect(|response| Expectation::Create { response })
    }

    pub fn expect_list(&mut self) -> Expect<T, Vec<T>> {
        self.expect(|response| Expectation::List { response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Expect<T, T> {
        self.expect(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> Expect<T, T::ActionResult> {
        self.expect(move |response| Expectation::Action { id, response })
    }

    fn expect<R: 'static>(
        &mut self,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Expect<T, R> {
        Expect {
            queue: self.expectations.clone(),
            build: Box::new(build),
        }
    }

    /// Panics unless every scripted expectation was consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Pending expectation; finish it with [`Expect::return_ok`] or [`Expect::return_err`].
pub struct Expect<T: ActorEntity, R> {
    queue: Queue<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> Expect<T, R> {
    pub fn return_ok(self, value: R) {
        lock(&self.queue).push_back((self.build)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.queue).push_back((self.build)(Err(error)));
    }
}

/// Creates a client plus the raw receiver, for tests that answer requests by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and unpacks it if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: u32,
        value: u32,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("counter error")]
    struct CounterError;

    #[async_trait]
    impl ActorEntity for Counter {
        type Id = u32;
        type Create = u32;
        type Update = ();
        type Action = u32;
        type ActionResult = u32;
        type Context = ();
        type Error = CounterError;

        fn id(&self) -> u32 {
            self.id
        }

        fn from_create_params(id: u32, _: &()) -> Result<Self, CounterError> {
            Ok(Self { id, value: 0 })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), CounterError> {
            Ok(())
        }

        async fn handle_action(&mut self, by: u32, _: &()) -> Result<u32, CounterError> {
            self.value += by;
            Ok(self.value)
        }
    }

    #[tokio::test]
    async fn scripted_responses_are_returned_in_order() {
        let mut mock = MockClient::<Counter>::new();
        mock.expect_create().return_ok(3);
        mock.expect_action(3).return_ok(10);
        mock.expect_get(3).return_err(FrameworkError::ActorClosed);

        let client = mock.client();
        assert_eq!(client.create(3).await.unwrap(), 3);
        assert_eq!(client.perform_action(3, 10).await.unwrap(), 10);
        assert!(matches!(client.get(3).await, Err(FrameworkError::ActorClosed)));

        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_request_drops_the_responder() {
        let mut mock = MockClient::<Counter>::new();
        mock.expect_list().return_ok(vec![]);

        let result = mock.client().get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    async fn raw_receiver_exposes_action_payload() {
        let (client, mut receiver) = create_mock_client::<Counter>(4);
        let task = tokio::spawn(async move { client.perform_action(1, 5).await });

        let (id, by, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!((id, by), (1, 5));
        responder.send(Ok(5)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 5);
    }
}
