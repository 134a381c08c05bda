//! # Mock Framework & Testing Guide
//!
//! The `MockClient<T>` type hands out a real `ResourceClient<T>` whose requests are answered
//! in‑memory from a queue of expectations. It lets you script the answers a participant
//! gives (a "no" vote, a failing commit, an unreachable actor) without spawning any actors.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real reservations and entities |
//! | **Use Case** | Coordinator logic *around* a participant | Participant rules or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Strategies
//!
//! <details>
//! <summary><b>Pattern 1: Single Actor Test (Fast, Isolated)</b></summary>
//!
//! Spawn one `ResourceActor` and drive the protocol through its client. See
//! `tests/integration_test.rs` in this crate.
//! </details>
//!
//! <details>
//! <summary><b>Pattern 2: Coordinator with Mocked Participants (Sweet Spot)</b></summary>
//!
//! One participant is a real actor, the other a `MockClient` scripted to fail at a chosen
//! phase. See `tests/coordinator_mock_test.rs` in the bookstore crate.
//! </details>
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError, TransactionId};
//!
//! #[derive(Clone, Debug)] struct Counter { id: u32 }
//! #[derive(Debug)] struct CounterCreate;
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct CounterError;
//!
//! impl ActorEntity for Counter {
//!     type Id = u32; type Create = CounterCreate; type Delta = u32; type Error = CounterError;
//!     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     fn can_apply(&self, _: &u32) -> bool { true }
//!     fn apply(&mut self, _: &u32) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Counter>::new();
//!     let client = mock.client();
//!
//!     // Simulate a participant that is gone by the time we commit
//!     mock.expect_commit().return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.commit(TransactionId::new()).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and a receiver when a test needs to inspect
//! the exact request that was sent, or the fluent [`MockClient`] API to script answers.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::transaction::TransactionId;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client and the answer to give.
enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    List(Result<HashMap<T::Id, T>, FrameworkError>),
    Enlist(Result<(), FrameworkError>),
    Prepare(Result<bool, FrameworkError>),
    Commit(Result<(), FrameworkError>),
    Rollback(Result<(), FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "get",
            Expectation::List(_) => "list",
            Expectation::Enlist(_) => "enlist",
            Expectation::Prepare(_) => "prepare",
            Expectation::Commit(_) => "commit",
            Expectation::Rollback(_) => "rollback",
        }
    }
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed strictly in order. A request that does not match the next
/// expectation panics the mock task, which the caller observes as
/// [`FrameworkError::ActorDropped`].
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Account>::new();
/// mock.expect_enlist().return_ok(());
/// mock.expect_prepare().return_ok(true);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Enlist { respond_to, .. },
                        Some(Expectation::Enlist(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Prepare { respond_to, .. },
                        Some(Expectation::Prepare(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Commit { respond_to, .. },
                        Some(Expectation::Commit(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Rollback { respond_to, .. },
                        Some(Expectation::Rollback(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        panic!(
                            "Unexpected request {:?}, expected {}",
                            request,
                            expectation.map_or("nothing", |e| e.name())
                        );
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

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn expect<R>(&mut self, wrap: fn(Result<R, FrameworkError>) -> Expectation<T>) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.expect(Expectation::Get)
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, HashMap<T::Id, T>> {
        self.expect(Expectation::List)
    }

    /// Expects an `enlist` operation.
    pub fn expect_enlist(&mut self) -> ExpectationBuilder<T, ()> {
        self.expect(Expectation::Enlist)
    }

    /// Expects a `prepare` operation; the value is the vote.
    pub fn expect_prepare(&mut self) -> ExpectationBuilder<T, bool> {
        self.expect(Expectation::Prepare)
    }

    /// Expects a `commit` operation.
    pub fn expect_commit(&mut self) -> ExpectationBuilder<T, ()> {
        self.expect(Expectation::Commit)
    }

    /// Expects a `rollback` operation.
    pub fn expect_rollback(&mut self) -> ExpectationBuilder<T, ()> {
        self.expect(Expectation::Rollback)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let remaining: Vec<_> = exps.iter().map(|e| e.name()).collect();
            panic!("Not all expectations were met. Remaining: {:?}", remaining);
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Expectations<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// When the point of a test is *what* a client wrapper sends (the target id, the delta, the
/// transaction id), give it a client whose receiving end the test controls, then pull the
/// request off the channel with the helpers below and answer it by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Enlist request
pub async fn expect_enlist<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    TransactionId,
    T::Id,
    T::Delta,
    tokio::sync::oneshot::Sender<Result<(), FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Enlist {
            tx,
            id,
            delta,
            respond_to,
        }) => Some((tx, id, delta, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<tokio::sync::oneshot::Sender<Result<HashMap<T::Id, T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    tokio::sync::oneshot::Sender<Result<Option<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Wallet {
        id: u32,
        funds: u64,
    }

    #[derive(Debug)]
    struct WalletCreate {
        funds: u64,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Wallet error")]
    struct WalletError;

    impl ActorEntity for Wallet {
        type Id = u32;
        type Create = WalletCreate;
        type Delta = u64;
        type Error = WalletError;

        fn from_create_params(id: u32, params: WalletCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                funds: params.funds,
            })
        }

        fn can_apply(&self, delta: &u64) -> bool {
            *delta <= self.funds
        }

        fn apply(&mut self, delta: &u64) -> Result<(), Self::Error> {
            self.funds = self.funds.checked_sub(*delta).ok_or(WalletError)?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_mock_client_channel_helpers() {
        let (client, mut receiver) = create_mock_client::<Wallet>(10);
        let tx = TransactionId::new();

        let enlist_task = tokio::spawn(async move { client.enlist(tx, 7, 40).await });

        let (seen_tx, id, delta, responder) = expect_enlist(&mut receiver)
            .await
            .expect("Expected Enlist request");
        assert_eq!(seen_tx, tx);
        assert_eq!(id, 7);
        assert_eq!(delta, 40);
        responder.send(Ok(())).unwrap();

        assert!(enlist_task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Wallet>::new();
        let tx = TransactionId::new();

        mock.expect_enlist().return_ok(());
        mock.expect_prepare().return_ok(false);
        mock.expect_rollback().return_ok(());
        mock.expect_get().return_ok(Some(Wallet { id: 1, funds: 10 }));

        let client = mock.client();

        client.enlist(tx, 1, 50).await.unwrap();
        assert!(!client.prepare(tx).await.unwrap());
        client.rollback(tx).await.unwrap();
        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched.unwrap().funds, 10);

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_mismatch_surfaces_as_dropped() {
        let mut mock = MockClient::<Wallet>::new();
        mock.expect_prepare().return_ok(true);

        let result = mock.client().commit(TransactionId::new()).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
