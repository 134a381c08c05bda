//! # Generic Participant Actor
//!
//! This module defines the `ResourceActor`, the component that owns one participant's state:
//! the authoritative entity store and the staging table of in-flight reservations. It
//! implements the "Server" side of the Actor Model, processing messages sequentially and
//! ensuring exclusive access to both tables.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::transaction::{Reservation, TransactionId};
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities and their staged reservations.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store` and `staged`)
/// and the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each actor processes its messages *sequentially* in a loop, so every protocol step is
/// atomic with respect to every other request hitting the same participant. In particular
/// `Commit` applies the delta and drops the reservation inside one message: there is no
/// point at which another request can observe one without the other. No `Mutex` is needed.
///
/// What the actor does **not** provide is isolation *across* transactions between `Prepare`
/// and `Commit`: a second transaction may be voted on while the first is still undecided.
/// `Commit` therefore re-checks the delta through [`ActorEntity::apply`].
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use resource_actor::{ActorEntity, ResourceActor, TransactionId};
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, value: u32 }
/// #[derive(Debug)] struct CounterCreate(u32);
/// #[derive(Debug, thiserror::Error)] #[error("underflow")] struct CounterError;
///
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Delta = u32;
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, params: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, value: params.0 })
///     }
///     fn can_apply(&self, delta: &u32) -> bool { *delta <= self.value }
///     fn apply(&mut self, delta: &u32) -> Result<(), Self::Error> {
///         self.value = self.value.checked_sub(*delta).ok_or(CounterError)?;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run());
///
///     let id = client.create(CounterCreate(5)).await.unwrap();
///     let tx = TransactionId::new();
///     client.enlist(tx, id, 3).await.unwrap();
///     assert!(client.prepare(tx).await.unwrap());
///     client.commit(tx).await.unwrap();
///     assert_eq!(client.get(id).await.unwrap().unwrap().value, 2);
/// }
/// ```
///
/// ## Operations
///
/// * **Enlist**: stores (or overwrites) the reservation for `tx`. The target is not checked
///   here; a missing target makes `Prepare` vote no.
/// * **Prepare**: `true` iff a reservation exists, its target exists and
///   [`ActorEntity::can_apply`] accepts the delta. Never mutates.
/// * **Commit**: no-op without a reservation. Otherwise applies the delta and removes the
///   reservation; if the target is gone or the entity refuses the delta, nothing changes
///   and the error is returned.
/// * **Rollback**: removes the reservation if present. Always succeeds.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    staged: HashMap<TransactionId, Reservation<T>>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            staged: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Account" instead of "bookstore::model::account::Account")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            self.next_id += 1;
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.clone()));
                }
                ResourceRequest::Enlist {
                    tx,
                    id,
                    delta,
                    respond_to,
                } => {
                    debug!(entity_type, %tx, %id, ?delta, "Enlist");
                    let previous = self.staged.insert(tx, Reservation::new(id, delta));
                    if previous.is_some() {
                        info!(entity_type, %tx, "Reservation overwritten");
                    }
                    info!(entity_type, %tx, pending = self.staged.len(), "Enlisted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Prepare { tx, respond_to } => {
                    let vote = self.vote(tx);
                    info!(entity_type, %tx, vote, "Prepared");
                    let _ = respond_to.send(Ok(vote));
                }
                ResourceRequest::Commit { tx, respond_to } => {
                    let result = self.commit(tx);
                    match &result {
                        Ok(true) => info!(entity_type, %tx, pending = self.staged.len(), "Committed"),
                        Ok(false) => warn!(entity_type, %tx, "Commit without reservation, ignoring"),
                        Err(e) => warn!(entity_type, %tx, error = %e, "Commit failed"),
                    }
                    let _ = respond_to.send(result.map(|_| ()));
                }
                ResourceRequest::Rollback { tx, respond_to } => {
                    let removed = self.staged.remove(&tx).is_some();
                    info!(entity_type, %tx, removed, pending = self.staged.len(), "Rolled back");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Staged { tx, respond_to } => {
                    let reservation = self.staged.get(&tx).cloned();
                    debug!(entity_type, %tx, found = reservation.is_some(), "Staged");
                    let _ = respond_to.send(Ok(reservation));
                }
                ResourceRequest::ExpireStaged {
                    older_than,
                    respond_to,
                } => {
                    // A cutoff before the earliest representable instant expires nothing
                    let Some(cutoff) = Utc::now().checked_sub_signed(older_than) else {
                        debug!(entity_type, %older_than, "Expiry cutoff out of range, nothing to expire");
                        let _ = respond_to.send(Ok(0));
                        continue;
                    };
                    let before = self.staged.len();
                    self.staged.retain(|tx, reservation| {
                        let stale = reservation.is_older_than(cutoff);
                        if stale {
                            warn!(entity_type, %tx, created_at = %reservation.created_at, "Expiring stale reservation");
                        }
                        !stale
                    });
                    let expired = before - self.staged.len();
                    if expired > 0 {
                        info!(entity_type, expired, pending = self.staged.len(), "Expired");
                    }
                    let _ = respond_to.send(Ok(expired));
                }
                ResourceRequest::ClearStaged { respond_to } => {
                    let cleared = self.staged.len();
                    self.staged.clear();
                    info!(entity_type, cleared, "Cleared staged reservations");
                    let _ = respond_to.send(Ok(cleared));
                }
            }
        }

        info!(
            entity_type,
            size = self.store.len(),
            pending = self.staged.len(),
            "Shutdown"
        );
    }

    fn vote(&self, tx: TransactionId) -> bool {
        let Some(reservation) = self.staged.get(&tx) else {
            return false;
        };
        match self.store.get(&reservation.target) {
            Some(item) => item.can_apply(&reservation.delta),
            None => false,
        }
    }

    /// Applies and removes the reservation for `tx` as one step.
    ///
    /// Returns `Ok(false)` when there was nothing to commit.
    fn commit(&mut self, tx: TransactionId) -> Result<bool, FrameworkError> {
        let Some(reservation) = self.staged.get(&tx) else {
            return Ok(false);
        };
        let item = self
            .store
            .get_mut(&reservation.target)
            .ok_or_else(|| FrameworkError::NotFound(reservation.target.to_string()))?;
        item.apply(&reservation.delta)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        self.staged.remove(&tx);
        Ok(true)
    }
}
