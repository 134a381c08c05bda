//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every resource (Account, InventoryItem, …)
//! must implement to be managed by the generic `ResourceActor`. Besides the usual identity and
//! creation DTO, an entity declares the **delta** that a transaction can stage against it and
//! the two rules the two-phase protocol needs:
//!
//! - [`ActorEntity::can_apply`]: the read-only admission check used when voting in `Prepare`.
//! - [`ActorEntity::apply`]: the mutation performed at `Commit`.
//!
//! # Architecture Note
//! By defining a contract that both resource types must satisfy, the reservation table,
//! the vote, the commit and the rollback are written *once* in `ResourceActor` and reused by
//! the ledger and the inventory. The participants only differ in their entity and delta types.
//!
//! We use "Associated Types" (type Id, type Delta, etc.) to enforce type safety.
//! An `Account` accepts a money amount, an `InventoryItem` accepts a unit count, and the
//! compiler prevents staging one against the other.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The mutation a transaction stages against one entity (an amount, a quantity, …).
    type Delta: Clone + Send + Sync + Debug;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum per actor rather than one per operation. Clients deal with a single
    /// `LedgerError` or `InventoryError`, which keeps pattern matching simple at the cost of
    /// some precision about which operation can produce which variant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether `delta` could be applied to the current state without violating the
    /// entity's invariants. Must not mutate anything.
    fn can_apply(&self, delta: &Self::Delta) -> bool;

    /// Apply `delta`. Implementations must leave `self` untouched when they return an error.
    fn apply(&mut self, delta: &Self::Delta) -> Result<(), Self::Error>;
}
