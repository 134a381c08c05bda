//! # Resource Actor
//!
//! This crate provides the building blocks for **two-phase-commit participants** built as
//! actors. Each participant owns one kind of domain state and a staging table of
//! reservations, and answers the protocol requests (`Enlist`, `Prepare`, `Commit`,
//! `Rollback`) one message at a time.
//!
//! ## Why Actors for 2PC Participants?
//!
//! The protocol asks each participant for three properties:
//!
//! - `Prepare` must be a pure read.
//! - `Commit` must apply the staged delta and forget the reservation as one atomic step.
//! - `Rollback` must be idempotent.
//!
//! An actor gets the second property for free: a single task owns both tables and handles
//! `Commit` as one message, so no other request can interleave between "apply" and
//! "remove". The first and third are plain rules in [`ResourceActor`], written once and
//! shared by every participant.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Domain model, delta type, admission and apply rules
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing, entity store, staging table
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//!
//! ## Core Abstractions
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor, TransactionId};
//!
//! #[derive(Clone, Debug)]
//! struct Shelf { id: u32, stock: u32 }
//!
//! #[derive(Debug)] struct ShelfCreate { stock: u32 }
//! #[derive(Debug, thiserror::Error)]
//! #[error("not enough stock")]
//! struct ShelfError;
//!
//! impl ActorEntity for Shelf {
//!     type Id = u32;
//!     type Create = ShelfCreate;
//!     type Delta = u32;
//!     type Error = ShelfError;
//!
//!     fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, stock: params.stock })
//!     }
//!
//!     fn can_apply(&self, delta: &u32) -> bool {
//!         *delta <= self.stock
//!     }
//!
//!     fn apply(&mut self, delta: &u32) -> Result<(), Self::Error> {
//!         self.stock = self.stock.checked_sub(*delta).ok_or(ShelfError)?;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Shelf>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     let id = client.create(ShelfCreate { stock: 1 }).await.unwrap();
//!
//!     // A transaction asking for more than is on the shelf gets a "no" vote
//!     let tx = TransactionId::new();
//!     client.enlist(tx, id, 2).await.unwrap();
//!     assert!(!client.prepare(tx).await.unwrap());
//!     client.rollback(tx).await.unwrap();
//!     assert!(client.staged(tx).await.unwrap().is_none());
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks needed!)
//! - Multiple actors run in **parallel**, so a coordinator can fan requests out to all
//!   participants at once
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockClient`, a scripted stand-in for a participant that can
//! vote no, fail a commit, or disappear, without spawning an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod telemetry;
pub mod transaction;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use transaction::{Reservation, TransactionId};
