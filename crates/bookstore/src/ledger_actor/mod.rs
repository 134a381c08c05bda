//! # Ledger Actor
//!
//! This module implements the money ledger participant: a [`ResourceActor`] over
//! [`Account`] entities whose transactions stage a debit.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Account`]
//! - [`error`] - [`LedgerError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Protocol Rules
//!
//! - **Prepare** votes yes iff the staged amount is finite, non-negative and covered by the
//!   balance.
//! - **Commit** subtracts the amount. A commit that would overdraw (because another
//!   transaction committed first) is refused and leaves the balance untouched.
//!
//! ## Usage
//!
//! ```rust
//! use bookstore::ledger_actor;
//! use bookstore::model::AccountCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = ledger_actor::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let params = AccountCreate {
//!         name: "Dijana".to_string(),
//!         balance: 1000.0,
//!     };
//!     let id = client.create_account(params).await?;
//!     assert_eq!(id.to_string(), "client1");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::LedgerClient;
use crate::model::Account;
use resource_actor::ResourceActor;

/// Creates a new Ledger actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Account>, LedgerClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, LedgerClient::new(generic_client))
}
