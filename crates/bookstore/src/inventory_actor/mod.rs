//! # Inventory Actor
//!
//! This module implements the inventory participant: a [`ResourceActor`] over
//! [`InventoryItem`] entities whose transactions stage a quantity decrement.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`InventoryItem`]
//! - [`error`] - [`InventoryError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use bookstore::inventory_actor;
//! use bookstore::model::ItemCreate;
//! use bookstore::participant::Participant;
//! use resource_actor::TransactionId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = inventory_actor::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let id = client
//!         .create_item(ItemCreate {
//!             title: "Book 3".to_string(),
//!             price: 200.0,
//!             quantity: 0,
//!         })
//!         .await?;
//!
//!     // Sold out items are hidden from the catalog and cannot be reserved
//!     assert!(client.list_available_items().await?.is_empty());
//!     let tx = TransactionId::new();
//!     client.enlist_purchase(tx, id, 1).await?;
//!     assert!(!client.prepare(tx).await?);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::InventoryClient;
use crate::model::InventoryItem;
use resource_actor::ResourceActor;

/// Creates a new Inventory actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<InventoryItem>, InventoryClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, InventoryClient::new(generic_client))
}
