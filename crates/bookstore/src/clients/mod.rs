//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//!
//! Each wrapper adds the resource-specific operations (creation, catalog reads, enlistment)
//! and implements [`Participant`](crate::participant::Participant) so the coordinator can
//! drive it through the protocol.

pub mod inventory_client;
pub mod ledger_client;

pub use inventory_client::*;
pub use ledger_client::*;
