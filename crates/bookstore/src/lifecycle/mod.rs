//! # System Lifecycle & Orchestration
//!
//! This module starts, wires and stops the participant actors and the coordinator.
//!
//! ## The BookstoreSystem Pattern
//!
//! [`BookstoreSystem`] is the conductor:
//!
//! 1. **Actor Creation** - one ledger actor and one inventory actor, each with its client
//! 2. **Wiring** - the coordinator gets clones of both clients
//! 3. **Background work** - an optional sweeper drops reservations older than the
//!    configured TTL (orphans of a coordinator that died mid-transaction)
//! 4. **Graceful Shutdown** - stop the sweeper, drop every client, await the actors
//!
//! ```rust,no_run
//! use bookstore::config::SystemConfig;
//! use bookstore::lifecycle::BookstoreSystem;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = BookstoreSystem::bootstrap(SystemConfig::from_env()?).await?;
//!     let receipt = system
//!         .coordinator
//!         .start_transaction("Book 2", 1, "Dijana")
//!         .await?;
//!     println!("{} paid {}", receipt.account_id, receipt.amount);
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! Actors stop when every sender of their mailbox is gone:
//!
//! 1. **Abort the sweeper** - it holds client clones
//! 2. **Drop all clients** - including the coordinator's clones
//! 3. **Actors detect closure** - `receiver.recv()` returns `None` and they log their final state
//! 4. **Await completion** - wait for all actor tasks to finish
//!
//! Clones handed out to callers keep the mailboxes open, so drop them before calling
//! [`BookstoreSystem::shutdown`].
//!
//! ## Bootstrap
//!
//! [`BookstoreSystem::bootstrap`] also seeds empty stores with the default catalog and
//! accounts (see [`seed`]) and clears staged reservations left over from a previous run.

pub mod bookstore_system;
pub mod seed;

pub use bookstore_system::*;
