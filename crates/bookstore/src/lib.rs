//! # Bookstore
//!
//! A purchase ("buy N copies of a book for a client") that must debit a money ledger and
//! decrement an inventory together or not at all, coordinated with two-phase commit.
//!
//! - [`ledger_actor`] and [`inventory_actor`]: the two participants, each a
//!   [`ResourceActor`](resource_actor::ResourceActor) over its own entity type
//! - [`clients`]: typed wrappers that add the domain operations and implement [`participant::Participant`]
//! - [`coordinator`]: resolves the request, enlists, prepares and decides
//! - [`lifecycle`]: starts, seeds and stops everything
//!
//! This library exposes the modules for the demo binary and for integration testing.

pub mod clients;
pub mod config;
pub mod coordinator;
pub mod inventory_actor;
pub mod ledger_actor;
pub mod lifecycle;
pub mod model;
pub mod participant;
