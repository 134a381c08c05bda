//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The subscriber uses a compact format that hides the crate/module prefix (`with_target(false)`).
//! Actor logs carry an `entity_type` field instead, and every protocol log carries the
//! transaction id as `tx`, so one transaction can be followed across both participants:
//!
//! ```text
//! INFO transaction{tx=tx_6f1c…}: Starting transaction title=Book 2 quantity=1 client=Dijana
//! INFO Enlisted entity_type="InventoryItem" tx=tx_6f1c… pending=1
//! INFO Enlisted entity_type="Account" tx=tx_6f1c… pending=1
//! INFO Prepared entity_type="InventoryItem" tx=tx_6f1c… vote=true
//! INFO Prepared entity_type="Account" tx=tx_6f1c… vote=true
//! INFO Committed entity_type="Account" tx=tx_6f1c… pending=0
//! INFO Committed entity_type="InventoryItem" tx=tx_6f1c… pending=0
//! INFO transaction{tx=tx_6f1c…}: Transaction committed
//! ```
//!
//! ## Usage Examples
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run   # full payloads (deltas, create params)
//! RUST_LOG=resource_actor=debug,bookstore=info cargo run
//! ```

/// Installs the global subscriber. Call once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
