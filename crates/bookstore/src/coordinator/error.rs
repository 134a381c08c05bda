//! Error types for the transaction coordinator.

use super::TransactionState;
use crate::inventory_actor::InventoryError;
use crate::ledger_actor::LedgerError;
use crate::participant::ParticipantError;
use resource_actor::TransactionId;
use thiserror::Error;

/// Errors surfaced by [`TransactionCoordinator`](super::TransactionCoordinator).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransactionError {
    /// The request was rejected before any participant was contacted.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The named book or client does not exist (`"book"` or `"client"`).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// At least one participant voted no. Every participant has been rolled back.
    #[error("Transaction {0} aborted")]
    Aborted(TransactionId),

    #[error(transparent)]
    Participant(#[from] ParticipantError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Illegal transaction state transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: TransactionState,
        to: TransactionState,
    },
}
