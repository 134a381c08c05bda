//! Error types for the Ledger actor.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// The requested account was not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The debit exceeds the account balance.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: f64, available: f64 },

    /// The amount is negative or not a finite number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
