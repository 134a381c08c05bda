//! # Participant Capability
//!
//! The coordinator talks to every resource through the same three protocol calls. This
//! module defines that capability as the [`Participant`] trait, plus the error a protocol
//! call can end in.
//!
//! Enlistment is not part of the trait. What gets staged is resource specific (an amount
//! for the ledger, a quantity for the inventory), so `enlist_*` lives on the concrete clients.

use async_trait::async_trait;
use resource_actor::{FrameworkError, TransactionId};
use std::fmt::Display;
use thiserror::Error;

/// Step of a transaction a participant call belongs to. Used for logging and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Resolve,
    Enlist,
    Prepare,
    Commit,
    Rollback,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Resolve => "resolve",
            Phase::Enlist => "enlist",
            Phase::Prepare => "prepare",
            Phase::Commit => "commit",
            Phase::Rollback => "rollback",
        };
        f.write_str(name)
    }
}

/// Failure of a single call to a participant.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParticipantError {
    /// The participant's mailbox is closed or it dropped the request.
    #[error("Participant {participant} unavailable during {phase}")]
    Unavailable {
        participant: &'static str,
        phase: Phase,
    },

    /// The call did not complete within its time budget.
    #[error("Participant {participant} timed out during {phase}")]
    Timeout {
        participant: &'static str,
        phase: Phase,
    },

    /// The participant answered with an error.
    #[error("Participant {participant} failed during {phase}: {reason}")]
    Failed {
        participant: &'static str,
        phase: Phase,
        reason: String,
    },
}

impl ParticipantError {
    pub fn from_framework(participant: &'static str, phase: Phase, error: FrameworkError) -> Self {
        if error.is_unavailable() {
            ParticipantError::Unavailable { participant, phase }
        } else {
            ParticipantError::Failed {
                participant,
                phase,
                reason: error.to_string(),
            }
        }
    }

    pub fn participant(&self) -> &'static str {
        match self {
            ParticipantError::Unavailable { participant, .. }
            | ParticipantError::Timeout { participant, .. }
            | ParticipantError::Failed { participant, .. } => participant,
        }
    }
}

/// The protocol surface shared by every resource taking part in a transaction.
///
/// # Contract
///
/// - `prepare` is a pure read: `true` iff a reservation for `tx` exists and can be applied.
/// - `commit` applies and forgets the reservation in one step; without a reservation it is
///   a no-op.
/// - `rollback` forgets the reservation if there is one. Calling it any number of times,
///   or for a transaction never enlisted, succeeds.
#[async_trait]
pub trait Participant: Send + Sync {
    /// Short, stable name used in logs and errors (`"ledger"`, `"inventory"`).
    fn name(&self) -> &'static str;

    async fn prepare(&self, tx: TransactionId) -> Result<bool, ParticipantError>;

    async fn commit(&self, tx: TransactionId) -> Result<(), ParticipantError>;

    async fn rollback(&self, tx: TransactionId) -> Result<(), ParticipantError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_errors_are_classified() {
        let err = ParticipantError::from_framework("ledger", Phase::Commit, FrameworkError::ActorClosed);
        assert_eq!(
            err,
            ParticipantError::Unavailable {
                participant: "ledger",
                phase: Phase::Commit
            }
        );

        let err = ParticipantError::from_framework(
            "inventory",
            Phase::Prepare,
            FrameworkError::NotFound("book9".to_string()),
        );
        assert!(matches!(err, ParticipantError::Failed { participant: "inventory", .. }));
        assert_eq!(err.participant(), "inventory");
        assert!(err.to_string().contains("book9"));
    }
}
