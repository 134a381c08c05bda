//! Coordinator-side view of one transaction.

use super::TransactionError;
use crate::participant::Participant;
use resource_actor::TransactionId;
use std::sync::Arc;

/// Transaction state in the coordinator.
///
/// ```text
/// Created ──► Enlisted ──► Prepared ──► Committed
///    │            │            │
///    └────────────┴────────────┴──────► Aborted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// Id generated, no participant contacted yet
    Created,
    /// Every participant holds a reservation
    Enlisted,
    /// Every participant voted yes
    Prepared,
    Committed,
    Aborted,
}

impl TransactionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TransactionState::Committed | TransactionState::Aborted)
    }

    pub fn can_transition_to(self, next: TransactionState) -> bool {
        use TransactionState::*;
        matches!(
            (self, next),
            (Created, Enlisted)
                | (Enlisted, Prepared)
                | (Prepared, Committed)
                | (Created | Enlisted | Prepared, Aborted)
        )
    }
}

/// One purchase in flight: its id, the participants enlisted so far (in enlistment order)
/// and its state. Lives for a single coordinator call.
pub struct Transaction {
    id: TransactionId,
    state: TransactionState,
    participants: Vec<Arc<dyn Participant>>,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Transaction {
    pub fn new() -> Self {
        Self {
            id: TransactionId::new(),
            state: TransactionState::Created,
            participants: Vec::new(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn participants(&self) -> &[Arc<dyn Participant>] {
        &self.participants
    }

    /// Records `participant` as enlisted. Allowed only before the transaction is `Enlisted`.
    pub fn enlist(&mut self, participant: Arc<dyn Participant>) -> Result<(), TransactionError> {
        if self.state != TransactionState::Created {
            return Err(TransactionError::InvalidTransition {
                from: self.state,
                to: TransactionState::Enlisted,
            });
        }
        self.participants.push(participant);
        Ok(())
    }

    pub fn advance(&mut self, next: TransactionState) -> Result<(), TransactionError> {
        if !self.state.can_transition_to(next) {
            return Err(TransactionError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}
