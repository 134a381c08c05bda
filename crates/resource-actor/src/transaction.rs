//! # Transaction Identity & Reservations
//!
//! Every participant keys its staging table by a [`TransactionId`] generated by the
//! coordinator. A [`Reservation`] is the staged, not-yet-applied mutation for one
//! transaction at one participant.

use crate::entity::ActorEntity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Globally unique identifier of one coordinated transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub Uuid);

impl TransactionId {
    /// Generates a fresh random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TransactionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tx_{}", self.0)
    }
}

/// A staged mutation owned by the participant that recorded it.
#[derive(Debug, Clone)]
pub struct Reservation<T: ActorEntity> {
    /// The entity the delta will be applied to.
    pub target: T::Id,
    pub delta: T::Delta,
    pub created_at: DateTime<Utc>,
}

impl<T: ActorEntity> Reservation<T> {
    pub fn new(target: T::Id, delta: T::Delta) -> Self {
        Self {
            target,
            delta,
            created_at: Utc::now(),
        }
    }

    /// True if the reservation was created before `cutoff`.
    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.created_at < cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_ids_are_unique() {
        let a = TransactionId::new();
        let b = TransactionId::new();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("tx_"));
    }
}
