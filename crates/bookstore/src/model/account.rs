use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub u32);

impl From<u32> for AccountId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client{}", self.0)
    }
}

/// A client's money account, owned by the ledger participant.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
/// The delta a transaction stages against an account is the amount to debit (`f64`).
///
/// See [`impl ActorEntity for Account`](#impl-ActorEntity-for-Account) for the vote and
/// commit rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub balance: f64,
}

impl Account {
    /// Creates a new Account instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the actor system)
    /// * `name` - Display name, used to resolve the account in a purchase
    /// * `balance` - Opening balance
    pub fn new(id: AccountId, name: impl Into<String>, balance: f64) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
        }
    }
}

/// Payload for opening a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub name: String,
    pub balance: f64,
}
