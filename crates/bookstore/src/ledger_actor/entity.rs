//! Entity trait implementation for the Account domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation that enables [`Account`]
//! to be managed by the generic [`resource_actor::ResourceActor`].

use super::LedgerError;
use crate::model::{Account, AccountCreate, AccountId};
use resource_actor::ActorEntity;

fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

impl ActorEntity for Account {
    type Id = AccountId;
    type Create = AccountCreate;
    type Delta = f64;
    type Error = LedgerError;

    fn from_create_params(id: AccountId, params: AccountCreate) -> Result<Self, Self::Error> {
        if !is_valid_amount(params.balance) {
            return Err(LedgerError::InvalidAmount(params.balance));
        }
        Ok(Self::new(id, params.name, params.balance))
    }

    /// Votes yes iff the debit is a valid amount covered by the balance.
    fn can_apply(&self, amount: &f64) -> bool {
        is_valid_amount(*amount) && *amount <= self.balance
    }

    fn apply(&mut self, amount: &f64) -> Result<(), Self::Error> {
        if !is_valid_amount(*amount) {
            return Err(LedgerError::InvalidAmount(*amount));
        }
        if *amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: *amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}
