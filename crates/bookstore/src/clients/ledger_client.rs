//! # Ledger Client
//!
//! Provides a high‑level API for interacting with the ledger actor.
//! It wraps a `ResourceClient<Account>` and exposes domain‑specific methods.
use crate::ledger_actor::LedgerError;
use crate::model::{Account, AccountCreate, AccountId};
use crate::participant::{Participant, ParticipantError, Phase};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient, TransactionId};
use std::collections::HashMap;
use tracing::{debug, instrument};

const NAME: &str = "ledger";

/// Client for interacting with the ledger actor.
#[derive(Clone)]
pub struct LedgerClient {
    inner: ResourceClient<Account>,
}

impl LedgerClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Account> for LedgerClient {
    type Error = LedgerError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => LedgerError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<LedgerError>() {
                Ok(err) => *err,
                Err(other) => LedgerError::ActorCommunicationError(other.to_string()),
            },
            other => LedgerError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl LedgerClient {
    #[instrument(skip(self))]
    pub async fn create_account(&self, params: AccountCreate) -> Result<AccountId, LedgerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Every account, keyed by id.
    #[instrument(skip(self))]
    pub async fn list_accounts(&self) -> Result<HashMap<AccountId, Account>, LedgerError> {
        self.list().await
    }

    /// Fetches one account, failing with [`LedgerError::NotFound`] if it does not exist.
    #[instrument(skip(self))]
    pub async fn get_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.get(id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    /// Stages a debit of `amount` from `account_id` under `tx`.
    ///
    /// Overwrites any reservation already staged for `tx`. Nothing is checked until
    /// `prepare`.
    #[instrument(skip(self))]
    pub async fn enlist_money_transfer(
        &self,
        tx: TransactionId,
        account_id: AccountId,
        amount: f64,
    ) -> Result<(), LedgerError> {
        debug!(%tx, %account_id, amount, "Staging debit");
        self.inner
            .enlist(tx, account_id, amount)
            .await
            .map_err(Self::map_error)
    }

    /// Drops reservations older than `older_than`, returning how many were dropped.
    pub async fn expire_staged(&self, older_than: chrono::Duration) -> Result<usize, LedgerError> {
        self.inner
            .expire_staged(older_than)
            .await
            .map_err(Self::map_error)
    }

    pub async fn clear_staged(&self) -> Result<usize, LedgerError> {
        self.inner.clear_staged().await.map_err(Self::map_error)
    }
}

#[async_trait]
impl Participant for LedgerClient {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn prepare(&self, tx: TransactionId) -> Result<bool, ParticipantError> {
        self.inner
            .prepare(tx)
            .await
            .map_err(|e| ParticipantError::from_framework(NAME, Phase::Prepare, e))
    }

    async fn commit(&self, tx: TransactionId) -> Result<(), ParticipantError> {
        self.inner
            .commit(tx)
            .await
            .map_err(|e| ParticipantError::from_framework(NAME, Phase::Commit, e))
    }

    async fn rollback(&self, tx: TransactionId) -> Result<(), ParticipantError> {
        self.inner
            .rollback(tx)
            .await
            .map_err(|e| ParticipantError::from_framework(NAME, Phase::Rollback, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::{create_mock_client, expect_enlist, MockClient};

    #[tokio::test]
    async fn test_enlist_money_transfer_sends_reservation() {
        let (client, mut receiver) = create_mock_client::<Account>(10);
        let ledger = LedgerClient::new(client);
        let tx = TransactionId::new();

        let enlist_task =
            tokio::spawn(async move { ledger.enlist_money_transfer(tx, AccountId(2), 50.0).await });

        let (seen_tx, id, amount, responder) = expect_enlist(&mut receiver)
            .await
            .expect("Expected Enlist request");
        assert_eq!(seen_tx, tx);
        assert_eq!(id, AccountId(2));
        assert_eq!(amount, 50.0);
        responder.send(Ok(())).unwrap();

        assert!(enlist_task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_entity_errors_keep_their_variant() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_commit()
            .return_err(FrameworkError::EntityError(Box::new(LedgerError::InsufficientFunds {
                requested: 50.0,
                available: 10.0,
            })));

        let ledger = LedgerClient::new(mock.client());
        let err = ledger.commit(TransactionId::new()).await.unwrap_err();
        assert!(matches!(
            err,
            ParticipantError::Failed {
                participant: "ledger",
                phase: Phase::Commit,
                ..
            }
        ));

        // The typed mapping used by the domain methods keeps the ledger error intact
        let mapped = LedgerClient::map_error(FrameworkError::EntityError(Box::new(
            LedgerError::InvalidAmount(-1.0),
        )));
        assert_eq!(mapped, LedgerError::InvalidAmount(-1.0));
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_account_missing_is_not_found() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_get().return_ok(None);

        let ledger = LedgerClient::new(mock.client());
        let result = ledger.get_account(AccountId(7)).await;
        assert_eq!(result, Err(LedgerError::NotFound("client7".to_string())));
        mock.verify();
    }
}
