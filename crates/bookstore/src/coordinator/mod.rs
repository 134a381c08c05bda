//! # Transaction Coordinator
//!
//! Drives one purchase across the ledger and the inventory with two-phase commit.
//!
//! ## Flow
//!
//! 1. **Validate** the request (non-empty names, positive quantity).
//! 2. **Resolve** the title and the client name to ids (case-insensitive, lowest id wins on
//!    ties) and fetch the unit price. Titles are matched against the whole catalog: a sold
//!    out book resolves, and the inventory then votes no. Nothing has been staged yet, so
//!    failures here return straight away.
//! 3. **Enlist** the inventory (`enlist_purchase`), then the ledger (`enlist_money_transfer`).
//! 4. **Prepare** every participant concurrently. An error or a timeout counts as a no vote.
//! 5. **Commit** every participant concurrently if all voted yes, otherwise roll everyone
//!    back and fail with [`TransactionError::Aborted`].
//!
//! Any failure once enlistment has started rolls back every enlisted participant (including
//! one whose enlist call itself failed) before the original error is returned. Rollback
//! failures are logged and never surface.
//!
//! ## Timeouts
//!
//! Every participant call is bounded by `participant_timeout`. Steps 2–4 are also bounded by
//! the transaction deadline. Commit and rollback calls get a fresh `participant_timeout`
//! even when the deadline has passed, so the abort sweep always runs.

pub mod error;
pub mod transaction;
pub mod validation;

pub use error::*;
pub use transaction::*;
pub use validation::*;

use crate::clients::{InventoryClient, LedgerClient};
use crate::config::CoordinatorConfig;
use crate::inventory_actor::InventoryError;
use crate::model::{AccountId, ItemId};
use crate::participant::{Participant, ParticipantError, Phase};
use resource_actor::TransactionId;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{info, info_span, instrument, warn, Instrument};

/// What a committed purchase did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionReceipt {
    pub tx: TransactionId,
    pub item_id: ItemId,
    pub account_id: AccountId,
    pub quantity: u32,
    pub amount: f64,
}

#[derive(Clone)]
pub struct TransactionCoordinator {
    ledger: LedgerClient,
    inventory: InventoryClient,
    config: CoordinatorConfig,
}

/// Runs `call` under the tighter of `participant_timeout` and `deadline`.
async fn bounded<F: Future>(
    participant_timeout: Duration,
    deadline: Option<Instant>,
    participant: &'static str,
    phase: Phase,
    call: F,
) -> Result<F::Output, ParticipantError> {
    let now = Instant::now();
    let mut limit = now + participant_timeout;
    if let Some(deadline) = deadline {
        if deadline <= now {
            return Err(ParticipantError::Timeout { participant, phase });
        }
        limit = limit.min(deadline);
    }
    tokio::time::timeout_at(limit, call)
        .await
        .map_err(|_| ParticipantError::Timeout { participant, phase })
}

/// Ids and amount a validated request resolves to.
struct Resolved {
    item_id: ItemId,
    account_id: AccountId,
    amount: f64,
}

impl TransactionCoordinator {
    pub fn new(ledger: LedgerClient, inventory: InventoryClient, config: CoordinatorConfig) -> Self {
        Self {
            ledger,
            inventory,
            config,
        }
    }

    /// Buys `quantity` copies of `title` for `client_name`, all or nothing.
    ///
    /// The whole call is bounded by the configured transaction timeout.
    #[instrument(skip(self))]
    pub async fn start_transaction(
        &self,
        title: &str,
        quantity: i32,
        client_name: &str,
    ) -> Result<TransactionReceipt, TransactionError> {
        let request = PurchaseRequest::new(title, quantity, client_name)?;
        let deadline = Instant::now() + self.config.transaction_timeout;
        self.start_transaction_until(request, deadline).await
    }

    /// Like [`start_transaction`](Self::start_transaction), with an explicit deadline for
    /// the resolve, enlist and prepare steps.
    pub async fn start_transaction_until(
        &self,
        request: PurchaseRequest,
        deadline: Instant,
    ) -> Result<TransactionReceipt, TransactionError> {
        request.validate()?;
        let mut txn = Transaction::new();
        let span = info_span!("transaction", tx = %txn.id());
        async {
            info!(title = %request.title, quantity = request.quantity, client = %request.client_name, "Starting transaction");
            let resolved = self.resolve(&request, deadline).await?;

            let outcome = self
                .enlist_and_decide(&mut txn, &request, &resolved, deadline)
                .await;
            if let Err(e) = &outcome {
                warn!(error = %e, "Transaction failed, rolling back");
                self.abort(&mut txn).await;
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn resolve(
        &self,
        request: &PurchaseRequest,
        deadline: Instant,
    ) -> Result<Resolved, TransactionError> {
        let timeout = self.config.participant_timeout;
        let title = request.title.trim().to_lowercase();
        let client = request.client_name.trim().to_lowercase();

        let items = bounded(
            timeout,
            Some(deadline),
            self.inventory.name(),
            Phase::Resolve,
            self.inventory.list_items(),
        )
        .await??;
        // Listed in id order, so the first match is the lowest id
        let item_id = items
            .iter()
            .find(|item| item.title.to_lowercase() == title)
            .map(|item| item.id)
            .ok_or(TransactionError::NotFound("book"))?;

        let accounts = bounded(
            timeout,
            Some(deadline),
            self.ledger.name(),
            Phase::Resolve,
            self.ledger.list_accounts(),
        )
        .await??;
        let account_id = accounts
            .values()
            .filter(|account| account.name.to_lowercase() == client)
            .map(|account| account.id)
            .min()
            .ok_or(TransactionError::NotFound("client"))?;

        let price = bounded(
            timeout,
            Some(deadline),
            self.inventory.name(),
            Phase::Resolve,
            self.inventory.item_price(item_id),
        )
        .await?
        .map_err(|e| match e {
            InventoryError::NotFound(_) => TransactionError::NotFound("book"),
            other => other.into(),
        })?;

        let amount = f64::from(request.quantity) * price;
        info!(%item_id, %account_id, price, amount, "Resolved");
        Ok(Resolved {
            item_id,
            account_id,
            amount,
        })
    }

    async fn enlist_and_decide(
        &self,
        txn: &mut Transaction,
        request: &PurchaseRequest,
        resolved: &Resolved,
        deadline: Instant,
    ) -> Result<TransactionReceipt, TransactionError> {
        let tx = txn.id();
        let timeout = self.config.participant_timeout;

        // Enlisted before the call, so a failed enlist still gets rolled back
        txn.enlist(Arc::new(self.inventory.clone()))?;
        bounded(
            timeout,
            Some(deadline),
            self.inventory.name(),
            Phase::Enlist,
            self.inventory
                .enlist_purchase(tx, resolved.item_id, request.quantity),
        )
        .await??;

        txn.enlist(Arc::new(self.ledger.clone()))?;
        bounded(
            timeout,
            Some(deadline),
            self.ledger.name(),
            Phase::Enlist,
            self.ledger
                .enlist_money_transfer(tx, resolved.account_id, resolved.amount),
        )
        .await??;
        txn.advance(TransactionState::Enlisted)?;

        if !self.prepare(txn, deadline).await {
            return Err(TransactionError::Aborted(tx));
        }
        txn.advance(TransactionState::Prepared)?;

        self.commit(txn).await?;
        txn.advance(TransactionState::Committed)?;
        info!("Transaction committed");

        Ok(TransactionReceipt {
            tx,
            item_id: resolved.item_id,
            account_id: resolved.account_id,
            quantity: request.quantity,
            amount: resolved.amount,
        })
    }

    /// Collects every vote concurrently. True iff all participants voted yes.
    async fn prepare(&self, txn: &Transaction, deadline: Instant) -> bool {
        let tx = txn.id();
        let timeout = self.config.participant_timeout;
        let mut votes = JoinSet::new();
        for participant in txn.participants() {
            let participant = participant.clone();
            votes.spawn(async move {
                let name = participant.name();
                let vote = bounded(
                    timeout,
                    Some(deadline),
                    name,
                    Phase::Prepare,
                    participant.prepare(tx),
                )
                .await
                .and_then(|vote| vote);
                (name, vote)
            });
        }

        let mut all_yes = true;
        while let Some(joined) = votes.join_next().await {
            match joined {
                Ok((participant, Ok(vote))) => {
                    info!(participant, vote, "Vote received");
                    all_yes &= vote;
                }
                Ok((participant, Err(e))) => {
                    warn!(participant, error = %e, "Prepare failed, counting as no");
                    all_yes = false;
                }
                Err(e) => {
                    warn!(error = %e, "Prepare task failed, counting as no");
                    all_yes = false;
                }
            }
        }
        all_yes
    }

    /// Commits every participant concurrently. Returns the first failure, if any.
    async fn commit(&self, txn: &Transaction) -> Result<(), ParticipantError> {
        let tx = txn.id();
        let timeout = self.config.participant_timeout;
        let mut acks = JoinSet::new();
        for participant in txn.participants() {
            let participant = participant.clone();
            acks.spawn(async move {
                let name = participant.name();
                bounded(timeout, None, name, Phase::Commit, participant.commit(tx))
                    .await
                    .and_then(|ack| ack)
                    .map(|_| name)
            });
        }

        let mut first_error = None;
        while let Some(joined) = acks.join_next().await {
            match joined {
                Ok(Ok(participant)) => info!(participant, "Commit acknowledged"),
                Ok(Err(e)) => {
                    warn!(participant = e.participant(), error = %e, "Commit failed");
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    warn!(error = %e, "Commit task failed");
                    first_error.get_or_insert(ParticipantError::Failed {
                        participant: "unknown",
                        phase: Phase::Commit,
                        reason: e.to_string(),
                    });
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Best-effort rollback of every enlisted participant. Never fails.
    async fn abort(&self, txn: &mut Transaction) {
        let tx = txn.id();
        let timeout = self.config.participant_timeout;
        let mut acks = JoinSet::new();
        for participant in txn.participants() {
            let participant = participant.clone();
            acks.spawn(async move {
                let name = participant.name();
                bounded(timeout, None, name, Phase::Rollback, participant.rollback(tx))
                    .await
                    .and_then(|ack| ack)
                    .map(|_| name)
            });
        }

        while let Some(joined) = acks.join_next().await {
            match joined {
                Ok(Ok(participant)) => info!(participant, "Rolled back"),
                Ok(Err(e)) => warn!(participant = e.participant(), error = %e, "Rollback failed"),
                Err(e) => warn!(error = %e, "Rollback task failed"),
            }
        }

        if let Err(e) = txn.advance(TransactionState::Aborted) {
            warn!(error = %e, "Abort after terminal state");
        }
    }
}
