//! # Inventory Client
//!
//! Provides a high‑level API for interacting with the inventory actor.
//! It wraps a `ResourceClient<InventoryItem>` and exposes domain‑specific methods.
use crate::inventory_actor::InventoryError;
use crate::model::{InventoryItem, ItemCreate, ItemId};
use crate::participant::{Participant, ParticipantError, Phase};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient, TransactionId};
use tracing::{debug, instrument};

const NAME: &str = "inventory";

/// Client for interacting with the inventory actor.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<InventoryItem>,
}

impl InventoryClient {
    pub fn new(inner: ResourceClient<InventoryItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<InventoryItem> for InventoryClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<InventoryItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => InventoryError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<InventoryError>() {
                Ok(err) => *err,
                Err(other) => InventoryError::ActorCommunicationError(other.to_string()),
            },
            other => InventoryError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl InventoryClient {
    #[instrument(skip(self))]
    pub async fn create_item(&self, params: ItemCreate) -> Result<ItemId, InventoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// The whole catalog, sold out items included, ordered by id.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        let mut items: Vec<InventoryItem> = self.list().await?.into_values().collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    /// Items with at least one unit in stock, ordered by id.
    #[instrument(skip(self))]
    pub async fn list_available_items(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        let mut items = self.list_items().await?;
        items.retain(InventoryItem::is_available);
        Ok(items)
    }

    /// Unit price of `id`. Fails with [`InventoryError::NotFound`] on an unknown id.
    #[instrument(skip(self))]
    pub async fn item_price(&self, id: ItemId) -> Result<f64, InventoryError> {
        match self.get(id).await? {
            Some(item) => Ok(item.price),
            None => Err(InventoryError::NotFound(id.to_string())),
        }
    }

    /// Stages taking `quantity` units of `item_id` under `tx`.
    #[instrument(skip(self))]
    pub async fn enlist_purchase(
        &self,
        tx: TransactionId,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<(), InventoryError> {
        debug!(%tx, %item_id, quantity, "Staging purchase");
        self.inner
            .enlist(tx, item_id, quantity)
            .await
            .map_err(Self::map_error)
    }

    pub async fn expire_staged(
        &self,
        older_than: chrono::Duration,
    ) -> Result<usize, InventoryError> {
        self.inner
            .expire_staged(older_than)
            .await
            .map_err(Self::map_error)
    }

    pub async fn clear_staged(&self) -> Result<usize, InventoryError> {
        self.inner.clear_staged().await.map_err(Self::map_error)
    }
}

#[async_trait]
impl Participant for InventoryClient {
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
