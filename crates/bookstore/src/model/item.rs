use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for inventory items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "book{}", self.0)
    }
}

/// A sellable title in the catalog, owned by the inventory participant.
///
/// The delta a transaction stages against an item is the number of units to take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub title: String,
    pub price: f64,
    pub quantity: u32,
}

impl InventoryItem {
    pub fn new(id: ItemId, title: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            quantity,
        }
    }

    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }
}

/// Payload for adding an item to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub title: String,
    pub price: f64,
    pub quantity: u32,
}
