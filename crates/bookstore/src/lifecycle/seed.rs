//! Default accounts and catalog loaded into empty stores at bootstrap.

use crate::clients::{InventoryClient, LedgerClient};
use crate::model::{AccountCreate, ItemCreate};
use resource_actor::ActorClient;
use tracing::info;

use super::SystemError;

/// `(name, balance)`
pub const ACCOUNTS: [(&str, f64); 2] = [("Emilija", 20000.0), ("Dijana", 1000.0)];

/// `(title, price, quantity)`
pub const ITEMS: [(&str, f64, u32); 3] = [
    ("Book 1", 100.0, 5),
    ("Book 2", 50.0, 1),
    ("Book 3", 200.0, 0),
];

/// Fills whichever store is empty and clears staged reservations on both.
///
/// Seeding a store that already holds entities is skipped, so running this twice is safe.
pub async fn seed(ledger: &LedgerClient, inventory: &InventoryClient) -> Result<(), SystemError> {
    if ledger.list_accounts().await?.is_empty() {
        for (name, balance) in ACCOUNTS {
            ledger
                .create_account(AccountCreate {
                    name: name.to_string(),
                    balance,
                })
                .await?;
        }
        info!(accounts = ACCOUNTS.len(), "Seeded ledger");
    }

    // Sold out items are hidden from the available listing, so check the raw store
    if inventory.list().await?.is_empty() {
        for (title, price, quantity) in ITEMS {
            inventory
                .create_item(ItemCreate {
                    title: title.to_string(),
                    price,
                    quantity,
                })
                .await?;
        }
        info!(items = ITEMS.len(), "Seeded inventory");
    }

    let ledger_cleared = ledger.clear_staged().await?;
    let inventory_cleared = inventory.clear_staged().await?;
    info!(ledger_cleared, inventory_cleared, "Cleared leftover reservations");
    Ok(())
}
