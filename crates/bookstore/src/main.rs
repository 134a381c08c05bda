//! # Bookstore Demo
//!
//! Boots the seeded system and runs two purchases through the coordinator:
//!
//! 1. Dijana buys the only copy of "Book 2": both participants vote yes and commit.
//! 2. Dijana tries to buy "Book 3", which is sold out: the inventory votes no and the
//!    transaction aborts.
//!
//! ```bash
//! RUST_LOG=info cargo run -p bookstore
//! ```

use bookstore::config::SystemConfig;
use bookstore::lifecycle::BookstoreSystem;
use bookstore::model::AccountId;
use resource_actor::telemetry::setup_tracing;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = SystemConfig::from_env()?;
    info!(?config, "Starting bookstore");

    let system = BookstoreSystem::bootstrap(config).await?;

    let span = tracing::info_span!("purchase", scenario = "in stock");
    let receipt = async {
        system
            .coordinator
            .start_transaction("Book 2", 1, "Dijana")
            .await
    }
    .instrument(span)
    .await?;
    info!(tx = %receipt.tx, amount = receipt.amount, "Purchase committed");

    let span = tracing::info_span!("purchase", scenario = "sold out");
    let sold_out = async {
        system
            .coordinator
            .start_transaction("Book 3", 1, "Dijana")
            .await
    }
    .instrument(span)
    .await;
    match sold_out {
        Ok(receipt) => error!(tx = %receipt.tx, "Sold out purchase unexpectedly committed"),
        Err(e) => info!(error = %e, "Purchase refused"),
    }

    let dijana = system.ledger.get_account(AccountId(2)).await?;
    info!(client = %dijana.name, balance = dijana.balance, "Final balance");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
