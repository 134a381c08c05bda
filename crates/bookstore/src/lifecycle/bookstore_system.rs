use crate::clients::{InventoryClient, LedgerClient};
use crate::config::{ConfigError, CoordinatorConfig, SystemConfig};
use crate::coordinator::TransactionCoordinator;
use crate::inventory_actor::{self, InventoryError};
use crate::ledger_actor::{self, LedgerError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, info_span, warn, Instrument};

/// Errors raised while starting or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

/// Reservations dropped by one sweep, per participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub ledger: usize,
    pub inventory: usize,
}

/// The running purchase system: both participant actors and the coordinator wired to them.
///
/// # Architecture
///
/// - **Ledger Actor**: client accounts, stages debits
/// - **Inventory Actor**: the catalog, stages quantity decrements
/// - **Coordinator**: not an actor; a cloneable handle that drives both participants
///   through two-phase commit
pub struct BookstoreSystem {
    /// Client for the ledger actor
    pub ledger: LedgerClient,

    /// Client for the inventory actor
    pub inventory: InventoryClient,

    pub coordinator: TransactionCoordinator,

    /// Timeouts the coordinator runs with, bounding how short a sweep TTL may be
    timeouts: CoordinatorConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,

    sweeper: Option<JoinHandle<()>>,
}

impl BookstoreSystem {
    /// Spawns both actors and, when `reservation_ttl` is set, the stale reservation sweeper.
    ///
    /// The stores start empty. Must be called from within a Tokio runtime.
    pub fn new(config: SystemConfig) -> Result<Self, SystemError> {
        config.validate()?;

        let (ledger_actor, ledger) = ledger_actor::new(config.mailbox_capacity);
        let (inventory_actor, inventory) = inventory_actor::new(config.mailbox_capacity);

        let ledger_handle = tokio::spawn(ledger_actor.run());
        let inventory_handle = tokio::spawn(inventory_actor.run());

        let coordinator =
            TransactionCoordinator::new(ledger.clone(), inventory.clone(), config.coordinator());

        let sweeper = match config.reservation_ttl {
            Some(ttl) => Some(spawn_sweeper(
                ledger.clone(),
                inventory.clone(),
                to_chrono(ttl)?,
                config.sweep_interval,
            )),
            None => None,
        };

        info!(
            mailbox_capacity = config.mailbox_capacity,
            sweeper = sweeper.is_some(),
            "System started"
        );

        Ok(Self {
            ledger,
            inventory,
            coordinator,
            timeouts: config.coordinator(),
            handles: vec![ledger_handle, inventory_handle],
            sweeper,
        })
    }

    /// Like [`new`](Self::new), then seeds empty stores and clears leftover reservations.
    pub async fn bootstrap(config: SystemConfig) -> Result<Self, SystemError> {
        let system = Self::new(config)?;
        super::seed::seed(&system.ledger, &system.inventory).await?;
        Ok(system)
    }

    /// Runs one sweep now: drops reservations older than `ttl` on both participants.
    ///
    /// `ttl` is held to the same bounds as the configured `reservation_ttl`.
    pub async fn sweep_stale_reservations(&self, ttl: Duration) -> Result<SweepReport, SystemError> {
        self.timeouts.check_reservation_ttl(ttl)?;
        sweep(&self.ledger, &self.inventory, to_chrono(ttl)?).await
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Returns an error if any actor task panicked.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        if let Some(sweeper) = self.sweeper {
            sweeper.abort();
            let _ = sweeper.await;
        }

        // Closing every sender ends the actors' receive loops
        drop(self.coordinator);
        drop(self.ledger);
        drop(self.inventory);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn to_chrono(ttl: Duration) -> Result<chrono::Duration, ConfigError> {
    chrono::Duration::from_std(ttl).map_err(|e| ConfigError::InvalidValue {
        key: "reservation_ttl",
        value: format!("{ttl:?}"),
        reason: e.to_string(),
    })
}

async fn sweep(
    ledger: &LedgerClient,
    inventory: &InventoryClient,
    ttl: chrono::Duration,
) -> Result<SweepReport, SystemError> {
    let report = SweepReport {
        ledger: ledger.expire_staged(ttl).await?,
        inventory: inventory.expire_staged(ttl).await?,
    };
    if report != SweepReport::default() {
        warn!(
            ledger = report.ledger,
            inventory = report.inventory,
            "Expired stale reservations"
        );
    }
    Ok(report)
}

fn spawn_sweeper(
    ledger: LedgerClient,
    inventory: InventoryClient,
    ttl: chrono::Duration,
    interval: Duration,
) -> JoinHandle<()> {
    let span = info_span!("sweeper", ttl_secs = ttl.num_seconds());
    tokio::spawn(
        async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = sweep(&ledger, &inventory, ttl).await {
                    warn!(error = %e, "Sweep failed");
                }
            }
        }
        .instrument(span),
    )
}
