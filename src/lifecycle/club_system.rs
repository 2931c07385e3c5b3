use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::clients::{CatalogClient, TableClient};
use crate::clock::{SharedClock, SystemClock};
use crate::config::{ConfigError, LedgerConfig};
use crate::events::{EventBus, TableEvent};
use crate::lifecycle::ticker::BillTicker;
use crate::table_actor::LedgerContext;

/// The runtime orchestrator for the club ledger.
///
/// Starts the catalog actor, the table actor (with the catalog client, clock
/// and event bus injected as its context) and the bill ticker, and shuts them
/// down in dependency order.
///
/// # Example
///
/// ```ignore
/// let system = ClubSystem::new(LedgerConfig::load(None)?)?;
/// system.tables.add_table(TableCreate::new(1)).await?;
/// system.tables.set_status(TableNumber(1), TableStatus::Occupied).await?;
/// system.shutdown().await?;
/// ```
pub struct ClubSystem {
    pub tables: TableClient,
    pub catalog: CatalogClient,
    pub events: EventBus,
    pub clock: SharedClock,
    pub config: LedgerConfig,
    shutdown: CancellationToken,
    ticker_handle: JoinHandle<()>,
    table_handle: JoinHandle<()>,
    catalog_handle: JoinHandle<()>,
}

impl ClubSystem {
    /// Starts the system on the system clock. Must be called inside a tokio runtime.
    pub fn new(config: LedgerConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Starts the system on `clock`.
    pub fn with_clock(config: LedgerConfig, clock: SharedClock) -> Result<Self, ConfigError> {
        config.validate()?;
        let events = EventBus::new(config.event_capacity);

        // 1. Create actors (no dependencies yet)
        let (catalog_actor, catalog_client) = crate::catalog_actor::new();
        let (table_actor, table_client) = crate::table_actor::new();
        let catalog = CatalogClient::new(catalog_client);
        let tables = TableClient::new(table_client);

        // 2. Start actors with injected context
        let catalog_handle = tokio::spawn(catalog_actor.run(()));
        let context = LedgerContext::new(config.clone(), clock.clone(), events.clone(), catalog.clone());
        let table_handle = tokio::spawn(table_actor.run(context));

        // 3. Start the ticker on a token owned by the system
        let shutdown = CancellationToken::new();
        let ticker = BillTicker::new(
            tables.clone(),
            clock.clone(),
            events.clone(),
            config.tariff_unit,
            config.recompute_interval(),
            shutdown.clone(),
        );
        let ticker_handle = tokio::spawn(ticker.run());

        info!(
            tariff_unit = %config.tariff_unit,
            removal_policy = %config.removal_policy,
            "Club system started"
        );

        Ok(Self {
            tables,
            catalog,
            events,
            clock,
            config,
            shutdown,
            ticker_handle,
            table_handle,
            catalog_handle,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TableEvent> {
        self.events.subscribe()
    }

    /// Gracefully shuts down the ticker, then the table actor, then the catalog.
    ///
    /// Actors stop once every client clone is dropped, so callers must drop
    /// their own clones first or this waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down club system...");

        self.shutdown.cancel();
        await_task("bill ticker", self.ticker_handle).await?;

        // The table actor holds a catalog client in its context, so it goes first.
        drop(self.tables);
        await_task("table actor", self.table_handle).await?;

        drop(self.catalog);
        await_task("catalog actor", self.catalog_handle).await?;

        info!("Club system shutdown complete.");
        Ok(())
    }
}

async fn await_task(name: &str, handle: JoinHandle<()>) -> Result<(), String> {
    handle.await.map_err(|e| {
        error!(task = name, "Task failed: {e:?}");
        format!("{name} failed: {e:?}")
    })
}
