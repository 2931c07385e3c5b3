use std::path::PathBuf;

use billiard_ledger::config::LedgerConfig;
use billiard_ledger::events::TableEvent;
use billiard_ledger::lifecycle::{setup_tracing, ClubSystem};
use billiard_ledger::model::{Money, ProductCreate, ProductSku, TableCreate, TableNumber, TableStatus};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = LedgerConfig::load(config_path.as_deref()).map_err(|e| e.to_string())?;
    info!(?config, "Configuration loaded");

    let system = ClubSystem::new(config).map_err(|e| e.to_string())?;

    let mut events = system.subscribe();
    let listener = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                TableEvent::BillRefreshed { bill } => {
                    info!(table = %bill.table, total = %bill.total_cost, "Running bill");
                }
                other => info!(event = ?other, "Event"),
            }
        }
    });

    // Catalog
    for (sku, name, price, stock) in [
        ("coffee", "Coffee", 300, 20),
        ("beer", "Beer", 500, 24),
        ("snacks", "Snacks", 250, 10),
    ] {
        system
            .catalog
            .add_product(ProductCreate::new(sku, name, Money::from_minor(price), stock))
            .await
            .map_err(|e| e.to_string())?;
    }

    // Tables
    for number in 1..=4 {
        system
            .tables
            .add_table(TableCreate::new(number))
            .await
            .map_err(|e| e.to_string())?;
    }

    let table = TableNumber(1);
    let receipt = async {
        system
            .tables
            .set_status(table, TableStatus::Occupied)
            .await?;
        system
            .tables
            .attach_from_catalog(table, ProductSku::new("beer"))
            .await?;
        system
            .tables
            .attach_product(table, "Water", Money::from_minor(150))
            .await?;

        tokio::time::sleep(system.config.recompute_interval() * 2).await;

        system.tables.end_session_with_receipt(table, None).await
    }
    .instrument(tracing::info_span!("session", %table))
    .await
    .map_err(|e| e.to_string())?;

    info!(
        elapsed_secs = receipt.elapsed_secs,
        time = %receipt.time_cost,
        products = %receipt.products_cost,
        total = %receipt.total_cost,
        "Receipt"
    );

    let summary = system.tables.summary().await.map_err(|e| e.to_string())?;
    info!(?summary, "Club summary");

    system.shutdown().await?;
    listener.abort();
    Ok(())
}
