use std::sync::Arc;

use billiard_ledger::catalog_actor::{ProductActionResult, ProductError};
use billiard_ledger::clients::{CatalogClient, TableClient};
use billiard_ledger::clock::ManualClock;
use billiard_ledger::config::LedgerConfig;
use billiard_ledger::events::{EventBus, TableEvent};
use billiard_ledger::framework::mock::MockClient;
use billiard_ledger::framework::FrameworkError;
use billiard_ledger::model::{Money, Product, ProductSku, TableCreate, TableNumber, TableStatus};
use billiard_ledger::table_actor::{self, LedgerContext, TableError};
use chrono::{TimeZone, Utc};

/// Real table actor with a mocked catalog.
///
/// Exercises the AttachFromCatalog hook in isolation: the catalog's answers
/// are scripted, so the test controls exactly what the reservation returns.
fn spawn_tables(catalog: &MockClient<Product>, events: EventBus) -> (TableClient, tokio::task::JoinHandle<()>) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap());
    let ctx = LedgerContext::new(
        LedgerConfig::default(),
        Arc::new(clock),
        events,
        CatalogClient::new(catalog.client()),
    );
    let (actor, generic_client) = table_actor::new();
    let handle = tokio::spawn(actor.run(ctx));
    (TableClient::new(generic_client), handle)
}

fn beer(stock: u32) -> Product {
    Product::new(ProductSku::new("beer"), "Beer", Money::from_minor(500), stock)
}

#[tokio::test]
async fn test_attach_from_catalog_with_mocked_catalog() {
    let mut catalog = MockClient::<Product>::new();
    catalog
        .expect_action(ProductSku::new("beer"))
        .return_ok(ProductActionResult::ReserveStock(beer(9)));

    let events = EventBus::new(16);
    let mut rx = events.subscribe();
    let (tables, handle) = spawn_tables(&catalog, events);

    tables
        .add_table(TableCreate::new(1).with_status(TableStatus::Occupied))
        .await
        .unwrap();
    let table = tables
        .attach_from_catalog(TableNumber(1), ProductSku::new("beer"))
        .await
        .unwrap();

    assert_eq!(table.products.len(), 1);
    assert_eq!(table.products[0], beer(9).line_item());
    catalog.verify();

    let mut attached = false;
    while let Ok(event) = rx.try_recv() {
        attached |= matches!(event, TableEvent::ProductAttached { number: TableNumber(1), .. });
    }
    assert!(attached);

    drop(tables);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_catalog_refusal_leaves_table_unchanged() {
    let mut catalog = MockClient::<Product>::new();
    let shortage = ProductError::InsufficientStock {
        sku: ProductSku::new("beer"),
        requested: 1,
        available: 0,
    };
    catalog
        .expect_action(ProductSku::new("beer"))
        .return_err(FrameworkError::EntityError(Box::new(shortage.clone())));

    let (tables, handle) = spawn_tables(&catalog, EventBus::new(16));
    tables
        .add_table(TableCreate::new(1).with_status(TableStatus::Occupied))
        .await
        .unwrap();
    let before = tables.get_table(TableNumber(1)).await.unwrap();

    let err = tables
        .attach_from_catalog(TableNumber(1), ProductSku::new("beer"))
        .await
        .unwrap_err();
    assert_eq!(err, TableError::Catalog(shortage));
    assert_eq!(tables.get_table(TableNumber(1)).await.unwrap(), before);
    catalog.verify();

    drop(tables);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_idle_table_never_reaches_catalog() {
    // No expectations: a catalog request would surface as a Catalog error instead.
    let catalog = MockClient::<Product>::new();
    let (tables, handle) = spawn_tables(&catalog, EventBus::new(16));

    tables.add_table(TableCreate::new(2)).await.unwrap();
    let err = tables
        .attach_from_catalog(TableNumber(2), ProductSku::new("beer"))
        .await
        .unwrap_err();
    assert!(matches!(err, TableError::InvalidState { .. }));
    catalog.verify();

    drop(tables);
    handle.await.unwrap();
}
