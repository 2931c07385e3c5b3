//! # Table Client
//!
//! The command interface of the ledger. Wraps a `ResourceClient<Table>` and
//! exposes registry operations and session operations as typed methods.
//! Callers hold only table numbers; every method returns a fresh snapshot.

use chrono::{DateTime, Utc};

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{
    Bill, ClubSummary, LineItem, Money, ProductSku, Table, TableCreate, TableNumber, TableStatus,
    TableUpdate,
};
use crate::table_actor::{TableAction, TableActionResult, TableError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the table actor.
#[derive(Clone)]
pub struct TableClient {
    inner: ResourceClient<Table>,
}

impl TableClient {
    pub fn new(inner: ResourceClient<Table>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Table> for TableClient {
    type Error = TableError;

    fn inner(&self) -> &ResourceClient<Table> {
        &self.inner
    }

    fn map_error(number: &TableNumber, e: FrameworkError) -> TableError {
        match e {
            FrameworkError::NotFound(_) => TableError::NotFound(*number),
            FrameworkError::AlreadyExists(_) => TableError::DuplicateTable(*number),
            e @ FrameworkError::EntityError(_) => e
                .downcast_entity::<TableError>()
                .unwrap_or_else(|other| TableError::ActorCommunication(other.to_string())),
            other => TableError::ActorCommunication(other.to_string()),
        }
    }
}

fn unexpected(result: TableActionResult) -> TableError {
    TableError::ActorCommunication(format!("unexpected action result: {result:?}"))
}

// Registry
impl TableClient {
    #[instrument(skip(self))]
    pub async fn add_table(&self, params: TableCreate) -> Result<TableNumber, TableError> {
        debug!("Sending request");
        let number = params.number;
        self.inner
            .create(params)
            .await
            .map_err(|e| Self::map_error(&number, e))
    }

    /// Removes the table subject to the configured removal policy and returns its last state.
    #[instrument(skip(self))]
    pub async fn remove_table(&self, number: TableNumber) -> Result<Table, TableError> {
        self.delete(number).await
    }

    #[instrument(skip(self))]
    pub async fn get_table(&self, number: TableNumber) -> Result<Table, TableError> {
        self.get(number).await?.ok_or(TableError::NotFound(number))
    }

    /// Snapshots of every table, in the order they were added.
    #[instrument(skip(self))]
    pub async fn list_tables(&self) -> Result<Vec<Table>, TableError> {
        self.list().await
    }

    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<ClubSummary, TableError> {
        let tables = self.list().await?;
        Ok(ClubSummary::from_tables(&tables))
    }

    /// Changes the tariff and/or renames the client of an occupied table.
    #[instrument(skip(self))]
    pub async fn update_table(
        &self,
        number: TableNumber,
        update: TableUpdate,
    ) -> Result<Table, TableError> {
        debug!("Sending request");
        self.inner
            .update(number, update)
            .await
            .map_err(|e| Self::map_error(&number, e))
    }
}

// Session ledger
impl TableClient {
    async fn action(
        &self,
        number: TableNumber,
        action: TableAction,
    ) -> Result<TableActionResult, TableError> {
        self.inner
            .perform_action(number, action)
            .await
            .map_err(|e| Self::map_error(&number, e))
    }

    /// Moves the table to `status`. Setting the current status again is a no-op.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        number: TableNumber,
        status: TableStatus,
    ) -> Result<Table, TableError> {
        match self.action(number, TableAction::SetStatus(status)).await? {
            TableActionResult::SetStatus(table) => Ok(table),
            other => Err(unexpected(other)),
        }
    }

    /// Attaches a free-form line item. Catalog stock is not touched.
    #[instrument(skip(self))]
    pub async fn attach_product(
        &self,
        number: TableNumber,
        name: &str,
        unit_price: Money,
    ) -> Result<Table, TableError> {
        let item = LineItem::new(name, unit_price);
        match self.action(number, TableAction::AttachProduct(item)).await? {
            TableActionResult::AttachProduct(table) => Ok(table),
            other => Err(unexpected(other)),
        }
    }

    /// Sells one unit of `sku` from the catalog to the table's session.
    #[instrument(skip(self))]
    pub async fn attach_from_catalog(
        &self,
        number: TableNumber,
        sku: ProductSku,
    ) -> Result<Table, TableError> {
        match self.action(number, TableAction::AttachFromCatalog(sku)).await? {
            TableActionResult::AttachFromCatalog(table) => Ok(table),
            other => Err(unexpected(other)),
        }
    }

    /// The bill as of `as_of`, or now when `None`. Never mutates the table.
    #[instrument(skip(self))]
    pub async fn compute_bill(
        &self,
        number: TableNumber,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Bill, TableError> {
        match self.action(number, TableAction::ComputeBill { as_of }).await? {
            TableActionResult::ComputeBill(bill) => Ok(bill),
            other => Err(unexpected(other)),
        }
    }

    /// Closes the session and returns the bill captured just before it was cleared.
    #[instrument(skip(self))]
    pub async fn end_session_with_receipt(
        &self,
        number: TableNumber,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Bill, TableError> {
        match self.action(number, TableAction::EndSession { as_of }).await? {
            TableActionResult::EndSession(bill) => Ok(bill),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};
    use chrono::TimeZone;

    #[tokio::test]
    async fn compute_bill_forwards_as_of() {
        let (client, mut receiver) = create_mock_client::<Table>(10);
        let tables = TableClient::new(client);
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 19, 0, 0).unwrap();

        let task = tokio::spawn(async move { tables.compute_bill(TableNumber(5), Some(at)).await });

        let (number, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(number, TableNumber(5));
        match action {
            TableAction::ComputeBill { as_of } => assert_eq!(as_of, Some(at)),
            other => panic!("Expected ComputeBill, got {other:?}"),
        }
        let bill = Bill::compute(&Table::new(TableNumber(5), Money::zero()), at, Default::default());
        responder
            .send(Ok(TableActionResult::ComputeBill(bill.clone())))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), bill);
    }

    #[tokio::test]
    async fn duplicate_add_maps_to_duplicate_table() {
        let mut mock = MockClient::<Table>::new();
        mock.expect_create()
            .return_err(FrameworkError::AlreadyExists("table_7".into()));

        let tables = TableClient::new(mock.client());
        let err = tables.add_table(TableCreate::new(7)).await.unwrap_err();
        assert_eq!(err, TableError::DuplicateTable(TableNumber(7)));
        mock.verify();
    }

    #[tokio::test]
    async fn entity_errors_come_back_typed() {
        let mut mock = MockClient::<Table>::new();
        let refusal = TableError::InvalidState {
            number: TableNumber(2),
            status: TableStatus::Available,
            operation: "attach a product to",
        };
        mock.expect_action(TableNumber(2))
            .return_err(FrameworkError::EntityError(Box::new(refusal.clone())));

        let tables = TableClient::new(mock.client());
        let err = tables
            .attach_product(TableNumber(2), "Coffee", Money::from_minor(300))
            .await
            .unwrap_err();
        assert_eq!(err, refusal);
    }

    #[tokio::test]
    async fn get_and_remove_missing_table() {
        let mut mock = MockClient::<Table>::new();
        mock.expect_get(TableNumber(9)).return_ok(None);
        mock.expect_delete(TableNumber(9))
            .return_err(FrameworkError::NotFound("table_9".into()));

        let tables = TableClient::new(mock.client());
        assert_eq!(
            tables.get_table(TableNumber(9)).await.unwrap_err(),
            TableError::NotFound(TableNumber(9))
        );
        assert_eq!(
            tables.remove_table(TableNumber(9)).await.unwrap_err(),
            TableError::NotFound(TableNumber(9))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn summary_counts_listed_tables() {
        let mut mock = MockClient::<Table>::new();
        let mut busy = Table::new(TableNumber(1), Money::zero());
        busy.status = TableStatus::Occupied;
        mock.expect_list()
            .return_ok(vec![busy, Table::new(TableNumber(2), Money::zero())]);

        let summary = TableClient::new(mock.client()).summary().await.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.occupied, 1);
        assert_eq!(summary.available, 1);
    }
}
