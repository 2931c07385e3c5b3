//! # Catalog Client
//!
//! High-level API for the catalog actor. Wraps a `ResourceClient<Product>`
//! and turns stock actions into typed methods.

use crate::catalog_actor::{ProductAction, ProductActionResult, ProductError};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductSku, ProductUpdate};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for CatalogClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(sku: &ProductSku, e: FrameworkError) -> ProductError {
        match e {
            FrameworkError::NotFound(_) => ProductError::NotFound(sku.clone()),
            FrameworkError::AlreadyExists(_) => ProductError::AlreadyExists(sku.clone()),
            e @ FrameworkError::EntityError(_) => e
                .downcast_entity::<ProductError>()
                .unwrap_or_else(|other| ProductError::ActorCommunication(other.to_string())),
            other => ProductError::ActorCommunication(other.to_string()),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunication(format!("unexpected action result: {result:?}"))
}

impl CatalogClient {
    #[instrument(skip(self))]
    pub async fn add_product(&self, params: ProductCreate) -> Result<ProductSku, ProductError> {
        debug!("Sending request");
        let sku = params.sku.clone();
        self.inner
            .create(params)
            .await
            .map_err(|e| Self::map_error(&sku, e))
    }

    /// Like [`ActorClient::get`], but a missing product is an error.
    #[instrument(skip(self))]
    pub async fn get_product(&self, sku: ProductSku) -> Result<Product, ProductError> {
        self.get(sku.clone())
            .await?
            .ok_or(ProductError::NotFound(sku))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.list().await
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        sku: ProductSku,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(sku.clone(), update)
            .await
            .map_err(|e| Self::map_error(&sku, e))
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, sku: ProductSku) -> Result<Product, ProductError> {
        self.delete(sku).await
    }

    async fn action(
        &self,
        sku: ProductSku,
        action: ProductAction,
    ) -> Result<ProductActionResult, ProductError> {
        self.inner
            .perform_action(sku.clone(), action)
            .await
            .map_err(|e| Self::map_error(&sku, e))
    }

    /// Current stock level.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, sku: ProductSku) -> Result<u32, ProductError> {
        debug!("Checking stock");
        match self.action(sku, ProductAction::CheckStock).await? {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `quantity` units out of stock and returns the product as it is afterwards.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, sku: ProductSku, quantity: u32) -> Result<Product, ProductError> {
        debug!("Reserving stock");
        match self.action(sku, ProductAction::ReserveStock(quantity)).await? {
            ProductActionResult::ReserveStock(product) => Ok(product),
            other => Err(unexpected(other)),
        }
    }

    /// Adds `quantity` units and returns the new stock level.
    #[instrument(skip(self))]
    pub async fn restock(&self, sku: ProductSku, quantity: u32) -> Result<u32, ProductError> {
        debug!("Restocking");
        match self.action(sku, ProductAction::Restock(quantity)).await? {
            ProductActionResult::Restock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};
    use crate::model::Money;

    fn beer(stock: u32) -> Product {
        Product::new(ProductSku::new("beer"), "Beer", Money::from_minor(500), stock)
    }

    #[tokio::test]
    async fn check_stock_returns_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let catalog = CatalogClient::new(client);

        let task = tokio::spawn(async move { catalog.check_stock(ProductSku::new("beer")).await });

        let (sku, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(sku, ProductSku::new("beer"));
        assert!(matches!(action, ProductAction::CheckStock));
        responder.send(Ok(ProductActionResult::CheckStock(42))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn reserve_stock_recovers_typed_error() {
        let mut mock = MockClient::<Product>::new();
        let shortage = ProductError::InsufficientStock {
            sku: ProductSku::new("beer"),
            requested: 3,
            available: 1,
        };
        mock.expect_action(ProductSku::new("beer"))
            .return_err(FrameworkError::EntityError(Box::new(shortage.clone())));

        let catalog = CatalogClient::new(mock.client());
        let err = catalog
            .reserve_stock(ProductSku::new("beer"), 3)
            .await
            .unwrap_err();

        assert_eq!(err, shortage);
        mock.verify();
    }

    #[tokio::test]
    async fn framework_not_found_maps_to_sku() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductSku::new("tea"))
            .return_err(FrameworkError::NotFound("product_tea".into()));

        let catalog = CatalogClient::new(mock.client());
        let err = catalog
            .reserve_stock(ProductSku::new("tea"), 1)
            .await
            .unwrap_err();
        assert_eq!(err, ProductError::NotFound(ProductSku::new("tea")));
    }

    #[tokio::test]
    async fn get_product_treats_missing_as_error() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductSku::new("beer")).return_ok(Some(beer(4)));
        mock.expect_get(ProductSku::new("tea")).return_ok(None);

        let catalog = CatalogClient::new(mock.client());
        assert_eq!(catalog.get_product("beer".into()).await.unwrap().stock, 4);
        assert_eq!(
            catalog.get_product("tea".into()).await.unwrap_err(),
            ProductError::NotFound(ProductSku::new("tea"))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Product>(1);
        drop(receiver);

        let err = CatalogClient::new(client)
            .restock(ProductSku::new("beer"), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::ActorCommunication(_)));
    }
}
