//! [`ActorEntity`] implementation for [`Product`].

use async_trait::async_trait;
use tracing::debug;

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Money, Product, ProductCreate, ProductSku, ProductUpdate};

fn check_price(price: Money) -> Result<(), ProductError> {
    if price.is_negative() {
        return Err(ProductError::Validation(format!(
            "unit price must not be negative, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductSku;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn id(&self) -> ProductSku {
        self.sku.clone()
    }

    fn from_create_params(params: ProductCreate, _ctx: &()) -> Result<Self, ProductError> {
        if params.sku.0.trim().is_empty() {
            return Err(ProductError::Validation("sku must not be empty".into()));
        }
        if params.name.trim().is_empty() {
            return Err(ProductError::Validation("name must not be empty".into()));
        }
        check_price(params.unit_price)?;
        Ok(Product::new(params.sku, params.name, params.unit_price, params.stock))
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        if let Some(price) = update.unit_price {
            check_price(price)?;
            self.unit_price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::ReserveStock(0) => {
                Err(ProductError::Validation("cannot reserve zero units".into()))
            }
            ProductAction::ReserveStock(quantity) => {
                if self.stock < quantity {
                    return Err(ProductError::InsufficientStock {
                        sku: self.sku.clone(),
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                debug!(sku = %self.sku, quantity, left = self.stock, "Stock reserved");
                Ok(ProductActionResult::ReserveStock(self.clone()))
            }
            ProductAction::Restock(quantity) => {
                self.stock = self.stock.checked_add(quantity).ok_or_else(|| {
                    ProductError::Validation(format!("restocking {quantity} units overflows stock"))
                })?;
                Ok(ProductActionResult::Restock(self.stock))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beer(stock: u32) -> Product {
        Product::from_create_params(
            ProductCreate::new("beer", "Beer", Money::from_minor(500), stock),
            &(),
        )
        .unwrap()
    }

    #[test]
    fn create_rejects_blank_name_and_negative_price() {
        let blank = ProductCreate::new("x", " ", Money::zero(), 1);
        assert!(matches!(
            Product::from_create_params(blank, &()),
            Err(ProductError::Validation(_))
        ));

        let negative = ProductCreate::new("x", "X", Money::from_minor(-5), 1);
        assert!(matches!(
            Product::from_create_params(negative, &()),
            Err(ProductError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn reserve_decrements_and_reports_shortage() {
        let mut product = beer(2);

        let result = product
            .handle_action(ProductAction::ReserveStock(2), &())
            .await
            .unwrap();
        assert!(matches!(result, ProductActionResult::ReserveStock(p) if p.stock == 0));

        let err = product
            .handle_action(ProductAction::ReserveStock(1), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                sku: ProductSku::new("beer"),
                requested: 1,
                available: 0,
            }
        );
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn restock_adds_units() {
        let mut product = beer(1);
        let result = product
            .handle_action(ProductAction::Restock(4), &())
            .await
            .unwrap();
        assert!(matches!(result, ProductActionResult::Restock(5)));

        let overflow = product
            .handle_action(ProductAction::Restock(u32::MAX), &())
            .await;
        assert!(matches!(overflow, Err(ProductError::Validation(_))));
    }
}
