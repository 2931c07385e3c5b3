//! Catalog products sold to occupied tables.
//!
//! [`Product`] implements [`ActorEntity`](crate::framework::ActorEntity); see
//! [`catalog_actor`](crate::catalog_actor) for its actions.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::model::{LineItem, Money};

/// Caller-assigned stock keeping unit, e.g. `"beer"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductSku(pub String);

impl ProductSku {
    pub fn new(sku: impl Into<String>) -> Self {
        Self(sku.into())
    }
}

impl From<&str> for ProductSku {
    fn from(sku: &str) -> Self {
        Self(sku.to_string())
    }
}

impl Display for ProductSku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku: ProductSku,
    pub name: String,
    pub unit_price: Money,
    pub stock: u32,
}

impl Product {
    pub fn new(sku: ProductSku, name: impl Into<String>, unit_price: Money, stock: u32) -> Self {
        Self {
            sku,
            name: name.into(),
            unit_price,
            stock,
        }
    }

    /// What gets attached to a table when one unit is sold.
    pub fn line_item(&self) -> LineItem {
        LineItem::new(self.name.clone(), self.unit_price)
    }
}

/// DTO for adding a product to the catalog.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub sku: ProductSku,
    pub name: String,
    pub unit_price: Money,
    pub stock: u32,
}

impl ProductCreate {
    pub fn new(sku: impl Into<ProductSku>, name: impl Into<String>, unit_price: Money, stock: u32) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            unit_price,
            stock,
        }
    }
}

/// DTO for product updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub unit_price: Option<Money>,
    pub stock: Option<u32>,
}
