//! # Catalog Actor
//!
//! Products the club sells to occupied tables, with their stock.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! The catalog has no dependencies, so it runs with `()` as its context:
//!
//! ```rust
//! use billiard_ledger::catalog_actor;
//! use billiard_ledger::clients::CatalogClient;
//! use billiard_ledger::model::{Money, ProductCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = catalog_actor::new();
//!     let catalog = CatalogClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let sku = catalog
//!         .add_product(ProductCreate::new("coffee", "Coffee", Money::from_minor(300), 20))
//!         .await?;
//!     let coffee = catalog.reserve_stock(sku, 1).await?;
//!     assert_eq!(coffee.stock, 19);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Product;

/// Creates a new catalog actor and its client.
pub fn new() -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(32)
}
