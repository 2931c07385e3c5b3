//! Error types for the catalog actor.

use thiserror::Error;

use crate::model::ProductSku;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ProductSku),

    #[error("Product already exists: {0}")]
    AlreadyExists(ProductSku),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for {sku}: requested {requested}, available {available}")]
    InsufficientStock {
        sku: ProductSku,
        requested: u32,
        available: u32,
    },

    #[error("Product validation error: {0}")]
    Validation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunication(msg)
    }
}
