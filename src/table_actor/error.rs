//! Error types for the table actor.

use thiserror::Error;

use crate::catalog_actor::ProductError;
use crate::model::{TableNumber, TableStatus};

/// Errors that can occur during registry and session operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Table not found: {0}")]
    NotFound(TableNumber),

    #[error("Table already exists: {0}")]
    DuplicateTable(TableNumber),

    /// The operation needs the table in another status.
    #[error("Cannot {operation} {number} while it is {status}")]
    InvalidState {
        number: TableNumber,
        status: TableStatus,
        operation: &'static str,
    },

    #[error("Table validation error: {0}")]
    Validation(String),

    /// The catalog refused to hand out the product.
    #[error("Catalog error: {0}")]
    Catalog(#[from] ProductError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for TableError {
    fn from(msg: String) -> Self {
        TableError::ActorCommunication(msg)
    }
}
