//! Session operations on a [`Table`](crate::model::Table).
//!
//! These are handled by the table's
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action).

use chrono::{DateTime, Utc};

use crate::model::{Bill, LineItem, ProductSku, Table, TableStatus};

#[derive(Debug, Clone)]
pub enum TableAction {
    /// Moves the table to another status. Never rejected.
    SetStatus(TableStatus),
    /// Appends a line item to a running session.
    AttachProduct(LineItem),
    /// Sells one unit of a catalog product to a running session.
    AttachFromCatalog(ProductSku),
    /// Bill as of `as_of`, or as of the ledger clock when `None`.
    ComputeBill { as_of: Option<DateTime<Utc>> },
    /// Captures the final bill, then makes the table available.
    EndSession { as_of: Option<DateTime<Utc>> },
}

/// Results from TableActions - variants match 1:1 with TableAction
#[derive(Debug, Clone)]
pub enum TableActionResult {
    SetStatus(Table),
    AttachProduct(Table),
    AttachFromCatalog(Table),
    ComputeBill(Bill),
    EndSession(Bill),
}
