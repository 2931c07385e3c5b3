//! Stock operations on a catalog [`Product`](crate::model::Product).

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the stock level without modifying it.
    CheckStock,
    /// Takes units out of stock.
    ///
    /// Fails with `InsufficientStock` if the requested amount exceeds the
    /// stock, leaving the stock untouched.
    ReserveStock(u32),
    /// Puts units back into stock.
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    CheckStock(u32),
    /// Snapshot of the product after the reservation.
    ReserveStock(crate::model::Product),
    /// Stock level after restocking.
    Restock(u32),
}
