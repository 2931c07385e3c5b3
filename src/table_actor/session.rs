//! The session state machine, as plain mutations on a [`Table`].
//!
//! Nothing here talks to the clock, the catalog or the event bus; the entity
//! hooks pass the current time in and publish whatever the mutation reports.

use chrono::{DateTime, Utc};

use super::error::TableError;
use crate::model::{LineItem, Money, Table, TableStatus};

/// A status change as seen by [`Table::apply_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: TableStatus,
    pub to: TableStatus,
}

impl Transition {
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }

    /// Leaving `Occupied` to `Available` closes the session for billing.
    pub fn closes_session(&self) -> bool {
        self.from == TableStatus::Occupied && self.to == TableStatus::Available
    }
}

impl Table {
    /// Moves the table to `to`, keeping `started_at` and `client_name` in step
    /// with the status.
    ///
    /// - Same status: nothing changes, a running session keeps its start time.
    /// - Into `Occupied`: the session starts at `now`; attached products stay.
    /// - Into `Available`: session data and attached products are cleared.
    /// - Anything else: session data is cleared, products are kept.
    pub fn apply_status(
        &mut self,
        to: TableStatus,
        now: DateTime<Utc>,
        default_client_name: &str,
    ) -> Transition {
        let transition = Transition {
            from: self.status,
            to,
        };
        if !transition.is_change() {
            return transition;
        }

        match to {
            TableStatus::Occupied => {
                self.started_at = Some(now);
                if self.client_name.trim().is_empty() {
                    self.client_name = default_client_name.to_string();
                }
            }
            TableStatus::Available => {
                self.started_at = None;
                self.client_name.clear();
                self.products.clear();
            }
            TableStatus::Reserved | TableStatus::Maintenance | TableStatus::Waiting => {
                self.started_at = None;
                self.client_name.clear();
            }
        }
        self.status = to;
        transition
    }

    pub fn require_occupied(&self, operation: &'static str) -> Result<(), TableError> {
        if self.is_occupied() {
            Ok(())
        } else {
            Err(TableError::InvalidState {
                number: self.number,
                status: self.status,
                operation,
            })
        }
    }

    /// Appends `item` to the running session.
    pub fn attach(&mut self, item: LineItem) -> Result<(), TableError> {
        self.require_occupied("attach a product to")?;
        if item.name.trim().is_empty() {
            return Err(TableError::Validation("product name must not be empty".into()));
        }
        if item.unit_price.is_negative() {
            return Err(TableError::Validation(format!(
                "unit price must not be negative, got {}",
                item.unit_price
            )));
        }
        let products_cost = self
            .products
            .iter()
            .try_fold(item.unit_price, |total, line| total.checked_add(line.unit_price));
        if products_cost.is_none() {
            return Err(TableError::Validation(format!(
                "attaching {} at {} exceeds the largest representable bill",
                item.name, item.unit_price
            )));
        }
        self.products.push(item);
        Ok(())
    }

    pub fn set_tariff(&mut self, tariff: Money) -> Result<(), TableError> {
        if tariff.is_negative() {
            return Err(TableError::Validation(format!(
                "tariff must not be negative, got {tariff}"
            )));
        }
        self.tariff = tariff;
        Ok(())
    }

    pub fn rename_client(&mut self, name: String) -> Result<(), TableError> {
        self.require_occupied("rename the client of")?;
        if name.trim().is_empty() {
            return Err(TableError::Validation("client name must not be empty".into()));
        }
        self.client_name = name;
        Ok(())
    }

    /// Invariant check used by tests: a start time exists exactly while occupied.
    pub fn session_is_consistent(&self) -> bool {
        self.is_occupied() == self.started_at.is_some()
            && self.is_occupied() == !self.client_name.is_empty()
    }
}
