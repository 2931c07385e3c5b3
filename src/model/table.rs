//! Billiard tables and the state of their current session.
//!
//! # Actor Framework
//! [`Table`] implements [`ActorEntity`](crate::framework::ActorEntity) and is
//! owned by the table [`ResourceActor`](crate::framework::ResourceActor). Callers
//! only ever see cloned snapshots; all mutation goes through the
//! [`TableClient`](crate::clients::TableClient).
//!
//! See [`impl ActorEntity for Table`](#impl-ActorEntity-for-Table) for:
//! - Creation parameters ([`TableCreate`])
//! - Update parameters ([`TableUpdate`])
//! - Session actions ([`TableAction`](crate::table_actor::TableAction))

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::model::Money;

/// Caller-assigned table number. Must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableNumber(pub u32);

impl From<u32> for TableNumber {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl Display for TableNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table_{}", self.0)
    }
}

/// Occupancy status of a table.
///
/// Any status may follow any other; the ledger never rejects a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Maintenance,
    Waiting,
}

impl TableStatus {
    pub const ALL: [TableStatus; 5] = [
        TableStatus::Available,
        TableStatus::Occupied,
        TableStatus::Reserved,
        TableStatus::Maintenance,
        TableStatus::Waiting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Maintenance => "maintenance",
            TableStatus::Waiting => "waiting",
        }
    }
}

impl Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown table status: '{s}'"))
    }
}

/// A product attached to a running session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            name: name.into(),
            unit_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub number: TableNumber,
    pub status: TableStatus,
    /// Empty unless the table is occupied.
    pub client_name: String,
    /// Set if and only if the table is occupied.
    pub started_at: Option<DateTime<Utc>>,
    /// Rate per configured tariff unit.
    pub tariff: Money,
    pub products: Vec<LineItem>,
}

impl Table {
    /// A fresh table with no session.
    pub fn new(number: TableNumber, tariff: Money) -> Self {
        Self {
            number,
            status: TableStatus::Available,
            client_name: String::new(),
            started_at: None,
            tariff,
            products: Vec::new(),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.status == TableStatus::Occupied
    }
}

/// Payload for adding a table to the registry.
#[derive(Debug, Clone)]
pub struct TableCreate {
    pub number: TableNumber,
    pub status: TableStatus,
    /// Falls back to the configured default tariff.
    pub tariff: Option<Money>,
}

impl TableCreate {
    pub fn new(number: u32) -> Self {
        Self {
            number: TableNumber(number),
            status: TableStatus::Available,
            tariff: None,
        }
    }

    pub fn with_status(mut self, status: TableStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_tariff(mut self, tariff: Money) -> Self {
        self.tariff = Some(tariff);
        self
    }
}

/// Payload for editing table attributes outside the status machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableUpdate {
    pub tariff: Option<Money>,
    /// Only accepted while the table is occupied.
    pub client_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in TableStatus::ALL {
            assert_eq!(status.to_string().parse::<TableStatus>(), Ok(status));
        }
        assert_eq!(" Occupied ".parse::<TableStatus>(), Ok(TableStatus::Occupied));
        assert!("broken".parse::<TableStatus>().is_err());
    }

    #[test]
    fn new_table_has_no_session() {
        let table = Table::new(TableNumber(3), Money::from_minor(1000));
        assert_eq!(table.status, TableStatus::Available);
        assert!(table.started_at.is_none());
        assert!(table.client_name.is_empty());
        assert!(table.products.is_empty());
        assert_eq!(table.number.to_string(), "table_3");
    }
}
