use serde::{Deserialize, Serialize};

use crate::model::{Table, TableStatus};

/// Headline counts for the club dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubSummary {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub reserved: usize,
    pub maintenance: usize,
    pub waiting: usize,
    /// Line items currently attached across all tables.
    pub products_attached: usize,
}

impl ClubSummary {
    pub fn from_tables<'a>(tables: impl IntoIterator<Item = &'a Table>) -> Self {
        tables.into_iter().fold(Self::default(), |mut summary, table| {
            summary.total += 1;
            summary.products_attached += table.products.len();
            match table.status {
                TableStatus::Available => summary.available += 1,
                TableStatus::Occupied => summary.occupied += 1,
                TableStatus::Reserved => summary.reserved += 1,
                TableStatus::Maintenance => summary.maintenance += 1,
                TableStatus::Waiting => summary.waiting += 1,
            }
            summary
        })
    }
}
