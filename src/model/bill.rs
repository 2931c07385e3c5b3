//! Bills derived from a table snapshot.
//!
//! A [`Bill`] is never stored; it is recomputed from `(status, started_at,
//! tariff, products)` each time someone asks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::model::{Money, Table, TableNumber};

/// The unit of time a tariff is quoted in. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffUnit {
    PerMinute,
    #[default]
    PerHour,
}

impl TariffUnit {
    /// Length of one tariff unit in seconds.
    pub const fn seconds(&self) -> i64 {
        match self {
            TariffUnit::PerMinute => 60,
            TariffUnit::PerHour => 3600,
        }
    }
}

impl Display for TariffUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TariffUnit::PerMinute => write!(f, "per_minute"),
            TariffUnit::PerHour => write!(f, "per_hour"),
        }
    }
}

impl FromStr for TariffUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per_minute" | "minute" | "perminute" => Ok(TariffUnit::PerMinute),
            "per_hour" | "hour" | "perhour" => Ok(TariffUnit::PerHour),
            other => Err(format!(
                "Unknown tariff unit: '{other}'. Valid options: per_minute, per_hour"
            )),
        }
    }
}

/// Running or final cost of a table session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub table: TableNumber,
    pub as_of: DateTime<Utc>,
    /// Whole seconds billed. Zero when no session is running.
    pub elapsed_secs: u64,
    pub time_cost: Money,
    pub products_cost: Money,
    pub total_cost: Money,
}

impl Bill {
    /// Computes the bill for `table` at `as_of`.
    ///
    /// Time accrues only while the table is occupied. A clock that reads
    /// earlier than the session start yields zero elapsed time, never a
    /// negative charge.
    pub fn compute(table: &Table, as_of: DateTime<Utc>, unit: TariffUnit) -> Bill {
        let products_cost: Money = table.products.iter().map(|item| item.unit_price).sum();

        let elapsed_secs = match table.started_at {
            Some(start) if table.is_occupied() => (as_of - start).num_seconds().max(0),
            _ => 0,
        };
        let time_cost = table.tariff.prorate(elapsed_secs, unit.seconds());

        Bill {
            table: table.number,
            as_of,
            elapsed_secs: elapsed_secs as u64,
            time_cost,
            products_cost,
            total_cost: time_cost + products_cost,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs(self.elapsed_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, TableStatus};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap()
    }

    fn occupied_table() -> Table {
        let mut table = Table::new(TableNumber(5), Money::from_minor(1000));
        table.status = TableStatus::Occupied;
        table.client_name = "Guest".into();
        table.started_at = Some(t0());
        table.products = vec![
            LineItem::new("Beer", Money::from_minor(500)),
            LineItem::new("Water", Money::from_minor(150)),
        ];
        table
    }

    #[test]
    fn one_hour_at_hourly_tariff() {
        let bill = Bill::compute(
            &occupied_table(),
            t0() + chrono::Duration::seconds(3600),
            TariffUnit::PerHour,
        );
        assert_eq!(bill.elapsed(), Duration::from_secs(3600));
        assert_eq!(bill.time_cost, Money::from_minor(1000));
        assert_eq!(bill.products_cost, Money::from_minor(650));
        assert_eq!(bill.total_cost, Money::from_minor(1650));
    }

    #[test]
    fn per_minute_unit_scales_rate() {
        let mut table = occupied_table();
        table.tariff = Money::from_minor(20);
        table.products.clear();
        let bill = Bill::compute(&table, t0() + chrono::Duration::minutes(90), TariffUnit::PerMinute);
        assert_eq!(bill.time_cost, Money::from_minor(1800));
        assert_eq!(bill.total_cost, Money::from_minor(1800));
    }

    #[test]
    fn clock_skew_clamps_to_zero() {
        let bill = Bill::compute(
            &occupied_table(),
            t0() - chrono::Duration::seconds(30),
            TariffUnit::PerHour,
        );
        assert_eq!(bill.elapsed_secs, 0);
        assert_eq!(bill.time_cost, Money::zero());
        assert_eq!(bill.total_cost, Money::from_minor(650));
    }

    #[test]
    fn idle_table_bills_products_only() {
        let mut table = occupied_table();
        table.status = TableStatus::Maintenance;
        table.started_at = None;
        let bill = Bill::compute(&table, t0() + chrono::Duration::hours(5), TariffUnit::PerHour);
        assert_eq!(bill.elapsed_secs, 0);
        assert_eq!(bill.time_cost, Money::zero());
        assert_eq!(bill.total_cost, Money::from_minor(650));
    }

    #[test]
    fn same_instant_gives_same_bill() {
        let table = occupied_table();
        let at = t0() + chrono::Duration::seconds(1234);
        assert_eq!(
            Bill::compute(&table, at, TariffUnit::PerHour),
            Bill::compute(&table, at, TariffUnit::PerHour)
        );
    }

    #[test]
    fn tariff_unit_parsing() {
        assert_eq!("per_minute".parse::<TariffUnit>(), Ok(TariffUnit::PerMinute));
        assert_eq!("Hour".parse::<TariffUnit>(), Ok(TariffUnit::PerHour));
        assert!("fortnight".parse::<TariffUnit>().is_err());
    }
}
