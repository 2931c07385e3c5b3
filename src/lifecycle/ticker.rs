//! # Bill Ticker
//!
//! Background task that keeps displayed costs current. Every interval it takes
//! one snapshot of the registry, computes the bill of each occupied table at
//! the ticker's clock time, and publishes a `BillRefreshed` event per table.
//!
//! The ticker only reads snapshots, so it can never corrupt table state. It
//! stops when its cancellation token fires or when the table actor is gone.
//! Other failures back off exponentially (interval × 2ⁿ, capped) and reset
//! on the next success.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clients::{ActorClient, TableClient};
use crate::clock::SharedClock;
use crate::events::{EventBus, TableEvent};
use crate::framework::FrameworkError;
use crate::model::{Bill, TariffUnit};

/// Upper bound on the delay between failed attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

pub struct BillTicker {
    tables: TableClient,
    clock: SharedClock,
    events: EventBus,
    unit: TariffUnit,
    interval: Duration,
    shutdown: CancellationToken,
}

impl BillTicker {
    pub fn new(
        tables: TableClient,
        clock: SharedClock,
        events: EventBus,
        unit: TariffUnit,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            tables,
            clock,
            events,
            unit,
            interval,
            shutdown,
        }
    }

    /// Recomputes and publishes once. Returns how many bills were published.
    pub async fn tick_once(&self) -> Result<usize, FrameworkError> {
        let snapshot = self.tables.inner().list().await?;
        let as_of = self.clock.now();

        let mut published = 0;
        for table in snapshot.iter().filter(|table| table.is_occupied()) {
            let bill = Bill::compute(table, as_of, self.unit);
            self.events.publish(TableEvent::BillRefreshed { bill });
            published += 1;
        }
        debug!(published, tables = snapshot.len(), "Bills refreshed");
        Ok(published)
    }

    fn delay(&self, failures: u32) -> Duration {
        if failures == 0 {
            return self.interval;
        }
        let factor = 1u32 << failures.min(16);
        self.interval
            .saturating_mul(factor)
            .min(MAX_BACKOFF.max(self.interval))
    }

    /// Runs until cancelled or until the table actor shuts down.
    pub async fn run(self) {
        info!(interval_ms = self.interval.as_millis() as u64, "Bill ticker started");
        let mut failures: u32 = 0;

        loop {
            let delay = self.delay(failures);
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Bill ticker shutting down");
                    break;
                }
                _ = tokio::time::sleep(delay) => {
                    match self.tick_once().await {
                        Ok(_) => {
                            if failures > 0 {
                                info!(failures, "Bill ticker recovered");
                            }
                            failures = 0;
                        }
                        Err(e) if e.is_disconnected() => {
                            info!("Table actor gone, bill ticker stopping: {e}");
                            break;
                        }
                        Err(e) => {
                            failures = failures.saturating_add(1);
                            warn!(
                                failures,
                                retry_in_ms = self.delay(failures).as_millis() as u64,
                                "Bill refresh failed: {e}"
                            );
                        }
                    }
                }
            }
        }

        info!("Bill ticker stopped");
    }
}
