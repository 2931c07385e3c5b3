//! Fire-and-forget notifications for the presentation layer.
//!
//! The ledger publishes a [`TableEvent`] whenever something a screen might be
//! showing changes. Publishing never blocks and never fails: with no
//! subscribers the event is simply dropped, and a subscriber that falls behind
//! sees `RecvError::Lagged` and should re-read the registry.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use crate::model::{Bill, LineItem, TableNumber, TableStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    TableAdded {
        number: TableNumber,
    },
    /// Lets collaborators drop any selection pointing at this table.
    TableRemoved {
        number: TableNumber,
    },
    StatusChanged {
        number: TableNumber,
        from: TableStatus,
        to: TableStatus,
    },
    ProductAttached {
        number: TableNumber,
        item: LineItem,
    },
    /// Periodic recompute for an occupied table.
    BillRefreshed {
        bill: Bill,
    },
    /// Final bill of a session, published right before its data is cleared.
    SessionClosed {
        bill: Bill,
    },
}

impl TableEvent {
    pub fn number(&self) -> TableNumber {
        match self {
            TableEvent::TableAdded { number }
            | TableEvent::TableRemoved { number }
            | TableEvent::StatusChanged { number, .. }
            | TableEvent::ProductAttached { number, .. } => *number,
            TableEvent::BillRefreshed { bill } | TableEvent::SessionClosed { bill } => bill.table,
        }
    }
}

/// Cloneable publisher over a broadcast channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<TableEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TableEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: TableEvent) {
        // Err only means nobody is listening right now.
        let receivers = self.sender.send(event).unwrap_or(0);
        trace!(receivers, "Event published");
    }
}
