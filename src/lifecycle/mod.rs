//! # System Lifecycle
//!
//! Starting, wiring and stopping the ledger.
//!
//! - [`ClubSystem`] creates the catalog and table actors, injects the table
//!   actor's [`LedgerContext`](crate::table_actor::LedgerContext) at `run()`
//!   time, and starts the [`BillTicker`].
//! - Shutdown cancels the ticker first, then drops clients so each actor's
//!   channel closes: tables before the catalog, since the table actor holds a
//!   catalog client.
//! - [`setup_tracing`] initializes logging for the binary.

pub mod club_system;
pub mod ticker;
pub mod tracing;

pub use self::club_system::*;
pub use self::ticker::*;
pub use self::tracing::*;
