//! # Billiard Ledger
//!
//! The table session lifecycle and billing core of a billiard club.
//!
//! It decides when a table may move between statuses, how elapsed time and
//! attached products add up to a bill, and keeps displayed costs current from
//! a cancellable background task without ever touching table state.
//!
//! ## Architecture
//!
//! All table state is owned by a single actor task. Every registry and
//! session operation is one message, processed strictly in order, so a bill
//! always sees `(status, started_at, tariff, products)` as one consistent
//! snapshot. A failed operation runs against a draft copy that is thrown
//! away, so nothing is ever half-applied.
//!
//! ## Module Tour
//!
//! ### The Engine ([`framework`])
//! The generic [`ResourceActor`](framework::ResourceActor), the
//! [`ActorEntity`](framework::ActorEntity) trait, and [`framework::mock`]
//! for testing without a running actor.
//!
//! ### The Data ([`model`])
//! [`Table`](model::Table), [`Product`](model::Product), fixed-point
//! [`Money`](model::Money), and the derived [`Bill`](model::Bill) and
//! [`ClubSummary`](model::ClubSummary).
//!
//! ### The Actors ([`table_actor`], [`catalog_actor`])
//! The registry and session state machine, and the product catalog with stock.
//!
//! ### The Interface ([`clients`])
//! [`TableClient`](clients::TableClient) and
//! [`CatalogClient`](clients::CatalogClient), the typed command API. Errors
//! come back as [`TableError`](table_actor::TableError) and
//! [`ProductError`](catalog_actor::ProductError).
//!
//! ### The Orchestrator ([`lifecycle`])
//! [`ClubSystem`](lifecycle::ClubSystem) wires everything together and runs
//! the [`BillTicker`](lifecycle::BillTicker).
//!
//! ### Ambient pieces
//! [`config`] for deployment settings, [`clock`] for an injectable time
//! source, and [`events`] for the notifications the presentation layer
//! subscribes to.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run -- ledger.toml
//! ```

pub mod catalog_actor;
pub mod clients;
pub mod clock;
pub mod config;
pub mod events;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod table_actor;
