//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter driven by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); the actor loop
//! tags its lines with `entity_type` and client methods open an
//! `#[instrument]` span per call instead.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle, state changes, refusals
//! RUST_LOG=debug cargo run    # every request with its payload
//! RUST_LOG=trace cargo run    # event bus traffic too
//! ```

/// Initializes the global subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the actor
        .compact()
        .init();
}
