//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered by `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle: tables, orders placed, status changes
//! RUST_LOG=debug cargo run    # adds payloads and feed bookkeeping
//! ```
//!
//! Client methods log their full payload once at `debug` (`debug!(?order, ...)`); everything
//! after that carries ids as structured fields (`order_id`, `table`, `revision`).
//!
//! A tracked order at `info` looks like:
//!
//! ```text
//! INFO Order placed order_id=7f0c.. total=250
//! INFO Tracker started order_id=7f0c..
//! INFO track: Order status changed order_id=7f0c.. from=pending to=preparing revision=1
//! INFO track: Order reached terminal status order_id=7f0c.. status=completed
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
