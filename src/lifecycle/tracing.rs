//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Without `RUST_LOG` only `info` and above are shown.
//!
//! ```bash
//! # Actor lifecycle, item changes, optimization outcomes
//! RUST_LOG=info cargo run
//!
//! # Full payloads: every request, snapshot and notification phase
//! RUST_LOG=debug cargo run
//!
//! # Only the HTTP boundary
//! RUST_LOG=cart_optimizer::optimizer=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a successful run reads roughly:
//!
//! ```text
//! INFO Cart actor started history_key="cartHistory"
//! INFO Item added name="A" len=1
//! INFO Item added name="B" len=2
//! INFO optimize: Sending optimize to actor budget=20.0
//! INFO Optimization started budget=20.0 items=2
//! INFO Orchestrator transition from=Idle to=Requesting
//! INFO optimize: Optimization response received endpoint=http://127.0.0.1:5050/optimize selected=1
//! INFO Optimization committed session="X7K2QF" selected=1 total_price=20.0 total_value=15.0
//! ```
//!
//! Validation failures and service rejections log at `warn`.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // `try_init` so tests and embedders that already installed a subscriber keep theirs.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
