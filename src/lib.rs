//! # Cart Optimizer
//!
//! > **A shopping cart that asks a remote service which items to buy.**
//!
//! Users add items with a price and a value, watch their spend against a budget, and
//! ask an optimization service for the highest-value subset that fits. Completed
//! optimizations are recorded in a durable history.
//!
//! ## 🏗️ Design
//!
//! All cart state lives inside one actor. The ledger, the orchestrator and the history
//! store are only touched from that actor's task, so there are no locks around them.
//! Notifications are independent resources managed by a generic [`ResourceActor`](framework::ResourceActor).
//!
//! ### Single-flight optimization
//! At most one optimization request is outstanding. A second request while one is in
//! flight is rejected locally with a warning. The request carries a snapshot of the
//! cart, so edits made while it is outstanding do not change what was sent.
//!
//! ### Best-effort persistence
//! History writes never fail an optimization. Unreadable history reads as empty.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` used for notifications, with its client and mocks.
//!
//! ### 2. The Domain ([`model`], [`ledger`], [`budget`], [`history`])
//! - [`ItemLedger`](ledger::ItemLedger): the ordered, validated cart plus its change feed.
//! - [`classify`](budget::classify): spend-to-budget ratio and band.
//! - [`HistoryStore`](history::HistoryStore): append-only log behind a [`HistoryStorage`](history::HistoryStorage) key.
//!
//! ### 3. The Boundary ([`optimizer`], [`orchestrator`])
//! - [`OptimizationService`](optimizer::OptimizationService) and its HTTP implementation.
//! - [`Orchestrator`](orchestrator::Orchestrator): the `Idle -> Requesting -> Committed | Rejected -> Idle` machine.
//!
//! ### 4. The Actors ([`cart_actor`], [`notification_actor`]) and their [`clients`]
//!
//! ### 5. Wiring ([`config`], [`lifecycle`])
//! - [`Settings`](config::Settings): TOML file plus `CART_*` environment overrides.
//! - [`CartSystem`](lifecycle::CartSystem): starts and stops the actors.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Point at a running optimization service and run the demo
//! CART_OPTIMIZER_URL=http://127.0.0.1:5050 RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod budget;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod error;
pub mod framework;
pub mod history;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod notification_actor;
pub mod optimizer;
pub mod orchestrator;
