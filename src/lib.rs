//! # Canteen Orders
//!
//! Client core of a campus food-ordering app: cart, checkout, live order tracking and
//! reviews, talking to a hosted backend through the [`Backend`](backend::Backend) trait.
//!
//! ## Control Flow
//!
//! [`Cart`](cart::Cart) → [`OrderSubmitter`](checkout::OrderSubmitter) (one-shot) →
//! [`OrderTracker`](tracker::OrderTracker) (long-lived feed) → [`phase`] (render) →
//! [`ReviewSubmitter`](review::ReviewSubmitter) (completed orders only).
//!
//! A [`CanteenSession`](lifecycle::CanteenSession) owns the cart, the live order and the
//! tracker for one signed-in user and wires the components together.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! A generic `TableActor<T>` that stores rows of one type in its own Tokio task and fans
//! out row changes to subscribers. It backs the in-memory backend.
//!
//! ### 2. The Tables ([`user_actor`], [`catalog_actor`], [`order_actor`], [`review_actor`])
//! `TableRow` implementations: row validation on insert and the order status rules on update.
//!
//! ### 3. The Interface ([`clients`], [`backend`])
//! Typed clients over each table, and [`MemoryBackend`](backend::MemoryBackend) which
//! implements [`Backend`](backend::Backend) on top of them.
//!
//! ### 4. The Client Core ([`cart`], [`checkout`], [`tracker`], [`phase`], [`review`])
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Configuration, tracing setup, [`BackendSystem`](lifecycle::BackendSystem) and the
//! per-user session.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod backend;
pub mod cart;
pub mod catalog_actor;
pub mod checkout;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod phase;
pub mod review;
pub mod review_actor;
pub mod tracker;
pub mod user_actor;
