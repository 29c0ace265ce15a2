//! # Backend Collaborator
//!
//! The hosted service the client talks to: sessions, relational rows and per-row change
//! notifications. [`Backend`] is the seam; [`MemoryBackend`] runs it in-process on the table
//! engine. A network client for the hosted service would be another implementation.

pub mod error;
pub mod feed;
pub mod memory;

pub use error::BackendError;
pub use feed::OrderFeed;
pub use memory::MemoryBackend;

use crate::model::{Canteen, CanteenId, MenuItem, Order, OrderId, Review, ReviewId, SignUp, UserId, UserProfile};
use async_trait::async_trait;

/// Operations the client consumes from the backend.
///
/// Shared as `Arc<dyn Backend>` between the session, checkout, the tracker task and review
/// submission. Order status is never written through this trait.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Registers a new account and returns its profile.
    async fn sign_up(&self, sign_up: SignUp) -> Result<UserProfile, BackendError>;

    /// Verifies credentials. Unknown email and wrong password are both `InvalidCredentials`.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, BackendError>;

    async fn list_canteens(&self) -> Result<Vec<Canteen>, BackendError>;

    async fn fetch_canteen(&self, id: CanteenId) -> Result<Option<Canteen>, BackendError>;

    async fn list_menu_items(&self, canteen_id: CanteenId) -> Result<Vec<MenuItem>, BackendError>;

    async fn insert_order(&self, order: Order) -> Result<OrderId, BackendError>;

    async fn fetch_order_by_id(&self, id: OrderId) -> Result<Option<Order>, BackendError>;

    /// Opens a change feed for one order. Dropping the feed unsubscribes.
    async fn subscribe_order_changes(&self, id: OrderId) -> Result<OrderFeed, BackendError>;

    /// Orders placed by one customer, newest first.
    async fn list_orders_for_customer(&self, customer: UserId) -> Result<Vec<Order>, BackendError>;

    async fn insert_review(&self, review: Review) -> Result<ReviewId, BackendError>;
}
