//! # Checkout
//!
//! Turns a cart into a persisted `pending` order.
//!
//! The cart is cleared and the live order set only after the backend confirmed the insert,
//! so a failed submission can be retried with the same cart.

pub mod error;

pub use error::CheckoutError;

use crate::backend::Backend;
use crate::cart::Cart;
use crate::model::{CustomerRef, Order, OrderId};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The order the session is currently following, if any. At most one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveOrder(Option<OrderId>);

impl LiveOrder {
    pub fn get(&self) -> Option<OrderId> {
        self.0
    }

    /// Replaces the live order, returning the previous one.
    pub fn set(&mut self, id: OrderId) -> Option<OrderId> {
        self.0.replace(id)
    }

    pub fn clear(&mut self) -> Option<OrderId> {
        self.0.take()
    }
}

pub struct OrderSubmitter {
    backend: Arc<dyn Backend>,
}

impl OrderSubmitter {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Places the cart as a new order delivered to `delivery_location`.
    ///
    /// Fails with `ValidationError` for an empty cart or blank location before any backend
    /// call, and with `PersistenceError` when the insert fails. Neither touches `cart` or
    /// `live_order`.
    #[instrument(skip(self, cart, live_order, customer), fields(customer = %customer.id))]
    pub async fn submit(
        &self,
        cart: &mut Cart,
        live_order: &mut LiveOrder,
        delivery_location: &str,
        customer: CustomerRef,
    ) -> Result<Order, CheckoutError> {
        let location = delivery_location.trim();
        if location.is_empty() {
            warn!("Blank delivery location");
            return Err(CheckoutError::ValidationError("delivery location is required".into()));
        }
        let Some(canteen_id) = cart.canteen_id().cloned() else {
            warn!("Empty cart");
            return Err(CheckoutError::ValidationError("cart is empty".into()));
        };

        let mut order = Order::pending(canteen_id, customer, cart.snapshot(), location);
        debug!(?order, "Submitting order");

        let id = self.backend.insert_order(order.clone()).await.map_err(|e| {
            warn!(order_id = %order.id, error = %e, "Order insert failed");
            CheckoutError::from(e)
        })?;

        order.id = id;
        cart.clear();
        if let Some(previous) = live_order.set(id) {
            debug!(previous = %previous, "Replaced live order");
        }
        info!(order_id = %id, total = order.total_amount, "Order placed");
        Ok(order)
    }
}
