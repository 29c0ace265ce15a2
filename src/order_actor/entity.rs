//! [`TableRow`] implementation for [`Order`].
//!
//! Inserted orders must be well-formed `pending` orders. Updates only ever change the
//! status, and only along the forward path (see [`OrderStatus::can_transition_to`]); each
//! accepted change bumps `revision` and `updated_at`.

use super::error::OrderError;
use crate::framework::TableRow;
use crate::model::{Order, OrderId, OrderLine, OrderStatus, OrderUpdate};
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl TableRow for Order {
    type Id = OrderId;
    type Update = OrderUpdate;
    type Error = OrderError;
    const TABLE: &'static str = "orders";

    fn id(&self) -> OrderId {
        self.id
    }

    async fn on_insert(&mut self) -> Result<(), OrderError> {
        if self.lines.is_empty() {
            return Err(OrderError::ValidationError("order has no lines".into()));
        }
        if self.lines.iter().any(|l| l.quantity == 0) {
            return Err(OrderError::ValidationError("line with zero quantity".into()));
        }
        if self.delivery_location.trim().is_empty() {
            return Err(OrderError::ValidationError("blank delivery location".into()));
        }
        if self.status != OrderStatus::Pending {
            return Err(OrderError::ValidationError(format!(
                "new orders must be pending, got {}",
                self.status
            )));
        }
        let expected: u64 = self.lines.iter().map(OrderLine::subtotal).sum();
        if self.total_amount != expected {
            return Err(OrderError::ValidationError(format!(
                "total {} does not match lines {}",
                self.total_amount, expected
            )));
        }
        self.revision = 0;
        Ok(())
    }

    fn on_update(&mut self, update: OrderUpdate) -> Result<(), OrderError> {
        if !self.status.can_transition_to(&update.status) {
            return Err(OrderError::InvalidTransition {
                from: self.status.to_string(),
                to: update.status.to_string(),
            });
        }
        self.status = update.status;
        self.revision += 1;
        self.updated_at = Utc::now();
        Ok(())
    }
}
