//! Orders as persisted by checkout and observed by the tracker.
//!
//! An [`Order`] is immutable once submitted except for `status`, `revision` and
//! `updated_at`, which only the backend changes (canteen staff or rider actions).

use crate::model::{CanteenId, MenuItemId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Type-safe identifier for Orders, generated client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Last six characters, as shown in order headings ("Order #a1b2c3").
    pub fn short(&self) -> String {
        let full = self.0.simple().to_string();
        full[full.len() - 6..].to_string()
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an order.
///
/// `Pending` is initial, `Completed` and `Cancelled` are terminal. Any value the backend
/// sends that is not one of the six known strings is kept as `Unknown` instead of being
/// coerced into a known state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    PickedUp,
    Completed,
    Cancelled,
    Unknown(String),
}

impl OrderStatus {
    /// Forward path of a successful order.
    pub const FLOW: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::PickedUp,
        OrderStatus::Completed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::PickedUp => "pickedUp",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Position on the forward path; `None` for `Cancelled` and `Unknown`.
    fn rank(&self) -> Option<usize> {
        OrderStatus::FLOW.iter().position(|s| s == self)
    }

    /// Whether a backend may move an order from `self` to `next`.
    ///
    /// Terminal states never move. `Cancelled` is reachable from any known non-terminal
    /// state; every other move must go strictly forward along [`OrderStatus::FLOW`].
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), next) {
            (None, _) => false,
            (Some(_), OrderStatus::Cancelled) => true,
            (Some(current), next) => next.rank().is_some_and(|n| n > current),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "pending" => OrderStatus::Pending,
            "preparing" => OrderStatus::Preparing,
            "ready" => OrderStatus::Ready,
            "pickedUp" => OrderStatus::PickedUp,
            "completed" => OrderStatus::Completed,
            "cancelled" => OrderStatus::Cancelled,
            other => OrderStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        OrderStatus::from(raw.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a submitted order, copied out of the cart at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub unit_price: u32,
    pub quantity: u32,
}

impl OrderLine {
    pub fn subtotal(&self) -> u64 {
        u64::from(self.unit_price) * u64::from(self.quantity)
    }
}

/// Who placed the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub canteen_id: CanteenId,
    pub customer: CustomerRef,
    pub lines: Vec<OrderLine>,
    pub total_amount: u64,
    pub delivery_location: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    /// Bumped by the backend on every status change; lets observers drop stale notifications.
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Builds a fresh `pending` order with a new id. The total is computed from `lines`.
    pub fn pending(
        canteen_id: CanteenId,
        customer: CustomerRef,
        lines: Vec<OrderLine>,
        delivery_location: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let total_amount = lines.iter().map(OrderLine::subtotal).sum();
        Self {
            id: OrderId::new(),
            canteen_id,
            customer,
            lines,
            total_amount,
            delivery_location: delivery_location.into(),
            payment_method: PaymentMethod::CashOnDelivery,
            status: OrderStatus::Pending,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Staff-side change to an order row.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names_round_trip() {
        for raw in ["pending", "preparing", "ready", "pickedUp", "completed", "cancelled"] {
            let status = OrderStatus::from(raw);
            assert!(!matches!(status, OrderStatus::Unknown(_)), "{raw} should be known");
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn test_unrecognized_status_is_kept_verbatim() {
        let status = OrderStatus::from("on_hold");
        assert_eq!(status, OrderStatus::Unknown("on_hold".into()));
        assert_eq!(status.to_string(), "on_hold");
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_status_serializes_as_plain_string() {
        let json = serde_json::to_string(&OrderStatus::PickedUp).unwrap();
        assert_eq!(json, "\"pickedUp\"");
        let parsed: OrderStatus = serde_json::from_str("\"delayed\"").unwrap();
        assert_eq!(parsed, OrderStatus::Unknown("delayed".into()));
    }

    #[test]
    fn test_transitions_only_move_forward() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(&Preparing));
        assert!(Preparing.can_transition_to(&PickedUp));
        assert!(Ready.can_transition_to(&Cancelled));
        assert!(!Ready.can_transition_to(&Preparing));
        assert!(!Pending.can_transition_to(&Pending));
        assert!(!Completed.can_transition_to(&Cancelled));
        assert!(!Cancelled.can_transition_to(&Pending));
        assert!(!Pending.can_transition_to(&Unknown("x".into())));
        assert!(!Unknown("x".into()).can_transition_to(&Ready));
    }

    #[test]
    fn test_pending_order_totals_lines() {
        let lines = vec![
            OrderLine {
                menu_item_id: "a".into(),
                name: "Biryani".into(),
                unit_price: 100,
                quantity: 2,
            },
            OrderLine {
                menu_item_id: "b".into(),
                name: "Chai".into(),
                unit_price: 50,
                quantity: 1,
            },
        ];
        let customer = CustomerRef {
            id: UserId("u1".into()),
            name: "Sami".into(),
        };
        let order = Order::pending("c1".into(), customer, lines, "CS Dept");
        assert_eq!(order.total_amount, 250);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.revision, 0);
        assert_eq!(order.id.short().len(), 6);
    }
}
