//! Presentation metadata for each order status.
//!
//! A fixed, ordered table. Rendering code looks a status up here and never inspects the
//! status string itself.

use crate::model::OrderStatus;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    ChefHat,
    CheckCircle,
    Bike,
    XCircle,
    HelpCircle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    /// Wire status this phase renders.
    pub key: &'static str,
    pub icon: Icon,
    pub title: &'static str,
    pub description: &'static str,
    /// CSS hex color.
    pub color: &'static str,
}

pub static PHASES: [Phase; 6] = [
    Phase {
        key: "pending",
        icon: Icon::ChefHat,
        title: "Waiting for canteen manager to accept",
        description: "The canteen is reviewing your order",
        color: "#f59e0b",
    },
    Phase {
        key: "preparing",
        icon: Icon::ChefHat,
        title: "Preparing Your Food",
        description: "The canteen is carefully preparing your delicious meal",
        color: "#e11d48",
    },
    Phase {
        key: "ready",
        icon: Icon::CheckCircle,
        title: "Order Ready for Pickup",
        description: "Your order is ready and waiting to be picked up by the rider",
        color: "#2563eb",
    },
    Phase {
        key: "pickedUp",
        icon: Icon::Bike,
        title: "Out for Delivery",
        description: "Your order is on the way to your department",
        color: "#0d9488",
    },
    Phase {
        key: "completed",
        icon: Icon::CheckCircle,
        title: "Delivered Successfully",
        description: "Your order has been delivered. Enjoy your meal!",
        color: "#16a34a",
    },
    Phase {
        key: "cancelled",
        icon: Icon::XCircle,
        title: "Order Cancelled",
        description: "Your order has been cancelled. Please contact support if this was a mistake.",
        color: "#dc2626",
    },
];

/// Shown for a status value the client does not recognize.
pub static UNKNOWN_PHASE: Phase = Phase {
    key: "unknown",
    icon: Icon::HelpCircle,
    title: "Status Unavailable",
    description: "We received an order status we don't recognize. Please contact the canteen.",
    color: "#6b7280",
};

/// How an unrecognized status is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownStatusPolicy {
    /// Render [`UNKNOWN_PHASE`]; the phase index is `None`.
    #[default]
    Explicit,
    /// Render the `pending` phase at index 0.
    PendingFallback,
}

impl FromStr for UnknownStatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explicit" => Ok(UnknownStatusPolicy::Explicit),
            "pending" => Ok(UnknownStatusPolicy::PendingFallback),
            other => Err(format!("expected 'explicit' or 'pending', got '{other}'")),
        }
    }
}

/// Index of `status` in [`PHASES`].
pub fn phase_index(status: &OrderStatus, policy: UnknownStatusPolicy) -> Option<usize> {
    match PHASES.iter().position(|p| p.key == status.as_str()) {
        Some(index) if !matches!(status, OrderStatus::Unknown(_)) => Some(index),
        _ => match policy {
            UnknownStatusPolicy::Explicit => None,
            UnknownStatusPolicy::PendingFallback => Some(0),
        },
    }
}

pub fn phase_for(status: &OrderStatus, policy: UnknownStatusPolicy) -> &'static Phase {
    match phase_index(status, policy) {
        Some(index) => &PHASES[index],
        None => &UNKNOWN_PHASE,
    }
}
