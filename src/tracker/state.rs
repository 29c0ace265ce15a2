use super::error::TrackError;
use crate::model::{Order, OrderStatus};
use crate::phase::{phase_for, phase_index, Phase, UnknownStatusPolicy};

/// What the tracker currently knows about its order.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerState {
    /// Initial fetch still in flight.
    Loading,
    /// The backend has no order with this id.
    NotFound,
    /// Latest snapshot of a non-terminal order; more changes expected.
    Live(Order),
    /// Snapshot with a terminal status. The feed has been released.
    Finished(Order),
    Failed(TrackError),
}

impl TrackerState {
    pub fn order(&self) -> Option<&Order> {
        match self {
            TrackerState::Live(order) | TrackerState::Finished(order) => Some(order),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<&OrderStatus> {
        self.order().map(|o| &o.status)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TrackerState::Loading)
    }

    pub fn is_completed(&self) -> bool {
        self.status() == Some(&OrderStatus::Completed)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status() == Some(&OrderStatus::Cancelled)
    }

    /// True once nothing will change any more: terminal status, not found or failed.
    pub fn is_settled(&self) -> bool {
        !matches!(self, TrackerState::Loading | TrackerState::Live(_))
    }

    pub fn phase_index(&self, policy: UnknownStatusPolicy) -> Option<usize> {
        self.status().and_then(|s| phase_index(s, policy))
    }

    pub fn phase(&self, policy: UnknownStatusPolicy) -> Option<&'static Phase> {
        self.status().map(|s| phase_for(s, policy))
    }
}
