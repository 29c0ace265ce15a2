use crate::backend::BackendError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackError {
    /// No order exists with the tracked id.
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Tracking failed: {0}")]
    BackendError(#[from] BackendError),

    /// The tracking task has ended and no further state will arrive.
    #[error("Tracking stopped")]
    Stopped,
}
