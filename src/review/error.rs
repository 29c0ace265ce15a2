use crate::backend::BackendError;
use crate::model::InvalidRating;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Review validation error: {0}")]
    ValidationError(String),

    /// Reviews open only once the order has been delivered.
    #[error("Order {0} is not completed")]
    NotCompleted(String),

    /// The backend did not store the review. The draft is unchanged.
    #[error("Could not save review: {0}")]
    PersistenceError(#[from] BackendError),
}

impl From<InvalidRating> for ReviewError {
    fn from(e: InvalidRating) -> Self {
        ReviewError::ValidationError(e.to_string())
    }
}
