use crate::backend::BackendError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// Nothing was sent to the backend.
    #[error("Checkout validation error: {0}")]
    ValidationError(String),

    /// The backend did not store the order. The cart is unchanged.
    #[error("Could not place order: {0}")]
    PersistenceError(#[from] BackendError),
}
