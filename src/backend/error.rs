use crate::catalog_actor::CatalogError;
use crate::order_actor::OrderError;
use crate::review_actor::ReviewRowError;
use crate::user_actor::UserError;
use thiserror::Error;

/// Errors reported by a [`Backend`](crate::backend::Backend).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    /// The backend could not be reached or dropped the request.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The backend refused the record (failed a row check or an illegal status change).
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account already exists for {0}")]
    AlreadyRegistered(String),
}

impl From<OrderError> for BackendError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(id) => BackendError::NotFound(id),
            OrderError::TableCommunicationError(msg) => BackendError::Unavailable(msg),
            rejected => BackendError::Rejected(rejected.to_string()),
        }
    }
}

impl From<UserError> for BackendError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::AlreadyExists(email) => BackendError::AlreadyRegistered(email),
            UserError::NotFound(email) => BackendError::NotFound(email),
            UserError::ValidationError(msg) => BackendError::Rejected(msg),
            UserError::CredentialError(msg) | UserError::TableCommunicationError(msg) => {
                BackendError::Unavailable(msg)
            }
        }
    }
}

impl From<ReviewRowError> for BackendError {
    fn from(e: ReviewRowError) -> Self {
        match e {
            ReviewRowError::ValidationError(msg) => BackendError::Rejected(msg),
            ReviewRowError::TableCommunicationError(msg) => BackendError::Unavailable(msg),
        }
    }
}

impl From<CatalogError> for BackendError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::CanteenNotFound(id) => BackendError::NotFound(id),
            CatalogError::ValidationError(msg) => BackendError::Rejected(msg),
            CatalogError::TableCommunicationError(msg) => BackendError::Unavailable(msg),
        }
    }
}
