use thiserror::Error;

/// Errors that can occur during review operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewRowError {
    #[error("Review validation error: {0}")]
    ValidationError(String),

    #[error("Table communication error: {0}")]
    TableCommunicationError(String),
}
