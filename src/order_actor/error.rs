//! Error types for the orders table.

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order row is malformed (no lines, wrong total, blank location, ...).
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The status change would move the order backwards or out of a terminal state.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// An error occurred while communicating with the table.
    #[error("Table communication error: {0}")]
    TableCommunicationError(String),
}
