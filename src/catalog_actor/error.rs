//! Error types for the canteen and menu tables.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested canteen was not found.
    #[error("Canteen not found: {0}")]
    CanteenNotFound(String),

    #[error("Catalog validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the table.
    #[error("Table communication error: {0}")]
    TableCommunicationError(String),
}
