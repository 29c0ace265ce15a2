//! # Store Errors
//!
//! Errors raised by the table engine itself. Row-specific validation failures travel inside
//! [`StoreError::RowError`].

/// Errors that can occur within the table framework.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Table closed")]
    TableClosed,
    #[error("Table dropped response channel")]
    TableDropped,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Row already exists: {0}")]
    Conflict(String),
    #[error("Row error: {0}")]
    RowError(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Recovers the typed row error carried by `RowError`.
    ///
    /// Any other variant, or a row error of a different type, is handed back unchanged.
    pub fn into_row_error<E: std::error::Error + 'static>(self) -> Result<E, StoreError> {
        match self {
            StoreError::RowError(boxed) => boxed
                .downcast::<E>()
                .map(|e| *e)
                .map_err(StoreError::RowError),
            other => Err(other),
        }
    }
}
