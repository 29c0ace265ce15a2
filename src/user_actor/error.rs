//! Error types for the accounts table.

use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// No account is registered under this email.
    #[error("User not found: {0}")]
    NotFound(String),

    /// An account with the same email already exists.
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// The account data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// Password hashing or verification failed.
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// An error occurred while communicating with the table.
    #[error("Table communication error: {0}")]
    TableCommunicationError(String),
}
