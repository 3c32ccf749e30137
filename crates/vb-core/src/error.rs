//! # AppError
//!
//! The two outcomes a query can fail with.

use thiserror::Error;

/// The primary error type for all vb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Submission, Comment)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// Infrastructure failure (e.g., DB down, pool timeout)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the context chain on one line
        AppError::Internal(format!("{err:#}"))
    }
}

/// A specialized Result type for verse-board queries.
pub type Result<T> = std::result::Result<T, AppError>;
