//! Validation Error Types

use thiserror::Error;

/// Errors during sample normalization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
