//! Store error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid data: {0}")]
    Validation(String),
    #[error("Item ID {0} already exists")]
    Conflict(i64),
    #[error("Item {0} not found")]
    NotFound(i64),
    #[error("Failed to persist items to {path}: {message}")]
    Persist { path: String, message: String },
}

impl StoreError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            StoreError::Validation(_) => 400,
            StoreError::NotFound(_) => 404,
            StoreError::Conflict(_) => 409,
            StoreError::Persist { .. } => 500,
        }
    }

    /// Message returned to API clients.
    pub fn public_message(&self) -> String {
        match self {
            StoreError::Validation(_) => self.to_string(),
            StoreError::Conflict(_) => "Item ID already exists".to_string(),
            StoreError::NotFound(_) => "Item not found".to_string(),
            StoreError::Persist { .. } => "Failed to persist items".to_string(),
        }
    }
}
