//! Sender Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, thiserror::Error)]
pub enum SenderError {
    #[error("Failed to write batch: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize batch: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sender is closed")]
    Closed,

    #[error("No async runtime available to run the sender worker")]
    NoRuntime,
}

impl ContextualError for SenderError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// Result type for sender operations
pub type SenderResult<T> = Result<T, SenderError>;
