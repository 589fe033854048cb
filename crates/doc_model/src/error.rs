//! Error types for document model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Invalid content tree: {0}")]
    InvalidContent(#[from] serde_json::Error),

    #[error("Invalid heading level: {0} (expected 1..=6)")]
    InvalidHeadingLevel(u8),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
