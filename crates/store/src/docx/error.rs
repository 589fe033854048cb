//! Error types for DOCX export

use thiserror::Error;

/// Message shown to the user when a Word document cannot be produced
pub const PACKAGING_FAILURE_MESSAGE: &str = "Error generating Word document. Please try again.";

/// Errors that can occur while packaging a DOCX file
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error (permission denied, disk full, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Result type for DOCX packaging steps
pub type DocxResult<T> = std::result::Result<T, DocxError>;

/// The single failure surfaced by the public DOCX export.
///
/// Displays the user-facing message; the packaging error is kept as the source.
#[derive(Debug, Error)]
#[error("{}", PACKAGING_FAILURE_MESSAGE)]
pub struct PackagingFailure {
    #[source]
    cause: DocxError,
}

impl PackagingFailure {
    pub fn cause(&self) -> &DocxError {
        &self.cause
    }
}

impl From<DocxError> for PackagingFailure {
    fn from(cause: DocxError) -> Self {
        Self { cause }
    }
}

impl From<std::io::Error> for PackagingFailure {
    fn from(err: std::io::Error) -> Self {
        DocxError::from(err).into()
    }
}
