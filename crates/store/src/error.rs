//! Error types for export and settings operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(#[from] render_model::RenderError),

    #[error("PDF error: {0}")]
    Pdf(#[from] crate::pdf::PdfError),

    #[error(transparent)]
    Docx(#[from] crate::docx::PackagingFailure),
}

pub type Result<T> = std::result::Result<T, StoreError>;
