//! Error types for render model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(#[from] layout_engine::LayoutError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
