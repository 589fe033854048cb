//! Store - asset loading, document export and settings
//!
//! This crate performs the I/O side of the export pipeline: loading and
//! re-encoding images, writing PDF and DOCX files, persisting export
//! settings, and the [`ProposalExporter`] that runs one export end to end.

mod assets;
mod error;
mod export;
mod file_io;
mod settings;
pub mod docx;
pub mod pdf;

pub use assets::*;
pub use error::*;
pub use export::*;
pub use settings::*;

// Re-export the export entry points
pub use docx::{export_docx, export_docx_bytes, PackagingFailure};
pub use pdf::{export_pdf, export_pdf_bytes, PdfError, PdfExportOptions};
