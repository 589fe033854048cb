//! PDF Export Public API

use super::options::PdfExportOptions;
use super::writer::{PdfDocumentWriter, Result};
use crate::file_io::write_file_replacing;
use crate::LoadedAssets;
use render_model::RenderModel;
use std::path::Path;
use tracing::info;

/// Export a render model to PDF bytes in memory
pub fn export_pdf_bytes(
    model: &RenderModel,
    assets: &LoadedAssets,
    options: PdfExportOptions,
) -> Result<Vec<u8>> {
    PdfDocumentWriter::new(options).write_to_bytes(model, assets)
}

/// Export a render model to a PDF file.
///
/// The document is assembled in memory and renamed into place from a
/// sibling temporary file, so `path` never holds a partial document.
///
/// ```ignore
/// use store::pdf::{export_pdf, PdfExportOptions};
///
/// let options = PdfExportOptions::new().with_title("Coal Study");
/// export_pdf(&model, &assets, "proposal.pdf", options)?;
/// ```
pub fn export_pdf(
    model: &RenderModel,
    assets: &LoadedAssets,
    path: impl AsRef<Path>,
    options: PdfExportOptions,
) -> Result<()> {
    let bytes = export_pdf_bytes(model, assets, options)?;
    write_file_replacing(path.as_ref(), &bytes)?;
    info!(
        path = %path.as_ref().display(),
        pages = model.page_count(),
        bytes = bytes.len(),
        "exported pdf"
    );
    Ok(())
}
