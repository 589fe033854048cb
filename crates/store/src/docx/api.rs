//! Public API for DOCX export
//!
//! Export is all-or-nothing: the package is assembled in memory and only a
//! complete archive is returned or written. Any packaging error surfaces as
//! a single [`PackagingFailure`].

use crate::docx::error::{DocxResult, PackagingFailure};
use crate::docx::structure::StructuralExporter;
use crate::docx::writer::{CoreProperties, DocxWriter};
use crate::file_io::write_file_replacing;
use doc_model::Block;
use std::io::Cursor;
use std::path::Path;
use tracing::{info, warn};

fn package(blocks: &[Block], properties: &CoreProperties) -> DocxResult<Vec<u8>> {
    let paragraphs = StructuralExporter::new().export(&properties.title, blocks);
    let cursor = DocxWriter::new(Cursor::new(Vec::new())).write(&paragraphs, properties)?;
    Ok(cursor.into_inner())
}

/// Export blocks to an in-memory DOCX, titled `properties.title`
///
/// ```ignore
/// use store::docx::{export_docx_bytes, CoreProperties};
///
/// let props = CoreProperties::new("Coal Study", chrono::Local::now().naive_local());
/// let bytes = export_docx_bytes(&blocks, &props)?;
/// ```
pub fn export_docx_bytes(blocks: &[Block], properties: &CoreProperties) -> Result<Vec<u8>, PackagingFailure> {
    package(blocks, properties).map_err(|err| {
        warn!(error = %err, "docx packaging failed");
        PackagingFailure::from(err)
    })
}

/// Export blocks to a DOCX file.
///
/// The archive is written to a sibling temporary file and renamed into
/// place, so `path` either holds the complete document or is untouched.
pub fn export_docx(blocks: &[Block], properties: &CoreProperties, path: &Path) -> Result<(), PackagingFailure> {
    let bytes = export_docx_bytes(blocks, properties)?;

    write_file_replacing(path, &bytes).map_err(|err| {
        warn!(path = %path.display(), error = %err, "writing docx failed");
        PackagingFailure::from(err)
    })?;

    info!(
        path = %path.display(),
        blocks = blocks.len(),
        bytes = bytes.len(),
        "exported docx"
    );
    Ok(())
}
