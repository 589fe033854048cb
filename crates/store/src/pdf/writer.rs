//! PDF Writer
//!
//! File structure (header, body, cross-reference table, trailer), object
//! numbering and stream compression.

use super::document::{create_catalog, create_page, create_pages, DocumentInfo, Resources, PDF_VERSION};
use super::images::{deflate, image_xobject, soft_mask_xobject};
use super::objects::{PdfDictionary, PdfObject, PdfStream};
use super::options::PdfExportOptions;
use super::renderer::PdfRenderer;
use crate::LoadedAssets;
use render_model::RenderModel;
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The model cannot be written as a PDF
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Low-level PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    /// (object number, byte offset)
    offsets: Vec<(u32, u64)>,
    next_obj_num: u32,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_obj_num: 1,
            compress: true,
        }
    }

    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{PDF_VERSION}\n"))?;
        // Binary marker
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        self.offsets.push((obj_num, self.position));
        self.write_str(&format!("{obj_num} 0 obj\n"))?;
        self.write_bytes(&object.to_bytes())?;
        self.write_str("\nendobj\n")
    }

    /// Write a stream object, compressing it when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.compressed {
            stream.data = deflate(&stream.data)?;
            stream.compressed = true;
            stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
        }
        stream
            .dict
            .insert("Length", PdfObject::Integer(stream.data.len() as i64));
        self.write_object(obj_num, &PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;
        let mut entries = self.offsets.clone();
        entries.sort_by_key(|(num, _)| *num);

        self.write_str(&format!("xref\n0 {}\n", self.next_obj_num))?;
        self.write_str("0000000000 65535 f \n")?;
        let mut expected = 1u32;
        for (num, offset) in entries {
            while expected < num {
                self.write_str("0000000000 65535 f \n")?;
                expected += 1;
            }
            self.write_str(&format!("{offset:010} 00000 n \n"))?;
            expected = num + 1;
        }

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::Integer(i64::from(self.next_obj_num)));
        trailer.insert("Root", PdfObject::Reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info));
        }
        self.write_str("trailer\n")?;
        self.write_bytes(&PdfObject::Dictionary(trailer).to_bytes())?;
        self.write_str(&format!("\nstartxref\n{xref_offset}\n%%EOF\n"))
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// High-level PDF document writer
pub struct PdfDocumentWriter {
    options: PdfExportOptions,
}

impl PdfDocumentWriter {
    pub fn new(options: PdfExportOptions) -> Self {
        Self { options }
    }

    fn document_info(&self) -> DocumentInfo {
        let mut info = DocumentInfo::new();
        info.title = self.options.title.clone();
        info.author = self.options.author.clone();
        info.subject = self.options.subject.clone();
        info.keywords = self.options.keywords.clone();
        info.creation_date = Some(
            self.options
                .creation_date
                .unwrap_or_else(|| chrono::Local::now().naive_local()),
        );
        info
    }

    /// Write a complete PDF for `model` to `writer`
    pub fn write<W: Write>(&self, model: &RenderModel, assets: &LoadedAssets, writer: W) -> Result<W> {
        if model.pages.is_empty() {
            return Err(PdfError::InvalidDocument("document has no pages".to_string()));
        }

        // Render first so the resource sets are known before any object is written
        let mut renderer = PdfRenderer::new();
        let contents: Vec<_> = model
            .pages
            .iter()
            .map(|page| renderer.render_page(page, assets))
            .collect();

        let mut pdf = PdfWriter::new(writer);
        pdf.set_compression(self.options.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();

        let mut resources = Resources::default();
        for (name, font) in renderer.fonts().fonts() {
            let obj = pdf.allocate_object();
            pdf.write_object(obj, &PdfObject::Dictionary(font.to_dictionary()))?;
            resources.fonts.push((name, obj));
        }

        for (name, resource_id) in renderer.images().images() {
            let Some(raster) = assets.raster(resource_id) else {
                continue;
            };
            let mask = match &raster.alpha {
                Some(alpha) => {
                    let obj = pdf.allocate_object();
                    pdf.write_stream_object(obj, soft_mask_xobject(raster, alpha)?)?;
                    Some(obj)
                }
                None => None,
            };
            let obj = pdf.allocate_object();
            pdf.write_stream_object(obj, image_xobject(raster, mask)?)?;
            resources.images.push((name, obj));
        }

        let mut page_refs = Vec::with_capacity(model.pages.len());
        for (page, content) in model.pages.iter().zip(contents) {
            let page_ref = pdf.allocate_object();
            let content_ref = pdf.allocate_object();
            pdf.write_stream_object(content_ref, PdfStream::new(content.into_bytes()))?;
            let dict = create_page(pages_ref, content_ref, page.width, page.height, &resources);
            pdf.write_object(page_ref, &PdfObject::Dictionary(dict))?;
            page_refs.push(page_ref);
        }

        pdf.write_object(pages_ref, &PdfObject::Dictionary(create_pages(&page_refs)))?;
        pdf.write_object(catalog_ref, &PdfObject::Dictionary(create_catalog(pages_ref)))?;
        pdf.write_object(info_ref, &PdfObject::Dictionary(self.document_info().to_dictionary()))?;
        pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;

        debug!(
            pages = page_refs.len(),
            fonts = resources.fonts.len(),
            images = resources.images.len(),
            "wrote pdf"
        );
        pdf.finish()
    }

    /// Write a complete PDF into memory
    pub fn write_to_bytes(&self, model: &RenderModel, assets: &LoadedAssets) -> Result<Vec<u8>> {
        self.write(model, assets, Vec::new())
    }
}
