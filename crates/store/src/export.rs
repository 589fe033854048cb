//! Proposal export pipeline
//!
//! Ties the pieces together for one export call: resolve the title, load
//! every image the document needs, render pages and write the PDF, or map
//! blocks to the Word paragraph sequence. Nothing is shared between calls.

use crate::docx::{self, CoreProperties};
use crate::file_io::write_file_replacing_async;
use crate::pdf::{self, PdfExportOptions};
use crate::{AssetLoader, ExportSettings, LoadedAssets, Result};
use chrono::NaiveDateTime;
use doc_model::{Block, DocumentMetadata};
use render_model::{PaginatedRenderer, RenderModel};
use std::path::{Path, PathBuf};
use tracing::info;

/// File stem used when a title leaves nothing usable
pub const FALLBACK_FILE_STEM: &str = "proposal";

/// `"{title}.{extension}"` with path-hostile characters replaced by `_`
pub fn export_file_name(title: &str, extension: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let stem = if stem.is_empty() { FALLBACK_FILE_STEM } else { stem };
    format!("{stem}.{extension}")
}

/// Runs exports with one set of settings
#[derive(Debug, Clone)]
pub struct ProposalExporter {
    settings: ExportSettings,
    loader: AssetLoader,
    generated_at: Option<NaiveDateTime>,
}

impl ProposalExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            loader: AssetLoader::new(),
            generated_at: None,
        }
    }

    pub fn with_loader(mut self, loader: AssetLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Fix the export timestamp instead of reading the clock
    pub fn generated_at(mut self, timestamp: NaiveDateTime) -> Self {
        self.generated_at = Some(timestamp);
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    fn timestamp(&self) -> NaiveDateTime {
        self.generated_at
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }

    /// Title drawn on the document and used for its file name
    pub fn title<'a>(&'a self, metadata: &'a DocumentMetadata) -> &'a str {
        self.settings.title_or_default(&metadata.title)
    }

    fn author<'a>(&'a self, metadata: &'a DocumentMetadata) -> Option<&'a str> {
        metadata.author.as_deref().or(self.settings.author.as_deref())
    }

    /// Every image source the PDF may draw, deduplicated in first-use order
    pub fn image_sources(&self, blocks: &[Block]) -> Vec<String> {
        let mut sources: Vec<String> = Vec::new();
        let mut add = |source: &str| {
            if !source.trim().is_empty() && !sources.iter().any(|s| s == source) {
                sources.push(source.to_string());
            }
        };
        for source in self.settings.letterhead().iter().chain(&self.settings.footer_logos) {
            add(source.as_str());
        }
        collect_block_images(blocks, &mut add);
        sources
    }

    /// Load all images concurrently and wait for every one of them
    pub async fn load_assets(&self, blocks: &[Block]) -> LoadedAssets {
        let sources = self.image_sources(blocks);
        let outcomes = self.loader.load_all(&sources).await;
        let assets = LoadedAssets::from_outcomes(&sources, outcomes);
        info!(
            requested = sources.len(),
            loaded = assets.rasters().len(),
            "assets loaded"
        );
        assets
    }

    /// Render pages with already loaded assets
    pub fn render(&self, metadata: &DocumentMetadata, blocks: &[Block], assets: &LoadedAssets) -> Result<RenderModel> {
        let renderer = PaginatedRenderer::new(self.settings.geometry.clone())?
            .with_assets(assets.catalog().clone())
            .with_letterhead(self.settings.letterhead().to_vec())
            .with_footer_logos(self.settings.footer_logos.clone())
            .with_reference(metadata.reference.clone())
            .generated_at(self.timestamp());
        Ok(renderer.render(self.title(metadata), blocks))
    }

    /// Load assets, render and produce PDF bytes
    pub async fn export_pdf_bytes(&self, metadata: &DocumentMetadata, blocks: &[Block]) -> Result<Vec<u8>> {
        let assets = self.load_assets(blocks).await;
        let model = self.render(metadata, blocks, &assets)?;

        let options = PdfExportOptions::for_document(metadata)
            .with_title(self.title(metadata))
            .with_author(self.author(metadata).map(str::to_string))
            .with_compression(self.settings.compress)
            .with_creation_date(self.timestamp());

        let bytes = pdf::export_pdf_bytes(&model, &assets, options)?;
        info!(
            title = self.title(metadata),
            blocks = blocks.len(),
            pages = model.page_count(),
            bytes = bytes.len(),
            "pdf export finished"
        );
        Ok(bytes)
    }

    /// Export a PDF named after the title into `dir`; returns the written path
    pub async fn export_pdf_file(&self, metadata: &DocumentMetadata, blocks: &[Block], dir: &Path) -> Result<PathBuf> {
        let bytes = self.export_pdf_bytes(metadata, blocks).await?;
        let path = dir.join(export_file_name(self.title(metadata), "pdf"));
        write_file_replacing_async(&path, &bytes).await?;
        Ok(path)
    }

    fn core_properties(&self, metadata: &DocumentMetadata) -> CoreProperties {
        let properties = CoreProperties::new(self.title(metadata), self.timestamp());
        match self.author(metadata) {
            Some(author) => properties.with_creator(author),
            None => properties,
        }
    }

    /// Produce DOCX bytes
    pub fn export_docx_bytes(&self, metadata: &DocumentMetadata, blocks: &[Block]) -> Result<Vec<u8>> {
        let bytes = docx::export_docx_bytes(blocks, &self.core_properties(metadata))?;
        info!(
            title = self.title(metadata),
            blocks = blocks.len(),
            bytes = bytes.len(),
            "docx export finished"
        );
        Ok(bytes)
    }

    /// Export a DOCX named after the title into `dir`; returns the written path
    pub fn export_docx_file(&self, metadata: &DocumentMetadata, blocks: &[Block], dir: &Path) -> Result<PathBuf> {
        let path = dir.join(export_file_name(self.title(metadata), "docx"));
        docx::export_docx(blocks, &self.core_properties(metadata), &path)?;
        Ok(path)
    }
}

fn collect_block_images(blocks: &[Block], add: &mut impl FnMut(&str)) {
    for block in blocks {
        match block {
            Block::Image { source, .. } => add(source),
            Block::List { items, .. } => {
                for item in items {
                    collect_block_images(item, add);
                }
            }
            _ => {}
        }
    }
}
