//! Command handlers

use crate::{InputArgs, MetadataArgs};
use anyhow::Context;
use doc_model::{templates::DEFAULT_PROPOSAL_HTML, Document, DocumentMetadata, DocumentTreeBuilder, TextMetrics, WordCount};
use std::path::{Path, PathBuf};
use store::{AssetLoader, ExportSettings, ProposalExporter, SettingsManager};
use tracing::info;

/// Settings from `path`, or defaults when no file is given
pub async fn load_settings(path: Option<&Path>) -> anyhow::Result<ExportSettings> {
    let Some(path) = path else {
        return Ok(ExportSettings::default());
    };
    let mut manager = SettingsManager::from_file(path);
    let settings = manager
        .load()
        .await
        .with_context(|| format!("reading settings {}", path.display()))?;
    Ok(settings.clone())
}

/// Build the document from the input file, or the bundled template
pub async fn read_document(input: &InputArgs) -> anyhow::Result<Document> {
    let builder = DocumentTreeBuilder::new();
    let Some(path) = &input.input else {
        info!("no input given, using the bundled proposal template");
        return Ok(builder.build_html(DEFAULT_PROPOSAL_HTML));
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    if input.json {
        builder
            .build_json(&content)
            .with_context(|| format!("parsing content tree {}", path.display()))
    } else {
        Ok(builder.build_html(&content))
    }
}

fn metadata(args: &MetadataArgs) -> DocumentMetadata {
    DocumentMetadata {
        title: args.title.clone().unwrap_or_default(),
        author: args.author.clone(),
        reference: args.reference.clone(),
    }
}

pub async fn export_pdf(
    mut settings: ExportSettings,
    input: &InputArgs,
    args: &MetadataArgs,
    logos: Vec<String>,
    footer_logos: Vec<String>,
    base_dir: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    if !logos.is_empty() {
        settings.letterhead_logos = logos;
    }
    if !footer_logos.is_empty() {
        settings.footer_logos = footer_logos;
    }
    let loader = match base_dir {
        Some(dir) => AssetLoader::with_base_dir(dir),
        None => AssetLoader::new(),
    };

    let document = read_document(input).await?;
    let exporter = ProposalExporter::new(settings).with_loader(loader);
    exporter
        .export_pdf_file(&metadata(args), document.blocks(), &args.out)
        .await
        .context("exporting PDF")
}

pub async fn export_docx(settings: ExportSettings, input: &InputArgs, args: &MetadataArgs) -> anyhow::Result<PathBuf> {
    let document = read_document(input).await?;
    let exporter = ProposalExporter::new(settings);
    let path = exporter.export_docx_file(&metadata(args), document.blocks(), &args.out)?;
    Ok(path)
}

pub async fn count(input: &InputArgs) -> anyhow::Result<WordCount> {
    let document = read_document(input).await?;
    Ok(TextMetrics::count(document.blocks()))
}

/// Write default settings into `dir`, keeping an existing file untouched
pub async fn init_settings(dir: PathBuf) -> anyhow::Result<PathBuf> {
    let manager = SettingsManager::new(dir);
    let path = manager.settings_path().to_path_buf();
    if tokio::fs::try_exists(&path).await? {
        anyhow::bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    manager.save().await.context("writing settings")?;
    Ok(path)
}
