//! Asset loading
//!
//! Fetches image sources (file paths or `data:` URIs), decodes them and
//! re-encodes them as raw 8-bit RGB with an optional alpha plane, the form
//! the PDF writer embeds. A load never fails the caller: every problem
//! becomes a [`LoadFailure`] value and is logged.

use base64::{engine::general_purpose::STANDARD, Engine};
use render_model::{AssetCatalog, AssetInfo};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A decoded raster ready for embedding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterAsset {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB, 3 bytes per pixel
    pub rgb: Vec<u8>,
    /// Row-major alpha, 1 byte per pixel; `None` when fully opaque
    pub alpha: Option<Vec<u8>>,
}

impl RasterAsset {
    /// Split an RGBA image into colour and alpha planes
    pub fn from_rgba(image: &image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = (width as usize) * (height as usize);
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(pixels);
        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        let opaque = alpha.iter().all(|a| *a == u8::MAX);
        Self {
            width,
            height,
            rgb,
            alpha: (!opaque).then_some(alpha),
        }
    }
}

/// Why a source could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailureReason {
    #[error("not found")]
    NotFound,
    #[error("read failed: {0}")]
    Io(String),
    #[error("unsupported source")]
    UnsupportedSource,
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("image has no pixels")]
    EmptyImage,
}

/// A source that could not be turned into a raster
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not load image {origin}: {reason}")]
pub struct LoadFailure {
    pub origin: String,
    pub reason: LoadFailureReason,
}

/// Result of loading one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    Loaded(RasterAsset),
    Failed(LoadFailure),
}

impl AssetOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, AssetOutcome::Loaded(_))
    }

    pub fn raster(&self) -> Option<&RasterAsset> {
        match self {
            AssetOutcome::Loaded(raster) => Some(raster),
            AssetOutcome::Failed(_) => None,
        }
    }
}

/// Loads image sources; relative paths resolve against an optional base directory
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    base_dir: Option<PathBuf>,
}

impl AssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load one source. Never panics and never returns an error.
    pub async fn load(&self, source: &str) -> AssetOutcome {
        let outcome = match self.fetch(source).await {
            Ok(bytes) => decode(bytes).await,
            Err(reason) => Err(reason),
        };
        match outcome {
            Ok(raster) => {
                tracing::debug!("loaded image {} ({}x{})", source, raster.width, raster.height);
                AssetOutcome::Loaded(raster)
            }
            Err(reason) => {
                tracing::warn!("image {} skipped: {}", source, reason);
                AssetOutcome::Failed(LoadFailure {
                    origin: source.to_string(),
                    reason,
                })
            }
        }
    }

    /// Load several sources concurrently; outcomes keep the input order
    pub async fn load_all(&self, sources: &[String]) -> Vec<AssetOutcome> {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let loader = self.clone();
                let source = source.clone();
                tokio::spawn(async move { loader.load(&source).await })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (handle, source) in handles.into_iter().zip(sources) {
            let outcome = handle.await.unwrap_or_else(|e| {
                tracing::warn!("image task for {} did not complete: {}", source, e);
                AssetOutcome::Failed(LoadFailure {
                    origin: source.clone(),
                    reason: LoadFailureReason::Io(e.to_string()),
                })
            });
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn fetch(&self, source: &str) -> Result<Vec<u8>, LoadFailureReason> {
        let source = source.trim();
        if source.is_empty() {
            return Err(LoadFailureReason::NotFound);
        }
        if let Some(data) = source.strip_prefix("data:") {
            return decode_data_uri(data);
        }
        if source.contains("://") && !source.starts_with("file://") {
            return Err(LoadFailureReason::UnsupportedSource);
        }

        let path = self.resolve(source.strip_prefix("file://").unwrap_or(source));
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadFailureReason::NotFound,
            _ => LoadFailureReason::Io(e.to_string()),
        })
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Payload of a `data:` URI (the part after the scheme)
fn decode_data_uri(data: &str) -> Result<Vec<u8>, LoadFailureReason> {
    let Some((meta, payload)) = data.split_once(',') else {
        return Err(LoadFailureReason::Decode("data URI without payload".to_string()));
    };
    if !meta.ends_with(";base64") {
        return Err(LoadFailureReason::UnsupportedSource);
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| LoadFailureReason::Decode(e.to_string()))
}

async fn decode(bytes: Vec<u8>) -> Result<RasterAsset, LoadFailureReason> {
    if bytes.is_empty() {
        return Err(LoadFailureReason::EmptyImage);
    }
    tokio::task::spawn_blocking(move || {
        let image = image::load_from_memory(&bytes)
            .map_err(|e| LoadFailureReason::Decode(e.to_string()))?;
        if image.width() == 0 || image.height() == 0 {
            return Err(LoadFailureReason::EmptyImage);
        }
        Ok(RasterAsset::from_rgba(&image.to_rgba8()))
    })
    .await
    .map_err(|e| LoadFailureReason::Decode(e.to_string()))?
}

/// Loaded rasters keyed by resource id, plus the catalog the renderer reads
#[derive(Debug, Clone, Default)]
pub struct LoadedAssets {
    catalog: AssetCatalog,
    rasters: BTreeMap<String, RasterAsset>,
}

impl LoadedAssets {
    /// Register outcomes for `sources` (same order). Failed sources stay absent.
    pub fn from_outcomes(sources: &[String], outcomes: Vec<AssetOutcome>) -> Self {
        let mut assets = Self::default();
        for (source, outcome) in sources.iter().zip(outcomes) {
            if let AssetOutcome::Loaded(raster) = outcome {
                assets.insert(source, raster);
            }
        }
        assets
    }

    /// Register a raster; a source seen before keeps its first resource id
    pub fn insert(&mut self, source: &str, raster: RasterAsset) {
        if self.catalog.get(source).is_some() {
            return;
        }
        let resource_id = format!("img{}", self.rasters.len());
        self.catalog.insert(
            source,
            AssetInfo::new(resource_id.clone(), raster.width, raster.height),
        );
        self.rasters.insert(resource_id, raster);
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    pub fn raster(&self, resource_id: &str) -> Option<&RasterAsset> {
        self.rasters.get(resource_id)
    }

    pub fn rasters(&self) -> &BTreeMap<String, RasterAsset> {
        &self.rasters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn png_bytes(width: u32, height: u32, alpha: u8) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 10, alpha]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_missing_file_is_failure() {
        let outcome = AssetLoader::new().load("/definitely/not/here.png").await;
        match outcome {
            AssetOutcome::Failed(failure) => {
                assert_eq!(failure.reason, LoadFailureReason::NotFound);
                assert_eq!(failure.origin, "/definitely/not/here.png");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_corrupt_bytes_are_decode_failure() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"not an image").unwrap();
        let loader = AssetLoader::with_base_dir(dir.path());
        let outcome = loader.load("bad.png").await;
        assert!(matches!(
            outcome,
            AssetOutcome::Failed(LoadFailure {
                reason: LoadFailureReason::Decode(_),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_empty_file_is_empty_image() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("empty.png"), b"").unwrap();
        let outcome = AssetLoader::with_base_dir(dir.path()).load("empty.png").await;
        assert!(matches!(
            outcome,
            AssetOutcome::Failed(LoadFailure {
                reason: LoadFailureReason::EmptyImage,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_png_file_loads_opaque() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("logo.png"), png_bytes(4, 2, 255)).unwrap();
        let outcome = AssetLoader::with_base_dir(dir.path()).load("logo.png").await;
        let raster = outcome.raster().unwrap();
        assert_eq!((raster.width, raster.height), (4, 2));
        assert_eq!(raster.rgb.len(), 24);
        assert_eq!(&raster.rgb[..3], &[200, 40, 10]);
        assert!(raster.alpha.is_none());
    }

    #[tokio::test]
    async fn test_data_uri_with_alpha() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(3, 3, 128)));
        let outcome = AssetLoader::new().load(&uri).await;
        let raster = outcome.raster().unwrap();
        assert_eq!(raster.alpha.as_ref().map(Vec::len), Some(9));
    }

    #[tokio::test]
    async fn test_remote_source_unsupported() {
        let outcome = AssetLoader::new().load("https://example.org/logo.png").await;
        assert!(matches!(
            outcome,
            AssetOutcome::Failed(LoadFailure {
                reason: LoadFailureReason::UnsupportedSource,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_load_all_preserves_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.png"), png_bytes(1, 1, 255)).unwrap();
        std::fs::write(dir.path().join("c.png"), png_bytes(2, 2, 255)).unwrap();
        let loader = AssetLoader::with_base_dir(dir.path());
        let sources: Vec<String> = ["a.png", "b.png", "c.png"].iter().map(|s| s.to_string()).collect();
        let outcomes = loader.load_all(&sources).await;
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_loaded());
        assert!(!outcomes[1].is_loaded());
        assert_eq!(outcomes[2].raster().map(|r| r.width), Some(2));
    }

    #[tokio::test]
    async fn test_repeated_load_is_idempotent() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(2, 5, 255)));
        let loader = AssetLoader::new();
        assert_eq!(loader.load(&uri).await, loader.load(&uri).await);
    }

    #[test]
    fn test_loaded_assets_skip_failures() {
        let raster = RasterAsset {
            width: 2,
            height: 1,
            rgb: vec![0; 6],
            alpha: None,
        };
        let sources = vec!["ok.png".to_string(), "bad.png".to_string(), "ok.png".to_string()];
        let outcomes = vec![
            AssetOutcome::Loaded(raster.clone()),
            AssetOutcome::Failed(LoadFailure {
                origin: "bad.png".into(),
                reason: LoadFailureReason::NotFound,
            }),
            AssetOutcome::Loaded(raster),
        ];
        let assets = LoadedAssets::from_outcomes(&sources, outcomes);
        assert_eq!(assets.rasters().len(), 1);
        assert!(assets.catalog().get("bad.png").is_none());
        let info = assets.catalog().get("ok.png").unwrap();
        assert!(assets.raster(&info.resource_id).is_some());
    }
}
