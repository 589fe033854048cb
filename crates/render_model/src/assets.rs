//! What the renderer may draw for each image source

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A decoded raster the renderer can place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub resource_id: String,
    pub width_px: u32,
    pub height_px: u32,
}

impl AssetInfo {
    pub fn new(resource_id: impl Into<String>, width_px: u32, height_px: u32) -> Self {
        Self {
            resource_id: resource_id.into(),
            width_px,
            height_px,
        }
    }

    /// Height over width; `None` for degenerate rasters
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width_px == 0 || self.height_px == 0 {
            return None;
        }
        Some(self.height_px as f32 / self.width_px as f32)
    }
}

/// Loaded assets keyed by their source string.
///
/// A source that is absent (never loaded, or failed to load) renders as a
/// blank slot or a text placeholder.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    assets: HashMap<String, AssetInfo>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, info: AssetInfo) {
        self.assets.insert(source.into(), info);
    }

    /// Drawable asset for `source`. Degenerate rasters count as missing.
    pub fn get(&self, source: &str) -> Option<&AssetInfo> {
        self.assets
            .get(source)
            .filter(|info| info.aspect_ratio().is_some())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source() {
        let catalog = AssetCatalog::new();
        assert!(catalog.get("logo.png").is_none());
    }

    #[test]
    fn test_zero_sized_asset_is_not_drawable() {
        let mut catalog = AssetCatalog::new();
        catalog.insert("empty.png", AssetInfo::new("a0", 0, 10));
        catalog.insert("logo.png", AssetInfo::new("a1", 200, 100));
        assert!(catalog.get("empty.png").is_none());
        assert_eq!(catalog.get("logo.png").and_then(AssetInfo::aspect_ratio), Some(0.5));
        assert_eq!(catalog.len(), 2);
    }
}
