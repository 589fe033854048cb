//! Export settings management
//!
//! Settings persistence and loading for the export pipeline: document
//! defaults, logo sources and page geometry.

use crate::Result;
use doc_model::DEFAULT_TITLE;
use layout_engine::{PageGeometry, MAX_LETTERHEAD_LOGOS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used inside a settings directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Settings shared by every export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    /// Title used when the document supplies none
    pub default_title: String,
    pub author: Option<String>,
    /// Letterhead logo sources (paths or data URIs), first page only
    pub letterhead_logos: Vec<String>,
    /// Small logos stamped into every footer
    pub footer_logos: Vec<String>,
    pub geometry: PageGeometry,
    /// Deflate PDF content streams
    pub compress: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            author: None,
            letterhead_logos: Vec::new(),
            footer_logos: Vec::new(),
            geometry: PageGeometry::default(),
            compress: true,
        }
    }
}

impl ExportSettings {
    /// Letterhead sources that fit the letterhead row; extras are dropped with a warning
    pub fn letterhead(&self) -> &[String] {
        let slots = self.geometry.letterhead_slots().len().min(MAX_LETTERHEAD_LOGOS);
        if self.letterhead_logos.len() > slots {
            tracing::warn!(
                "{} letterhead logos configured, only the first {} are drawn",
                self.letterhead_logos.len(),
                slots
            );
            return &self.letterhead_logos[..slots];
        }
        &self.letterhead_logos
    }

    /// Title to use for a document with the given (possibly blank) title
    pub fn title_or_default<'a>(&'a self, title: &'a str) -> &'a str {
        if !title.trim().is_empty() {
            title.trim()
        } else if !self.default_title.trim().is_empty() {
            self.default_title.trim()
        } else {
            DEFAULT_TITLE
        }
    }
}

/// Settings manager for loading and saving export settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: ExportSettings,
}

impl SettingsManager {
    /// Create a new settings manager for `settings.json` in the given directory
    pub fn new(settings_dir: PathBuf) -> Self {
        Self::from_file(settings_dir.join(SETTINGS_FILE_NAME))
    }

    /// Create a settings manager for an explicit settings file
    pub fn from_file(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: ExportSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    fn apply(&mut self, content: &str) {
        match serde_json::from_str::<ExportSettings>(content) {
            Ok(settings) => {
                self.current = settings;
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file, using defaults: {}", e);
                self.current = ExportSettings::default();
            }
        }
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub async fn load(&mut self) -> Result<&ExportSettings> {
        if tokio::fs::try_exists(&self.settings_path).await? {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            self.apply(&content);
        } else {
            self.current = ExportSettings::default();
        }
        Ok(&self.current)
    }

    /// Load settings synchronously
    pub fn load_sync(&mut self) -> Result<&ExportSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            self.apply(&content);
        } else {
            self.current = ExportSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    /// Save settings synchronously
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn get(&self) -> &ExportSettings {
        &self.current
    }

    /// Replace settings and save to disk
    pub async fn update(&mut self, settings: ExportSettings) -> Result<()> {
        self.current = settings;
        self.save().await
    }

    pub fn update_sync(&mut self, settings: ExportSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }
}
