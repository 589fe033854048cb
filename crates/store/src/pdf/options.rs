//! PDF export options
//!
//! Metadata for the Info dictionary plus stream compression. Options for a
//! proposal export are usually derived from its [`DocumentMetadata`].

use chrono::NaiveDateTime;
use doc_model::{DocumentMetadata, DEFAULT_TITLE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PdfExportOptions {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Vec<String>,
    /// Deflate content and image streams
    pub compress: bool,
    /// Creation date; the export time when absent
    pub creation_date: Option<NaiveDateTime>,
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            keywords: Vec::new(),
            compress: true,
            creation_date: None,
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Info metadata for a proposal.
    ///
    /// Blank titles fall back to the default proposal title, blank authors
    /// are dropped and a non-blank reference becomes the only keyword.
    pub fn for_document(metadata: &DocumentMetadata) -> Self {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let title = match metadata.title.trim() {
            "" => DEFAULT_TITLE.to_string(),
            title => title.to_string(),
        };

        Self {
            title: Some(title),
            author: non_blank(&metadata.author),
            subject: Some(DEFAULT_TITLE.to_string()),
            keywords: non_blank(&metadata.reference).into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_creation_date(mut self, date: NaiveDateTime) -> Self {
        self.creation_date = Some(date);
        self
    }
}
