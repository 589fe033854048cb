//! PDF Document Structure
//!
//! Catalog, page tree, page objects, the shared resources dictionary and
//! the Info dictionary.

use super::objects::{PdfDictionary, PdfObject};
use chrono::NaiveDateTime;

/// Header version written by the exporter
pub const PDF_VERSION: &str = "1.4";

/// Creator written into the Info dictionary
pub const CREATOR: &str = "proposal-export";

/// PDF document information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Vec<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
}

impl DocumentInfo {
    /// Info with the exporter's creator and producer filled in
    pub fn new() -> Self {
        Self {
            creator: Some(CREATOR.to_string()),
            producer: Some(format!("{} {}", CREATOR, env!("CARGO_PKG_VERSION"))),
            ..Default::default()
        }
    }

    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        let text_entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        for (key, value) in text_entries {
            if let Some(value) = value {
                dict.insert(key, PdfObject::text(value));
            }
        }
        if !self.keywords.is_empty() {
            dict.insert("Keywords", PdfObject::text(&self.keywords.join(", ")));
        }
        if let Some(date) = self.creation_date {
            dict.insert("CreationDate", PdfObject::text(&pdf_date(date)));
        }
        dict
    }
}

/// PDF date string, `D:YYYYMMDDHHmmSS`
pub fn pdf_date(date: NaiveDateTime) -> String {
    format!("D:{}", date.format("%Y%m%d%H%M%S"))
}

/// Resources shared by every page: fonts and image XObjects
#[derive(Debug, Clone, Default)]
pub struct Resources {
    pub fonts: Vec<(String, u32)>,
    pub images: Vec<(String, u32)>,
}

impl Resources {
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut resources = PdfDictionary::new();

        if !self.fonts.is_empty() {
            let mut fonts = PdfDictionary::new();
            for (name, obj) in &self.fonts {
                fonts.insert(name.clone(), PdfObject::Reference(*obj));
            }
            resources.insert("Font", PdfObject::Dictionary(fonts));
        }

        if !self.images.is_empty() {
            let mut xobjects = PdfDictionary::new();
            for (name, obj) in &self.images {
                xobjects.insert(name.clone(), PdfObject::Reference(*obj));
            }
            resources.insert("XObject", PdfObject::Dictionary(xobjects));
        }

        resources.insert(
            "ProcSet",
            PdfObject::Array(
                ["PDF", "Text", "ImageB", "ImageC"]
                    .into_iter()
                    .map(PdfObject::name)
                    .collect(),
            ),
        );
        resources
    }
}

/// Page dictionary for a page of `width` x `height` points
pub fn create_page(parent: u32, content: u32, width: f64, height: f64, resources: &Resources) -> PdfDictionary {
    let mut dict = PdfDictionary::new().with_type("Page");
    dict.insert("Parent", PdfObject::Reference(parent));
    dict.insert("MediaBox", PdfObject::rect(width, height));
    dict.insert("Contents", PdfObject::Reference(content));
    dict.insert("Resources", PdfObject::Dictionary(resources.to_dictionary()));
    dict
}

/// Create the document catalog
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut catalog = PdfDictionary::new().with_type("Catalog");
    catalog.insert("Pages", PdfObject::Reference(pages_ref));
    catalog
}

/// Create the page tree root
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut pages = PdfDictionary::new().with_type("Pages");
    pages.insert(
        "Kids",
        PdfObject::Array(page_refs.iter().map(|r| PdfObject::Reference(*r)).collect()),
    );
    pages.insert("Count", PdfObject::Integer(page_refs.len() as i64));
    pages
}
