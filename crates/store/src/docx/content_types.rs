//! [Content_Types].xml generation

use crate::docx::content_type_values;
use std::collections::BTreeMap;

/// Content types of the parts in a DOCX package
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Default content types by extension (e.g., "xml" -> "application/xml")
    pub defaults: BTreeMap<String, String>,
    /// Override content types by part name (e.g., "/word/document.xml" -> "...")
    pub overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    /// Content types with the package-level defaults
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.defaults
            .insert("rels".to_string(), content_type_values::RELATIONSHIPS.to_string());
        ct.defaults
            .insert("xml".to_string(), "application/xml".to_string());
        ct
    }

    /// Add an override for a specific part
    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        let normalized = if part_name.starts_with('/') {
            part_name.to_string()
        } else {
            format!("/{part_name}")
        };
        self.overrides.insert(normalized, content_type.to_string());
    }

    /// Generate XML content for [Content_Types].xml
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(r#"<Default Extension="{ext}" ContentType="{ct}"/>"#));
        }
        for (part, ct) in &self.overrides {
            xml.push_str(&format!(r#"<Override PartName="{part}" ContentType="{ct}"/>"#));
        }
        xml.push_str("</Types>");
        xml
    }
}

/// Content types for the parts the exporter writes
pub fn create_default_content_types() -> ContentTypes {
    let mut ct = ContentTypes::new();
    ct.add_override("/word/document.xml", content_type_values::DOCUMENT);
    ct.add_override("/word/styles.xml", content_type_values::STYLES);
    ct.add_override("/word/settings.xml", content_type_values::SETTINGS);
    ct.add_override("/docProps/core.xml", content_type_values::CORE_PROPERTIES);
    ct
}
