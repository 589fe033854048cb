//! DOCX Writer Infrastructure
//!
//! Assembles the ZIP package: content types, relationships, document,
//! styles, settings and core properties.

use crate::docx::content_types::{create_default_content_types, ContentTypes};
use crate::docx::document_writer::DocumentWriter;
use crate::docx::error::DocxResult;
use crate::docx::namespaces;
use crate::docx::relationships::{create_document_rels, create_root_rels, Relationships};
use crate::docx::structure::StructuredParagraph;
use crate::docx::styles_writer::StylesWriter;
use chrono::NaiveDateTime;
use quick_xml::escape::escape;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Document properties written to docProps/core.xml
#[derive(Debug, Clone, PartialEq)]
pub struct CoreProperties {
    pub title: String,
    pub creator: Option<String>,
    pub created: NaiveDateTime,
}

impl CoreProperties {
    pub fn new(title: impl Into<String>, created: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            creator: None,
            created,
        }
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="{}" xmlns:dcterms="{}" xmlns:xsi="{}">"#,
            namespaces::CP,
            namespaces::DC,
            namespaces::DCTERMS,
            namespaces::XSI,
        ));
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape(self.title.as_str())));
        if let Some(creator) = &self.creator {
            xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape(creator.as_str())));
        }
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            self.created.format("%Y-%m-%dT%H:%M:%SZ")
        ));
        xml.push_str("</cp:coreProperties>");
        xml
    }
}

/// Main DOCX writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
}

impl<W: Write + Seek> DocxWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: create_default_content_types(),
            root_rels: create_root_rels(),
            doc_rels: create_document_rels(),
        }
    }

    /// Write a complete package and return the finished writer
    pub fn write(mut self, paragraphs: &[StructuredParagraph], properties: &CoreProperties) -> DocxResult<W> {
        let content_types_xml = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types_xml)?;

        let root_rels_xml = self.root_rels.to_xml();
        self.write_file("_rels/.rels", &root_rels_xml)?;

        let doc_rels_xml = self.doc_rels.to_xml();
        self.write_file("word/_rels/document.xml.rels", &doc_rels_xml)?;

        self.write_file("word/document.xml", &DocumentWriter::new().write(paragraphs))?;
        self.write_file("word/styles.xml", &StylesWriter::new().write())?;
        self.write_file("word/settings.xml", &generate_settings_xml())?;
        self.write_file("docProps/core.xml", &properties.to_xml())?;

        Ok(self.zip.finish()?)
    }

    /// Write a file to the ZIP archive
    pub fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Generate a minimal settings.xml
pub fn generate_settings_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="{}"><w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat></w:settings>"#,
        namespaces::W
    )
}
