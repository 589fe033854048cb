//! Document.xml writer
//!
//! Serializes structured paragraphs to WordprocessingML.

use crate::docx::namespaces;
use crate::docx::structure::{ParagraphKind, StructuredParagraph};
use crate::docx::styles_writer::TITLE_HALF_POINTS;
use quick_xml::escape::escape;

/// Writer for document.xml
#[derive(Debug, Default)]
pub struct DocumentWriter;

impl DocumentWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate document.xml content
    pub fn write(&self, paragraphs: &[StructuredParagraph]) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));
        xml.push_str("<w:body>");

        for paragraph in paragraphs {
            self.write_paragraph(&mut xml, paragraph);
        }

        // A4 portrait, 20 mm margins (in twentieths of a point)
        xml.push_str(r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/>"#);
        xml.push_str(r#"<w:pgMar w:top="1134" w:right="1134" w:bottom="1134" w:left="1134" w:header="708" w:footer="708" w:gutter="0"/>"#);
        xml.push_str("</w:sectPr>");
        xml.push_str("</w:body></w:document>");
        xml
    }

    fn write_paragraph(&self, xml: &mut String, paragraph: &StructuredParagraph) {
        xml.push_str("<w:p>");
        if let Some(style) = paragraph.kind.style_id() {
            xml.push_str(&format!(r#"<w:pPr><w:pStyle w:val="{style}"/></w:pPr>"#));
        }
        if !paragraph.text.is_empty() {
            self.write_run(xml, paragraph);
        }
        xml.push_str("</w:p>");
    }

    fn write_run(&self, xml: &mut String, paragraph: &StructuredParagraph) {
        xml.push_str("<w:r>");

        let mut props = String::new();
        if paragraph.bold {
            props.push_str("<w:b/>");
        }
        if paragraph.italic {
            props.push_str("<w:i/>");
        }
        if paragraph.kind == ParagraphKind::Title {
            props.push_str(&format!(
                r#"<w:sz w:val="{TITLE_HALF_POINTS}"/><w:szCs w:val="{TITLE_HALF_POINTS}"/>"#
            ));
        }
        if !props.is_empty() {
            xml.push_str("<w:rPr>");
            xml.push_str(&props);
            xml.push_str("</w:rPr>");
        }

        for (line_index, line) in paragraph.text.split('\n').enumerate() {
            if line_index > 0 {
                xml.push_str("<w:br/>");
            }
            for (tab_index, segment) in line.split('\t').enumerate() {
                if tab_index > 0 {
                    xml.push_str("<w:tab/>");
                }
                if segment.is_empty() {
                    continue;
                }
                if segment.starts_with(' ') || segment.ends_with(' ') {
                    xml.push_str(r#"<w:t xml:space="preserve">"#);
                } else {
                    xml.push_str("<w:t>");
                }
                xml.push_str(&escape(segment));
                xml.push_str("</w:t>");
            }
        }

        xml.push_str("</w:r>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_run_is_bold() {
        let xml = DocumentWriter::new().write(&[StructuredParagraph::title("Demo")]);
        assert!(xml.contains(r#"<w:pStyle w:val="Title"/>"#));
        assert!(xml.contains(r#"<w:rPr><w:b/><w:sz w:val="32"/>"#));
        assert!(xml.contains("<w:t>Demo</w:t>"));
    }

    #[test]
    fn test_blank_paragraph_has_no_run() {
        let xml = DocumentWriter::new().write(&[StructuredParagraph::blank()]);
        assert!(xml.contains("<w:body><w:p></w:p>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = DocumentWriter::new().write(&[StructuredParagraph::body("R&D <draft>")]);
        assert!(xml.contains("<w:t>R&amp;D &lt;draft&gt;</w:t>"));
    }

    #[test]
    fn test_breaks_and_tabs() {
        let xml = DocumentWriter::new().write(&[StructuredParagraph::body("a\tb\nc")]);
        assert!(xml.contains("<w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t>"));
    }

    #[test]
    fn test_preserve_space() {
        let xml = DocumentWriter::new().write(&[StructuredParagraph::body("\u{2022} A")]);
        assert!(xml.contains("<w:t>\u{2022} A</w:t>"));
        let xml = DocumentWriter::new().write(&[StructuredParagraph::body(" lead")]);
        assert!(xml.contains(r#"<w:t xml:space="preserve"> lead</w:t>"#));
    }
}
