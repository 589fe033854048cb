//! Styles.xml writer
//!
//! The exported document uses a fixed style set: Normal, Title and
//! Heading1 to Heading4.

use crate::docx::namespaces;
use crate::docx::structure::MAX_DOCX_HEADING_LEVEL;

/// Title run size in half-points (16 pt)
pub const TITLE_HALF_POINTS: u32 = 32;

/// Heading sizes in half-points, levels 1 to 4
const HEADING_HALF_POINTS: [u32; MAX_DOCX_HEADING_LEVEL as usize] = [32, 28, 26, 24];

/// Writer for styles.xml
#[derive(Debug, Default)]
pub struct StylesWriter;

impl StylesWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate styles.xml content
    pub fn write(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, namespaces::W));

        self.write_doc_defaults(&mut xml);

        xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal">"#);
        xml.push_str(r#"<w:name w:val="Normal"/><w:qFormat/>"#);
        xml.push_str("</w:style>");

        self.write_paragraph_style(&mut xml, "Title", "Title", TITLE_HALF_POINTS, None);
        for (i, size) in HEADING_HALF_POINTS.iter().enumerate() {
            let level = i + 1;
            self.write_paragraph_style(
                &mut xml,
                &format!("Heading{level}"),
                &format!("heading {level}"),
                *size,
                Some(i),
            );
        }

        xml.push_str("</w:styles>");
        xml
    }

    fn write_doc_defaults(&self, xml: &mut String) {
        xml.push_str("<w:docDefaults>");
        xml.push_str("<w:rPrDefault><w:rPr>");
        xml.push_str(r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#);
        xml.push_str(r#"<w:sz w:val="22"/><w:szCs w:val="22"/>"#);
        xml.push_str("</w:rPr></w:rPrDefault>");
        xml.push_str("<w:pPrDefault><w:pPr>");
        xml.push_str(r#"<w:spacing w:after="160" w:line="259" w:lineRule="auto"/>"#);
        xml.push_str("</w:pPr></w:pPrDefault>");
        xml.push_str("</w:docDefaults>");
    }

    fn write_paragraph_style(
        &self,
        xml: &mut String,
        id: &str,
        name: &str,
        half_points: u32,
        outline_level: Option<usize>,
    ) {
        xml.push_str(&format!(r#"<w:style w:type="paragraph" w:styleId="{id}">"#));
        xml.push_str(&format!(r#"<w:name w:val="{name}"/>"#));
        xml.push_str(r#"<w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#);
        xml.push_str("<w:pPr><w:keepNext/>");
        xml.push_str(r#"<w:spacing w:before="240" w:after="120"/>"#);
        if let Some(level) = outline_level {
            xml.push_str(&format!(r#"<w:outlineLvl w:val="{level}"/>"#));
        }
        xml.push_str("</w:pPr>");
        xml.push_str(&format!(
            r#"<w:rPr><w:b/><w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/></w:rPr>"#
        ));
        xml.push_str("</w:style>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_cover_headings_one_to_four() {
        let xml = StylesWriter::new().write();
        for level in 1..=4 {
            assert!(xml.contains(&format!(r#"w:styleId="Heading{level}""#)));
        }
        assert!(!xml.contains(r#"w:styleId="Heading5""#));
    }

    #[test]
    fn test_title_style_is_bold_sixteen_point() {
        let xml = StylesWriter::new().write();
        let title = xml.split(r#"w:styleId="Title""#).nth(1).unwrap();
        let title = &title[..title.find("</w:style>").unwrap()];
        assert!(title.contains("<w:b/>"));
        assert!(title.contains(r#"<w:sz w:val="32"/>"#));
    }
}
