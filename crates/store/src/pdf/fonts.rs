//! PDF Font Handling
//!
//! Only the standard Type1 faces are used, so nothing is embedded; each
//! distinct face on the document gets one font resource (F0, F1, ...).

use super::objects::{PdfDictionary, PdfObject};

/// Standard PDF fonts used by the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    /// Get the PDF base font name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    pub fn is_mono(&self) -> bool {
        matches!(
            self,
            StandardFont::Courier
                | StandardFont::CourierBold
                | StandardFont::CourierOblique
                | StandardFont::CourierBoldOblique
        )
    }

    /// Match a family name; anything that is not monospace falls back to Helvetica
    pub fn from_family(family: &str, bold: bool, italic: bool) -> Self {
        let family = family.to_lowercase();
        if family.contains("courier") || family.contains("mono") {
            match (bold, italic) {
                (false, false) => StandardFont::Courier,
                (true, false) => StandardFont::CourierBold,
                (false, true) => StandardFont::CourierOblique,
                (true, true) => StandardFont::CourierBoldOblique,
            }
        } else {
            match (bold, italic) {
                (false, false) => StandardFont::Helvetica,
                (true, false) => StandardFont::HelveticaBold,
                (false, true) => StandardFont::HelveticaOblique,
                (true, true) => StandardFont::HelveticaBoldOblique,
            }
        }
    }

    /// Font dictionary for this face
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new().with_type("Font");
        dict.insert("Subtype", PdfObject::name("Type1"));
        dict.insert("BaseFont", PdfObject::name(self.pdf_name()));
        dict.insert("Encoding", PdfObject::name("WinAnsiEncoding"));
        dict
    }
}

/// Font resources in first-use order
#[derive(Debug, Default)]
pub struct FontManager {
    fonts: Vec<StandardFont>,
}

impl FontManager {
    /// Resource name for a face, registering it on first use
    pub fn resource_name(&mut self, font: StandardFont) -> String {
        let index = match self.fonts.iter().position(|f| *f == font) {
            Some(index) => index,
            None => {
                self.fonts.push(font);
                self.fonts.len() - 1
            }
        };
        format!("F{index}")
    }

    /// Registered fonts with their resource names
    pub fn fonts(&self) -> impl Iterator<Item = (String, StandardFont)> + '_ {
        self.fonts
            .iter()
            .enumerate()
            .map(|(i, font)| (format!("F{i}"), *font))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_matching() {
        assert_eq!(StandardFont::from_family("Helvetica", true, false), StandardFont::HelveticaBold);
        assert_eq!(StandardFont::from_family("Courier", false, true), StandardFont::CourierOblique);
        assert_eq!(StandardFont::from_family("Unknown Serif", false, false), StandardFont::Helvetica);
    }

    #[test]
    fn test_resource_names_stable() {
        let mut fonts = FontManager::default();
        assert_eq!(fonts.resource_name(StandardFont::Helvetica), "F0");
        assert_eq!(fonts.resource_name(StandardFont::HelveticaBold), "F1");
        assert_eq!(fonts.resource_name(StandardFont::Helvetica), "F0");
        assert_eq!(fonts.fonts().count(), 2);
    }

    #[test]
    fn test_font_dictionary() {
        let dict = StandardFont::CourierBold.to_dictionary();
        assert_eq!(dict.get("BaseFont"), Some(&PdfObject::name("Courier-Bold")));
        assert_eq!(dict.get("Encoding"), Some(&PdfObject::name("WinAnsiEncoding")));
    }
}
