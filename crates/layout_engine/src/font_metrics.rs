//! Text measurement for the standard PDF faces
//!
//! Widths are estimated from per-class advance factors of the Helvetica
//! and Courier families, which is accurate enough to wrap lines the way
//! the exported document draws them.

use crate::MM_PER_PT;

/// Typeface family for layout and drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Sans,
    Mono,
}

/// Font selection for a piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    /// Size in points
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    /// Drawn with a rule under the baseline; does not affect width
    pub underline: bool,
}

impl TextStyle {
    pub fn sans(font_size: f32) -> Self {
        Self {
            family: FontFamily::Sans,
            font_size,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    pub fn mono(font_size: f32) -> Self {
        Self {
            family: FontFamily::Mono,
            ..Self::sans(font_size)
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

/// Advance of one character in em units
fn char_advance(c: char, style: &TextStyle) -> f32 {
    if style.family == FontFamily::Mono {
        return 0.6;
    }

    let base = match c {
        ' ' | '\u{a0}' => 0.278,
        'i' | 'j' | 'l' | '\'' | '|' | '.' | ',' | ':' | ';' | '!' => 0.24,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '/' => 0.333,
        'm' | 'w' => 0.833,
        'M' | 'W' | '@' | '%' => 0.889,
        '0'..='9' => 0.556,
        c if c.is_ascii_uppercase() => 0.667,
        c if c.is_ascii_lowercase() => 0.54,
        c if c.is_ascii() => 0.584,
        _ => 0.6,
    };

    if style.bold {
        base * 1.06
    } else {
        base
    }
}

/// Estimated width of `text` in millimetres
pub fn text_width(text: &str, style: &TextStyle) -> f32 {
    let ems: f32 = text.chars().map(|c| char_advance(c, style)).sum();
    ems * style.font_size * MM_PER_PT
}
