//! Render item types
//!
//! Drawing instructions for one fixed-size page. Coordinates are points
//! measured from the top-left corner of the page; text positions are
//! baselines.

use serde::{Deserialize, Serialize};

/// A rectangle in render coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Secondary text (footer, image placeholders)
    pub const MUTED: Color = Color::rgb(110, 110, 110);
    /// Rules and cell borders
    pub const RULE: Color = Color::rgb(190, 190, 190);
    /// Blockquote panel background
    pub const QUOTE_FILL: Color = Color::rgb(240, 244, 250);
    /// Blockquote accent bar
    pub const ACCENT: Color = Color::rgb(52, 101, 164);
    /// Code panel background
    pub const CODE_FILL: Color = Color::rgb(244, 244, 244);
    /// Table header cell background
    pub const HEADER_FILL: Color = Color::rgb(225, 232, 242);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Standard face names understood by the PDF writer
pub const SANS_FAMILY: &str = "Helvetica";
pub const MONO_FAMILY: &str = "Courier";

/// A glyph run for rendering text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    pub text: String,
    pub font_family: String,
    /// Font size in points
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Color,
    /// Baseline start
    pub x: f64,
    pub y: f64,
}

/// Image render information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRenderInfo {
    /// Key of the decoded raster in the asset catalog
    pub resource_id: String,
    pub bounds: Rect,
    pub alt_text: Option<String>,
}

impl ImageRenderInfo {
    pub fn new(resource_id: impl Into<String>, bounds: Rect) -> Self {
        Self {
            resource_id: resource_id.into(),
            bounds,
            alt_text: None,
        }
    }
}

/// Render item types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderItem {
    /// A glyph run (text)
    GlyphRun(GlyphRun),
    /// A filled and/or stroked rectangle
    Rectangle {
        bounds: Rect,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f64,
    },
    /// A line
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
    },
    /// An image
    Image(ImageRenderInfo),
}

impl RenderItem {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderItem::GlyphRun(run) => Some(&run.text),
            _ => None,
        }
    }
}

/// A rendered page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRender {
    pub page_index: u32,
    pub width: f64,
    pub height: f64,
    pub items: Vec<RenderItem>,
}

impl PageRender {
    pub fn new(page_index: u32, width: f64, height: f64) -> Self {
        Self {
            page_index,
            width,
            height,
            items: Vec::new(),
        }
    }

    /// Text of every glyph run on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(RenderItem::as_text)
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageRenderInfo> {
        self.items.iter().filter_map(|item| match item {
            RenderItem::Image(info) => Some(info),
            _ => None,
        })
    }
}

/// The complete render model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    pub pages: Vec<PageRender>,
}

impl RenderModel {
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    pub fn add_page(&mut self, page: PageRender) {
        self.pages.push(page);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_item_tagging() {
        let item = RenderItem::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 0.0,
            color: Color::RULE,
            width: 0.5,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "Line");
    }

    #[test]
    fn test_page_texts_skip_non_text() {
        let mut page = PageRender::new(0, 595.0, 842.0);
        page.items.push(RenderItem::Rectangle {
            bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
            fill: Some(Color::WHITE),
            stroke: None,
            stroke_width: 0.0,
        });
        page.items.push(RenderItem::GlyphRun(GlyphRun {
            text: "Hello".into(),
            font_family: SANS_FAMILY.into(),
            font_size: 11.0,
            bold: false,
            italic: false,
            underline: false,
            color: Color::BLACK,
            x: 0.0,
            y: 0.0,
        }));
        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["Hello"]);
    }
}
