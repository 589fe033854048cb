//! Page geometry
//!
//! Fixed configuration for one render: page size, margins, line advance,
//! per-role font sizes and logo slot positions. Lengths are millimetres,
//! font sizes are points.

use crate::{LayoutError, Result};
use serde::{Deserialize, Serialize};

/// Millimetres per typographic point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Points per millimetre
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Maximum number of letterhead logos drawn on the first page
pub const MAX_LETTERHEAD_LOGOS: usize = 5;

/// A rectangle on the page, measured from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SlotRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A named position for a logo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoSlot {
    pub id: String,
    #[serde(flatten)]
    pub rect: SlotRect,
}

impl LogoSlot {
    pub fn new(id: impl Into<String>, rect: SlotRect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Footer band layout, measured upward from the bottom page edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterGeometry {
    /// Footer text size in points
    pub font_size: f32,
    /// Distance from the bottom edge to the separator rule
    pub rule_offset: f32,
    /// Distance from the bottom edge to the text baseline
    pub baseline_offset: f32,
    /// Small logos; `y` is the distance from the bottom edge to the slot top
    pub logo_slots: Vec<LogoSlot>,
}

impl Default for FooterGeometry {
    fn default() -> Self {
        let size = 7.0;
        let gap = 3.0;
        let count = 3.0;
        let start = (210.0 - (count * size + (count - 1.0) * gap)) / 2.0;
        Self {
            font_size: 8.0,
            rule_offset: 16.0,
            baseline_offset: 9.0,
            logo_slots: (0..3)
                .map(|i| {
                    LogoSlot::new(
                        format!("footer-{}", i + 1),
                        SlotRect::new(start + i as f32 * (size + gap), 14.0, size, size),
                    )
                })
                .collect(),
        }
    }
}

/// Page geometry for a paginated render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    /// Margin on all four sides
    pub margin: f32,
    /// Advance per body line
    pub line_height: f32,
    pub title_font_size: f32,
    /// Vertical space the title consumes on the first page
    pub title_advance: f32,
    pub body_font_size: f32,
    /// Heading sizes for levels 1 to 6
    pub heading_font_sizes: [f32; 6],
    /// Gap inserted between consecutive blocks on the same page
    pub block_spacing: f32,
    /// Tallest an inline image may be drawn
    pub max_image_height: f32,
    /// Letterhead logo positions on the first page
    pub logo_slots: Vec<LogoSlot>,
    pub footer: FooterGeometry,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    /// A4 portrait with a 20 mm margin and five letterhead slots in the top margin
    pub fn a4() -> Self {
        let width = 210.0;
        let margin = 20.0;
        let slot_width = 30.0;
        let content = width - 2.0 * margin;
        let gap = (content - MAX_LETTERHEAD_LOGOS as f32 * slot_width)
            / (MAX_LETTERHEAD_LOGOS as f32 - 1.0);

        Self {
            page_width: width,
            page_height: 297.0,
            margin,
            line_height: 6.0,
            title_font_size: 16.0,
            title_advance: 15.0,
            body_font_size: 11.0,
            heading_font_sizes: [16.0, 14.0, 13.0, 12.0, 11.0, 11.0],
            block_spacing: 2.0,
            max_image_height: 80.0,
            logo_slots: (0..MAX_LETTERHEAD_LOGOS)
                .map(|i| {
                    LogoSlot::new(
                        format!("logo-{}", i + 1),
                        SlotRect::new(margin + i as f32 * (slot_width + gap), 5.0, slot_width, 12.0),
                    )
                })
                .collect(),
            footer: FooterGeometry::default(),
        }
    }

    /// Check the geometry can hold content at all
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(LayoutError::InvalidGeometry(msg));

        if !(self.page_width > 0.0 && self.page_height > 0.0) {
            return invalid(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            ));
        }
        if self.margin < 0.0 {
            return invalid(format!("margin must not be negative, got {}", self.margin));
        }
        if self.content_width() <= 0.0 || self.usable_height() <= 0.0 {
            return invalid(format!(
                "margin {} leaves no content area on a {}x{} page",
                self.margin, self.page_width, self.page_height
            ));
        }
        if self.line_height <= 0.0 {
            return invalid(format!(
                "line height must be positive, got {}",
                self.line_height
            ));
        }
        if self.body_font_size <= 0.0 || self.title_font_size <= 0.0 {
            return invalid("font sizes must be positive".to_string());
        }
        if self.heading_font_sizes.iter().any(|s| *s <= 0.0) {
            return invalid("heading font sizes must be positive".to_string());
        }
        Ok(())
    }

    /// Width available to body text
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Height available to flowed content on one page
    pub fn usable_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    /// First y position available to content
    pub fn content_top(&self) -> f32 {
        self.margin
    }

    /// Flowed content must end at or above this y
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Font size for a heading level; levels past 6 use the level 6 size
    pub fn heading_font_size(&self, level: u8) -> f32 {
        let index = (level.clamp(1, 6) - 1) as usize;
        self.heading_font_sizes[index]
    }

    /// Line advance for text at `font_size`, never less than the body advance
    pub fn line_advance(&self, font_size: f32) -> f32 {
        let scaled = self.line_height * font_size / self.body_font_size;
        scaled.max(self.line_height)
    }

    /// Letterhead slots that are actually used
    pub fn letterhead_slots(&self) -> &[LogoSlot] {
        let n = self.logo_slots.len().min(MAX_LETTERHEAD_LOGOS);
        &self.logo_slots[..n]
    }

    /// Convert a footer slot to page coordinates
    pub fn footer_slot_rect(&self, slot: &LogoSlot) -> SlotRect {
        SlotRect::new(
            slot.rect.x,
            self.page_height - slot.rect.y,
            slot.rect.width,
            slot.rect.height,
        )
    }

    /// Convert millimetres to points
    pub fn to_points(&self, mm: f32) -> f32 {
        mm * PT_PER_MM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_defaults() {
        let g = PageGeometry::a4();
        assert_eq!(g.page_width, 210.0);
        assert_eq!(g.page_height, 297.0);
        assert_eq!(g.margin, 20.0);
        assert_eq!(g.content_width(), 170.0);
        assert_eq!(g.usable_height(), 257.0);
        assert_eq!(g.logo_slots.len(), 5);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_letterhead_slots_fit_top_margin() {
        let g = PageGeometry::a4();
        for slot in &g.logo_slots {
            assert!(slot.rect.y + slot.rect.height <= g.margin);
            assert!(slot.rect.x >= g.margin - 0.001);
            assert!(slot.rect.x + slot.rect.width <= g.page_width - g.margin + 0.001);
        }
    }

    #[test]
    fn test_footer_slots_sit_in_bottom_margin() {
        let g = PageGeometry::a4();
        for slot in &g.footer.logo_slots {
            let rect = g.footer_slot_rect(slot);
            assert!(rect.y >= g.content_bottom());
            assert!(rect.y + rect.height <= g.page_height);
        }
    }

    #[test]
    fn test_letterhead_capped_at_five() {
        let mut g = PageGeometry::a4();
        for i in 0..3 {
            g.logo_slots
                .push(LogoSlot::new(format!("extra-{i}"), SlotRect::new(0.0, 0.0, 1.0, 1.0)));
        }
        assert_eq!(g.letterhead_slots().len(), MAX_LETTERHEAD_LOGOS);
    }

    #[test]
    fn test_validate_rejects_zero_page() {
        let g = PageGeometry {
            page_height: 0.0,
            ..PageGeometry::a4()
        };
        assert!(matches!(g.validate(), Err(LayoutError::InvalidGeometry(_))));
    }

    #[test]
    fn test_validate_rejects_margin_eating_page() {
        let g = PageGeometry {
            margin: 120.0,
            ..PageGeometry::a4()
        };
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_heading_font_size_clamped() {
        let g = PageGeometry::a4();
        assert_eq!(g.heading_font_size(1), 16.0);
        assert_eq!(g.heading_font_size(6), 11.0);
        assert_eq!(g.heading_font_size(9), 11.0);
    }

    #[test]
    fn test_line_advance_scales_with_font() {
        let g = PageGeometry::a4();
        assert_eq!(g.line_advance(11.0), 6.0);
        assert!(g.line_advance(16.0) > 6.0);
        assert_eq!(g.line_advance(8.0), 6.0);
    }

    #[test]
    fn test_serde_partial_override() {
        let g: PageGeometry = serde_json::from_str(r#"{"margin": 15, "lineHeight": 5}"#).unwrap();
        assert_eq!(g.margin, 15.0);
        assert_eq!(g.line_height, 5.0);
        assert_eq!(g.page_width, 210.0);
    }
}
