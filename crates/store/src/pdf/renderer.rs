//! Render model to PDF conversion
//!
//! Turns each [`PageRender`] into a content stream. Render coordinates are
//! top-left based points with text positioned at its baseline; PDF user
//! space starts at the bottom-left, so every y is flipped against the page
//! height here.

use super::content::ContentStream;
use super::fonts::{FontManager, StandardFont};
use super::images::ImageManager;
use crate::LoadedAssets;
use render_model::{Color, GlyphRun, ImageRenderInfo, PageRender, Rect, RenderItem};
use tracing::warn;

fn rgb(color: Color) -> (f64, f64, f64) {
    (
        f64::from(color.r) / 255.0,
        f64::from(color.g) / 255.0,
        f64::from(color.b) / 255.0,
    )
}

/// Converts pages and collects the font and image resources they use
#[derive(Debug, Default)]
pub struct PdfRenderer {
    fonts: FontManager,
    images: ImageManager,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fonts(&self) -> &FontManager {
        &self.fonts
    }

    pub fn images(&self) -> &ImageManager {
        &self.images
    }

    /// Render a page to a content stream.
    ///
    /// Graphics are drawn before text so panels sit behind their lines.
    /// Images whose raster is missing from `assets` are skipped.
    pub fn render_page(&mut self, page: &PageRender, assets: &LoadedAssets) -> ContentStream {
        let mut content = ContentStream::new();
        let mut texts: Vec<&GlyphRun> = Vec::new();

        for item in &page.items {
            match item {
                RenderItem::GlyphRun(run) => texts.push(run),
                RenderItem::Rectangle {
                    bounds,
                    fill,
                    stroke,
                    stroke_width,
                } => render_rectangle(&mut content, bounds, *fill, *stroke, *stroke_width, page.height),
                RenderItem::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                    width,
                } => {
                    let (r, g, b) = rgb(*color);
                    content
                        .save_state()
                        .set_stroke_rgb(r, g, b)
                        .set_line_width(*width)
                        .move_to(*x1, page.height - y1)
                        .line_to(*x2, page.height - y2)
                        .stroke()
                        .restore_state();
                }
                RenderItem::Image(image) => self.render_image(&mut content, image, assets, page.height),
            }
        }

        if !texts.is_empty() {
            self.render_text(&mut content, &texts, page.height);
        }
        content
    }

    fn render_text(&mut self, content: &mut ContentStream, texts: &[&GlyphRun], page_height: f64) {
        content.begin_text();
        let mut current_font: Option<(String, f64)> = None;
        let mut current_color: Option<Color> = None;

        for run in texts {
            let font = StandardFont::from_family(&run.font_family, run.bold, run.italic);
            let name = self.fonts.resource_name(font);
            let changed = current_font
                .as_ref()
                .map_or(true, |(n, size)| *n != name || *size != run.font_size);
            if changed {
                content.set_font(&name, run.font_size);
                current_font = Some((name, run.font_size));
            }

            if current_color != Some(run.color) {
                let (r, g, b) = rgb(run.color);
                content.set_fill_rgb(r, g, b);
                current_color = Some(run.color);
            }

            content
                .set_text_matrix(1.0, 0.0, 0.0, 1.0, run.x, page_height - run.y)
                .show_text(&run.text);
        }
        content.end_text();

        // Underlines are drawn after the text object, in the run's colour
        for run in texts.iter().filter(|r| r.underline && !r.text.is_empty()) {
            let font = StandardFont::from_family(&run.font_family, run.bold, run.italic);
            let width = layout_width(run, font);
            let y = page_height - run.y - run.font_size * 0.12;
            let (r, g, b) = rgb(run.color);
            content
                .save_state()
                .set_stroke_rgb(r, g, b)
                .set_line_width((run.font_size * 0.06).max(0.5))
                .move_to(run.x, y)
                .line_to(run.x + width, y)
                .stroke()
                .restore_state();
        }
    }

    fn render_image(
        &mut self,
        content: &mut ContentStream,
        image: &ImageRenderInfo,
        assets: &LoadedAssets,
        page_height: f64,
    ) {
        if assets.raster(&image.resource_id).is_none() {
            warn!(resource = %image.resource_id, "image resource has no raster, skipping");
            return;
        }
        let name = self.images.resource_name(&image.resource_id);
        let b = &image.bounds;
        content
            .save_state()
            .transform(b.width, 0.0, 0.0, b.height, b.x, page_height - b.y - b.height)
            .draw_xobject(&name)
            .restore_state();
    }
}

fn render_rectangle(
    content: &mut ContentStream,
    bounds: &Rect,
    fill: Option<Color>,
    stroke: Option<Color>,
    stroke_width: f64,
    page_height: f64,
) {
    content.save_state();
    if let Some(color) = fill {
        let (r, g, b) = rgb(color);
        content.set_fill_rgb(r, g, b);
    }
    if let Some(color) = stroke {
        let (r, g, b) = rgb(color);
        content.set_stroke_rgb(r, g, b).set_line_width(stroke_width);
    }
    content.rect(
        bounds.x,
        page_height - bounds.y - bounds.height,
        bounds.width,
        bounds.height,
    );
    match (fill.is_some(), stroke.is_some()) {
        (true, true) => content.fill_and_stroke(),
        (true, false) => content.fill(),
        (false, true) => content.stroke(),
        (false, false) => content.end_path(),
    };
    content.restore_state();
}

/// Width of a run in points, using the layout engine's metrics
fn layout_width(run: &GlyphRun, font: StandardFont) -> f64 {
    let mut style = if font.is_mono() {
        layout_engine::TextStyle::mono(run.font_size as f32)
    } else {
        layout_engine::TextStyle::sans(run.font_size as f32)
    };
    style.bold = run.bold;
    style.italic = run.italic;
    f64::from(layout_engine::text_width(&run.text, &style) * layout_engine::PT_PER_MM)
}
