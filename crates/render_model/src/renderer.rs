//! Paginated renderer
//!
//! Produces fixed-size pages from a title and a Block list:
//! letterhead logos on the first page, a centred bold title, the body flow,
//! then a footer pass once the total page count is known.

use crate::flow::{fit_in, pt, BlockFlow, Mark};
use crate::{AssetCatalog, Color, PageRender, RenderItem, RenderModel, Result};
use chrono::NaiveDateTime;
use doc_model::{Block, DEFAULT_TITLE};
use layout_engine::{text_width, FlowPaginator, LineBreaker, PageGeometry, SlotRect, TextStyle};

/// Renders documents onto pages of one geometry
#[derive(Debug, Clone)]
pub struct PaginatedRenderer {
    geometry: PageGeometry,
    assets: AssetCatalog,
    letterhead: Vec<String>,
    footer_logos: Vec<String>,
    reference: Option<String>,
    generated_at: NaiveDateTime,
}

impl PaginatedRenderer {
    /// Create a renderer. Fails only when the geometry has no content area.
    pub fn new(geometry: PageGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(Self {
            geometry,
            assets: AssetCatalog::new(),
            letterhead: Vec::new(),
            footer_logos: Vec::new(),
            reference: None,
            generated_at: chrono::Local::now().naive_local(),
        })
    }

    /// Assets available to letterhead, footer and inline images
    pub fn with_assets(mut self, assets: AssetCatalog) -> Self {
        self.assets = assets;
        self
    }

    /// Letterhead logo sources, in slot order
    pub fn with_letterhead(mut self, sources: Vec<String>) -> Self {
        self.letterhead = sources;
        self
    }

    pub fn with_footer_logos(mut self, sources: Vec<String>) -> Self {
        self.footer_logos = sources;
        self
    }

    /// Proposal identifier appended to the footer stamp
    pub fn with_reference(mut self, reference: Option<String>) -> Self {
        self.reference = reference.filter(|r| !r.trim().is_empty());
        self
    }

    /// Timestamp stamped into every footer
    pub fn generated_at(mut self, timestamp: NaiveDateTime) -> Self {
        self.generated_at = timestamp;
        self
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Render the document. Always yields at least one page.
    pub fn render(&self, title: &str, blocks: &[Block]) -> RenderModel {
        let g = &self.geometry;
        let mut paginator = FlowPaginator::for_geometry(g);
        let mut pages = vec![self.blank_page(0)];

        self.draw_letterhead(&mut pages[0]);
        let title_height = self.draw_title(&mut pages[0], title, paginator.cursor().y());
        paginator.advance(title_height);

        let flow = BlockFlow::new(g, &self.assets);
        for block in blocks {
            for unit in flow.units(block) {
                for placed in paginator.place(unit) {
                    while pages.len() <= placed.page {
                        pages.push(self.blank_page(pages.len()));
                    }
                    let page = &mut pages[placed.page];
                    page.items
                        .extend(placed.payload.iter().map(|mark| mark.to_item(placed.top)));
                }
            }
        }

        self.stamp_footers(&mut pages);
        tracing::debug!("rendered {} blocks onto {} pages", blocks.len(), pages.len());
        RenderModel { pages }
    }

    fn blank_page(&self, index: usize) -> PageRender {
        PageRender::new(
            index as u32,
            pt(self.geometry.page_width),
            pt(self.geometry.page_height),
        )
    }

    fn logo(&self, source: &str, slot: SlotRect) -> Option<RenderItem> {
        let info = self.assets.get(source)?;
        let aspect = info.aspect_ratio()?;
        let rect = fit_in(slot, aspect);
        Some(
            Mark::Picture {
                resource_id: info.resource_id.clone(),
                rect,
                alt_text: None,
            }
            .to_item(0.0),
        )
    }

    /// Up to five logos in the top margin; a missing asset leaves its slot blank
    fn draw_letterhead(&self, page: &mut PageRender) {
        for (slot, source) in self.geometry.letterhead_slots().iter().zip(&self.letterhead) {
            match self.logo(source, slot.rect) {
                Some(item) => page.items.push(item),
                None => tracing::debug!("letterhead slot {} left blank for {source}", slot.id),
            }
        }
    }

    /// Draw the title centred at `top` and return the height it consumes
    fn draw_title(&self, page: &mut PageRender, title: &str, top: f32) -> f32 {
        let g = &self.geometry;
        let title = if title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            title.trim()
        };
        let style = TextStyle::sans(g.title_font_size).bold();
        let advance = g.line_advance(g.title_font_size);
        let lines = LineBreaker::new(style, g.content_width()).break_text(title);

        for (i, line) in lines.iter().enumerate() {
            let x = (g.page_width - text_width(line, &style)) / 2.0;
            let baseline = top + i as f32 * advance + advance * 0.75;
            page.items.push(Mark::text(x, baseline, line.as_str(), style).to_item(0.0));
        }
        g.title_advance + lines.len().saturating_sub(1) as f32 * advance
    }

    /// Second pass: rule, timestamp, page numbers and small logos on every page
    fn stamp_footers(&self, pages: &mut [PageRender]) {
        let g = &self.geometry;
        let footer = &g.footer;
        let total = pages.len();
        let style = TextStyle::sans(footer.font_size);
        let rule_y = g.page_height - footer.rule_offset;
        let baseline = g.page_height - footer.baseline_offset;
        let mut stamp = format!("Generated {}", self.generated_at.format("%Y-%m-%d %H:%M"));
        if let Some(reference) = &self.reference {
            stamp.push_str(" | ");
            stamp.push_str(reference.trim());
        }

        let logos: Vec<RenderItem> = footer
            .logo_slots
            .iter()
            .zip(&self.footer_logos)
            .filter_map(|(slot, source)| self.logo(source, g.footer_slot_rect(slot)))
            .collect();

        for (index, page) in pages.iter_mut().enumerate() {
            let number = format!("Page {} of {}", index + 1, total);
            let number_x = g.page_width - g.margin - text_width(&number, &style);
            let marks = [
                Mark::Rule {
                    x1: g.margin,
                    y1: rule_y,
                    x2: g.page_width - g.margin,
                    y2: rule_y,
                    color: Color::RULE,
                    width: 0.5,
                },
                muted(Mark::text(g.margin, baseline, stamp.as_str(), style)),
                muted(Mark::text(number_x, baseline, number, style)),
            ];
            page.items.extend(marks.iter().map(|mark| mark.to_item(0.0)));
            page.items.extend(logos.iter().cloned());
        }
    }
}

fn muted(mark: Mark) -> Mark {
    match mark {
        Mark::Text {
            x,
            baseline,
            text,
            style,
            ..
        } => Mark::Text {
            x,
            baseline,
            text,
            style,
            color: Color::MUTED,
        },
        other => other,
    }
}

/// Resource ids drawn anywhere in the model, in first-use order
pub fn used_resources(model: &RenderModel) -> Vec<&str> {
    let mut seen = Vec::new();
    for info in model.pages.iter().flat_map(PageRender::images) {
        let id: &str = &info.resource_id;
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
