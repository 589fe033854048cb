//! Block flow
//!
//! Turns each Block into flow units of drawing marks. Marks are measured
//! in millimetres with `y` relative to the top of their slice; the
//! renderer translates them once the paginator has placed the slice.

use crate::{AssetCatalog, Color, GlyphRun, ImageRenderInfo, Rect, RenderItem, MONO_FAMILY, SANS_FAMILY};
use doc_model::{item_text, runs_text, Block, Cell, Run};
use layout_engine::{
    text_width, FlowUnit, FontFamily, LineBreaker, PageGeometry, SlotRect, TextStyle, PT_PER_MM,
};

/// Prefix drawn before every list item
pub const BULLET: &str = "\u{2022} ";

/// Baseline position as a fraction of the line advance
const BASELINE_RATIO: f32 = 0.75;
/// Vertical padding above and below quote and code panels
const PANEL_PAD: f32 = 2.0;
/// Horizontal text inset inside quote and code panels
const PANEL_INSET: f32 = 4.0;
const ACCENT_WIDTH: f32 = 1.2;
/// Cell padding on all sides
const CELL_PAD: f32 = 1.5;
const CODE_FONT_SIZE: f32 = 9.5;

pub(crate) type Slice = Vec<Mark>;
pub(crate) type Unit = FlowUnit<Slice>;

/// Convert millimetres to render points
pub(crate) fn pt(mm: f32) -> f64 {
    f64::from(mm) * f64::from(PT_PER_MM)
}

/// A drawing instruction before placement
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mark {
    Text {
        x: f32,
        baseline: f32,
        text: String,
        style: TextStyle,
        color: Color,
    },
    Panel {
        rect: SlotRect,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        width: f32,
    },
    Picture {
        resource_id: String,
        rect: SlotRect,
        alt_text: Option<String>,
    },
}

impl Mark {
    pub(crate) fn text(x: f32, baseline: f32, text: impl Into<String>, style: TextStyle) -> Self {
        Mark::Text {
            x,
            baseline,
            text: text.into(),
            style,
            color: Color::BLACK,
        }
    }

    fn fill(rect: SlotRect, color: Color) -> Self {
        Mark::Panel {
            rect,
            fill: Some(color),
            stroke: None,
        }
    }

    /// Render item with the mark shifted down by `top` millimetres
    pub(crate) fn to_item(&self, top: f32) -> RenderItem {
        match self {
            Mark::Text {
                x,
                baseline,
                text,
                style,
                color,
            } => RenderItem::GlyphRun(GlyphRun {
                text: text.clone(),
                font_family: match style.family {
                    FontFamily::Sans => SANS_FAMILY,
                    FontFamily::Mono => MONO_FAMILY,
                }
                .to_string(),
                font_size: f64::from(style.font_size),
                bold: style.bold,
                italic: style.italic,
                underline: style.underline,
                color: *color,
                x: pt(*x),
                y: pt(top + baseline),
            }),
            Mark::Panel { rect, fill, stroke } => RenderItem::Rectangle {
                bounds: to_rect(rect, top),
                fill: *fill,
                stroke: *stroke,
                stroke_width: if stroke.is_some() { 0.5 } else { 0.0 },
            },
            Mark::Rule {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => RenderItem::Line {
                x1: pt(*x1),
                y1: pt(top + y1),
                x2: pt(*x2),
                y2: pt(top + y2),
                color: *color,
                width: f64::from(*width),
            },
            Mark::Picture {
                resource_id,
                rect,
                alt_text,
            } => RenderItem::Image(ImageRenderInfo {
                resource_id: resource_id.clone(),
                bounds: to_rect(rect, top),
                alt_text: alt_text.clone(),
            }),
        }
    }
}

fn to_rect(rect: &SlotRect, top: f32) -> Rect {
    Rect::new(pt(rect.x), pt(top + rect.y), pt(rect.width), pt(rect.height))
}

/// Largest rectangle with the given aspect ratio centred inside `slot`
pub(crate) fn fit_in(slot: SlotRect, aspect: f32) -> SlotRect {
    if slot.height / slot.width > aspect {
        let height = slot.width * aspect;
        SlotRect::new(slot.x, slot.y + (slot.height - height) / 2.0, slot.width, height)
    } else {
        let width = slot.height / aspect;
        SlotRect::new(slot.x + (slot.width - width) / 2.0, slot.y, width, slot.height)
    }
}

/// Emphasis kept only when every run carries it
fn paragraph_style(runs: &[Run], font_size: f32) -> TextStyle {
    let mut style = TextStyle::sans(font_size);
    if !runs.is_empty() && runs.iter().all(|r| r.style.bold) {
        style = style.bold();
    }
    if !runs.is_empty() && runs.iter().all(|r| r.style.italic) {
        style = style.italic();
    }
    if !runs.is_empty() && runs.iter().all(|r| r.style.underline) {
        style = style.underline();
    }
    style
}

/// Lays out Blocks as flow units for one page geometry
pub(crate) struct BlockFlow<'a> {
    geometry: &'a PageGeometry,
    assets: &'a AssetCatalog,
}

impl<'a> BlockFlow<'a> {
    pub(crate) fn new(geometry: &'a PageGeometry, assets: &'a AssetCatalog) -> Self {
        Self { geometry, assets }
    }

    /// Flow units for one block, in drawing order
    pub(crate) fn units(&self, block: &Block) -> Vec<Unit> {
        let g = self.geometry;
        let gap = g.block_spacing;
        match block {
            Block::Heading { level, runs } => {
                let style = TextStyle::sans(g.heading_font_size(*level)).bold();
                vec![self.text_unit(&runs_text(runs), style, g.margin, g.content_width(), gap)]
            }
            Block::Paragraph { runs } => {
                let style = paragraph_style(runs, g.body_font_size);
                vec![self.text_unit(&runs_text(runs), style, g.margin, g.content_width(), gap)]
            }
            Block::List { items, .. } => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.list_item(&item_text(item), if i == 0 { gap } else { 0.0 }))
                .collect(),
            Block::Table { rows } => self.table(rows),
            Block::Image { source, alt_text } => vec![self.image(source, alt_text)],
            Block::Blockquote { runs } => {
                let style = paragraph_style(runs, g.body_font_size).italic();
                vec![self.panel_unit(&runs_text(runs), style, Color::QUOTE_FILL, true)]
            }
            Block::CodeBlock { text } => {
                vec![self.panel_unit(text, TextStyle::mono(CODE_FONT_SIZE), Color::CODE_FILL, false)]
            }
        }
    }

    fn text_unit(&self, text: &str, style: TextStyle, x: f32, width: f32, gap: f32) -> Unit {
        self.colored_text_unit(text, style, Color::BLACK, x, width, gap)
    }

    fn colored_text_unit(
        &self,
        text: &str,
        style: TextStyle,
        color: Color,
        x: f32,
        width: f32,
        gap: f32,
    ) -> Unit {
        let advance = self.geometry.line_advance(style.font_size);
        let mut unit = FlowUnit::new(gap);
        for line in LineBreaker::new(style, width).break_text(text) {
            let mut slice = Vec::new();
            if !line.is_empty() {
                slice.push(Mark::Text {
                    x,
                    baseline: advance * BASELINE_RATIO,
                    text: line,
                    style,
                    color,
                });
            }
            unit.push(advance, slice);
        }
        unit
    }

    /// One item with a hanging indent after the bullet
    fn list_item(&self, text: &str, gap: f32) -> Unit {
        let g = self.geometry;
        let style = TextStyle::sans(g.body_font_size);
        let indent = text_width(BULLET, &style);
        let advance = g.line_advance(style.font_size);
        let baseline = advance * BASELINE_RATIO;

        let mut unit = FlowUnit::new(gap);
        let lines = LineBreaker::new(style, g.content_width() - indent).break_text(text);
        for (i, line) in lines.into_iter().enumerate() {
            let mut slice = Vec::new();
            if i == 0 {
                slice.push(Mark::text(g.margin, baseline, BULLET.trim_end(), style));
            }
            if !line.is_empty() {
                slice.push(Mark::text(g.margin + indent, baseline, line, style));
            }
            unit.push(advance, slice);
        }
        unit
    }

    /// Shaded panel with inset text; split pieces each keep their own strip
    fn panel_unit(&self, text: &str, style: TextStyle, fill: Color, accent: bool) -> Unit {
        let g = self.geometry;
        let advance = g.line_advance(style.font_size);
        let strip = |height: f32| {
            let mut marks = vec![Mark::fill(SlotRect::new(g.margin, 0.0, g.content_width(), height), fill)];
            if accent {
                marks.push(Mark::fill(SlotRect::new(g.margin, 0.0, ACCENT_WIDTH, height), Color::ACCENT));
            }
            marks
        };

        let mut unit = FlowUnit::new(g.block_spacing);
        unit.push(PANEL_PAD, strip(PANEL_PAD));
        let width = g.content_width() - 2.0 * PANEL_INSET;
        for line in LineBreaker::new(style, width).break_text(text) {
            let mut slice = strip(advance);
            if !line.is_empty() {
                slice.push(Mark::text(g.margin + PANEL_INSET, advance * BASELINE_RATIO, line, style));
            }
            unit.push(advance, slice);
        }
        unit.push(PANEL_PAD, strip(PANEL_PAD));
        unit
    }

    /// One atomic unit per row, cells drawn as bordered boxes
    fn table(&self, rows: &[Vec<Cell>]) -> Vec<Unit> {
        let g = self.geometry;
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return Vec::new();
        }
        let column_width = g.content_width() / columns as f32;
        let advance = g.line_advance(g.body_font_size);

        rows.iter()
            .enumerate()
            .map(|(r, row)| {
                let cells: Vec<(bool, Vec<String>)> = (0..columns)
                    .map(|c| match row.get(c) {
                        Some(cell) => {
                            let style = cell_style(cell, g.body_font_size);
                            let breaker = LineBreaker::new(style, column_width - 2.0 * CELL_PAD);
                            (cell.is_header, breaker.break_text(&cell.plain_text()))
                        }
                        None => (false, Vec::new()),
                    })
                    .collect();
                let line_count = cells.iter().map(|(_, lines)| lines.len()).max().unwrap_or(1).max(1);
                let height = line_count as f32 * advance + 2.0 * CELL_PAD;

                let mut marks = Vec::new();
                for (c, (is_header, lines)) in cells.into_iter().enumerate() {
                    let x = g.margin + c as f32 * column_width;
                    marks.push(Mark::Panel {
                        rect: SlotRect::new(x, 0.0, column_width, height),
                        fill: is_header.then_some(Color::HEADER_FILL),
                        stroke: Some(Color::RULE),
                    });
                    let mut style = TextStyle::sans(g.body_font_size);
                    if is_header {
                        style = style.bold();
                    }
                    for (i, line) in lines.into_iter().enumerate().filter(|(_, l)| !l.is_empty()) {
                        let baseline = CELL_PAD + i as f32 * advance + advance * BASELINE_RATIO;
                        marks.push(Mark::text(x + CELL_PAD, baseline, line, style));
                    }
                }
                let gap = if r == 0 { g.block_spacing } else { 0.0 };
                FlowUnit::single(height, marks, gap)
            })
            .collect()
    }

    /// Scaled raster, or an italic placeholder line when the asset is missing
    fn image(&self, source: &str, alt_text: &str) -> Unit {
        let g = self.geometry;
        let alt = (!alt_text.trim().is_empty()).then(|| alt_text.to_string());

        let Some((info, aspect)) = self
            .assets
            .get(source)
            .and_then(|info| info.aspect_ratio().map(|a| (info, a)))
        else {
            tracing::debug!("no drawable asset for image {source}, drawing placeholder");
            let label = match &alt {
                Some(alt) => format!("[Image: {alt}]"),
                None => "[Image]".to_string(),
            };
            let style = TextStyle::sans(g.body_font_size).italic();
            return self.colored_text_unit(
                &label,
                style,
                Color::MUTED,
                g.margin,
                g.content_width(),
                g.block_spacing,
            );
        };

        let max_height = g.max_image_height.min(g.usable_height());
        let mut width = g.content_width();
        let mut height = width * aspect;
        if height > max_height {
            height = max_height;
            width = height / aspect;
        }
        let mark = Mark::Picture {
            resource_id: info.resource_id.clone(),
            rect: SlotRect::new(g.margin, 0.0, width, height),
            alt_text: alt,
        };
        FlowUnit::single(height, vec![mark], g.block_spacing)
    }
}

fn cell_style(cell: &Cell, font_size: f32) -> TextStyle {
    let style = TextStyle::sans(font_size);
    if cell.is_header {
        style.bold()
    } else {
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssetInfo;
    use doc_model::RunStyle;

    fn slices(unit: Unit) -> Vec<Slice> {
        let mut paginator = layout_engine::FlowPaginator::new(0.0, 10_000.0);
        paginator.place(unit).into_iter().map(|p| p.payload).collect()
    }

    fn texts(marks: &[Mark]) -> Vec<(String, TextStyle)> {
        marks
            .iter()
            .filter_map(|m| match m {
                Mark::Text { text, style, .. } => Some((text.clone(), *style)),
                _ => None,
            })
            .collect()
    }

    fn flow_units(block: &Block, assets: &AssetCatalog) -> Vec<Unit> {
        let geometry = PageGeometry::a4();
        BlockFlow::new(&geometry, assets).units(block)
    }

    #[test]
    fn test_heading_is_bold_at_level_size() {
        let block = Block::heading(2, vec![Run::plain("Scope")]).unwrap();
        let units = flow_units(&block, &AssetCatalog::new());
        assert_eq!(units.len(), 1);
        let marks = slices(units.into_iter().next().unwrap()).concat();
        let (text, style) = &texts(&marks)[0];
        assert_eq!(text, "Scope");
        assert!(style.bold);
        assert_eq!(style.font_size, 14.0);
    }

    #[test]
    fn test_paragraph_emphasis_only_when_uniform() {
        let mixed = Block::paragraph(vec![
            Run::styled("Hello ", RunStyle::bold()),
            Run::plain("world."),
        ]);
        let marks = slices(flow_units(&mixed, &AssetCatalog::new()).remove(0)).concat();
        assert!(!texts(&marks)[0].1.bold);

        let bold = Block::paragraph(vec![Run::styled("All bold", RunStyle::bold())]);
        let marks = slices(flow_units(&bold, &AssetCatalog::new()).remove(0)).concat();
        assert!(texts(&marks)[0].1.bold);
    }

    #[test]
    fn test_underlined_paragraph_reaches_glyph_runs() {
        let underlined = RunStyle {
            underline: true,
            ..RunStyle::default()
        };
        let block = Block::paragraph(vec![Run::styled("Signed", underlined)]);
        let marks = slices(flow_units(&block, &AssetCatalog::new()).remove(0)).concat();
        assert!(texts(&marks)[0].1.underline);
        match marks[0].to_item(0.0) {
            RenderItem::GlyphRun(run) => assert!(run.underline),
            other => panic!("expected glyph run, got {other:?}"),
        }

        let mixed = Block::paragraph(vec![
            Run::styled("Signed", underlined),
            Run::plain(" by the lab"),
        ]);
        let marks = slices(flow_units(&mixed, &AssetCatalog::new()).remove(0)).concat();
        assert!(!texts(&marks)[0].1.underline);
    }

    #[test]
    fn test_list_item_per_unit_with_bullet() {
        let block = Block::list(true, ["A", "B"]);
        let units = flow_units(&block, &AssetCatalog::new());
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].gap_before(), 2.0);
        assert_eq!(units[1].gap_before(), 0.0);
        let marks = slices(units.into_iter().next().unwrap()).concat();
        let words: Vec<String> = texts(&marks).into_iter().map(|(t, _)| t).collect();
        assert_eq!(words, vec!["\u{2022}", "A"]);
    }

    #[test]
    fn test_wrapped_list_item_bullet_on_first_line_only() {
        let long = "word ".repeat(80);
        let units = flow_units(&Block::list(false, [long]), &AssetCatalog::new());
        let lines = slices(units.into_iter().next().unwrap());
        assert!(lines.len() > 1);
        let bullets = lines
            .iter()
            .flat_map(|marks| texts(marks))
            .filter(|(t, _)| t == "\u{2022}")
            .count();
        assert_eq!(bullets, 1);
    }

    #[test]
    fn test_blockquote_panel_with_accent() {
        let block = Block::blockquote(vec![Run::plain("Quoted")]);
        let marks = slices(flow_units(&block, &AssetCatalog::new()).remove(0)).concat();
        let fills: Vec<Color> = marks
            .iter()
            .filter_map(|m| match m {
                Mark::Panel { fill, .. } => *fill,
                _ => None,
            })
            .collect();
        assert!(fills.contains(&Color::QUOTE_FILL));
        assert!(fills.contains(&Color::ACCENT));
        assert!(texts(&marks)[0].1.italic);
    }

    #[test]
    fn test_code_block_keeps_lines_in_mono() {
        let block = Block::CodeBlock {
            text: "let a = 1;\nlet b = 2;".into(),
        };
        let marks = slices(flow_units(&block, &AssetCatalog::new()).remove(0)).concat();
        let lines = texts(&marks);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|(_, s)| s.family == FontFamily::Mono));
        let item = marks.iter().find(|m| matches!(m, Mark::Text { .. })).unwrap().to_item(0.0);
        match item {
            RenderItem::GlyphRun(run) => assert_eq!(run.font_family, MONO_FAMILY),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_table_rows_are_atomic_units() {
        let block = Block::Table {
            rows: vec![
                vec![Cell::header("Item"), Cell::header("Cost")],
                vec![Cell::text("Reactor"), Cell::text("40")],
                vec![Cell::text("Ragged")],
            ],
        };
        let units = flow_units(&block, &AssetCatalog::new());
        assert_eq!(units.len(), 3);
        let header = slices(units.into_iter().next().unwrap());
        assert_eq!(header.len(), 1);
        let shaded = header[0]
            .iter()
            .filter(|m| matches!(m, Mark::Panel { fill: Some(c), .. } if *c == Color::HEADER_FILL))
            .count();
        assert_eq!(shaded, 2);
        assert!(texts(&header[0]).iter().all(|(_, s)| s.bold));
    }

    #[test]
    fn test_empty_table_has_no_units() {
        assert!(flow_units(&Block::Table { rows: vec![] }, &AssetCatalog::new()).is_empty());
    }

    #[test]
    fn test_missing_image_draws_placeholder() {
        let block = Block::Image {
            source: "missing.png".into(),
            alt_text: "Site map".into(),
        };
        let marks = slices(flow_units(&block, &AssetCatalog::new()).remove(0)).concat();
        assert_eq!(texts(&marks)[0].0, "[Image: Site map]");
        assert!(marks
            .iter()
            .all(|m| matches!(m, Mark::Text { color, .. } if *color == Color::MUTED)));
    }

    #[test]
    fn test_image_scaled_to_width_and_capped() {
        let mut assets = AssetCatalog::new();
        assets.insert("wide.png", AssetInfo::new("a0", 400, 100));
        assets.insert("tall.png", AssetInfo::new("a1", 100, 400));

        let wide = Block::Image {
            source: "wide.png".into(),
            alt_text: String::new(),
        };
        let unit = flow_units(&wide, &assets).remove(0);
        assert!((unit.height() - 42.5).abs() < 1e-3);

        let tall = Block::Image {
            source: "tall.png".into(),
            alt_text: String::new(),
        };
        let marks = slices(flow_units(&tall, &assets).remove(0)).concat();
        match &marks[0] {
            Mark::Picture { rect, .. } => {
                assert_eq!(rect.height, 80.0);
                assert_eq!(rect.width, 20.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_fit_in_keeps_aspect() {
        let slot = SlotRect::new(0.0, 0.0, 30.0, 12.0);
        let wide = fit_in(slot, 0.2);
        assert_eq!(wide.width, 30.0);
        assert!((wide.height - 6.0).abs() < 1e-4);
        assert!((wide.y - 3.0).abs() < 1e-4);
        let square = fit_in(slot, 1.0);
        assert_eq!(square.height, 12.0);
        assert_eq!(square.x, 9.0);
    }
}
