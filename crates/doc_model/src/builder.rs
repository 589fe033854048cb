//! Document tree builder
//!
//! Normalizes a rendered content tree into an ordered list of [`Block`]s.
//! Each top-level node is classified exactly once by its element role.
//! Nodes without a recognized role are skipped, so building never fails
//! on unexpected markup.

use crate::html::parse_html;
use crate::{runs_text, Block, Cell, ContentNode, Document, ListItem, Result, Run, RunStyle};

/// Block role of a top-level element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    Heading(u8),
    Paragraph,
    List { ordered: bool },
    Table,
    Image,
    Blockquote,
    Code,
}

impl ElementRole {
    /// Classify a lowercase tag name
    pub fn classify(tag: &str) -> Option<Self> {
        let role = match tag {
            "h1" => ElementRole::Heading(1),
            "h2" => ElementRole::Heading(2),
            "h3" => ElementRole::Heading(3),
            "h4" => ElementRole::Heading(4),
            "h5" => ElementRole::Heading(5),
            "h6" => ElementRole::Heading(6),
            "p" | "div" => ElementRole::Paragraph,
            "ul" => ElementRole::List { ordered: false },
            "ol" => ElementRole::List { ordered: true },
            "table" => ElementRole::Table,
            "img" | "figure" => ElementRole::Image,
            "blockquote" => ElementRole::Blockquote,
            "pre" => ElementRole::Code,
            _ => return None,
        };
        Some(role)
    }
}

/// Builds a [`Document`] from a content tree
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTreeBuilder;

impl DocumentTreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build blocks from the children of `root`
    pub fn build(&self, root: &ContentNode) -> Document {
        let mut doc = Document::new();
        for child in root.children() {
            if let Some(block) = self.build_block(child) {
                doc.push(block);
            }
        }
        tracing::debug!(blocks = doc.len(), "Built document tree");
        doc
    }

    /// Build blocks from an HTML fragment
    pub fn build_html(&self, html: &str) -> Document {
        self.build(&parse_html(html))
    }

    /// Build blocks from a JSON content tree
    pub fn build_json(&self, json: &str) -> Result<Document> {
        Ok(self.build(&ContentNode::from_json(json)?))
    }

    fn build_block(&self, node: &ContentNode) -> Option<Block> {
        let tag = match node {
            ContentNode::Text { text } => {
                let text = collapse_whitespace(text);
                let text = text.trim();
                return (!text.is_empty()).then(|| Block::text(text));
            }
            ContentNode::Element { tag, .. } => tag,
        };

        let Some(role) = ElementRole::classify(tag) else {
            tracing::debug!(tag = %tag, "Skipping element with no block role");
            return None;
        };

        match role {
            ElementRole::Heading(level) => Some(Block::Heading {
                level,
                runs: non_empty(flatten_runs(node)),
            }),
            ElementRole::Paragraph => match sole_image(node) {
                Some(img) => image_block(img),
                None => Some(Block::paragraph(flatten_runs(node))),
            },
            ElementRole::List { ordered } => Some(Block::List {
                ordered,
                items: list_items(node),
            }),
            ElementRole::Table => Some(Block::Table {
                rows: table_rows(node),
            }),
            ElementRole::Image => {
                let img = if node.is_tag("img") {
                    Some(node)
                } else {
                    find_descendant(node, "img")
                };
                img.and_then(image_block)
            }
            ElementRole::Blockquote => Some(Block::blockquote(flatten_runs(node))),
            ElementRole::Code => Some(Block::CodeBlock {
                text: node.text_content().trim_end_matches('\n').to_string(),
            }),
        }
    }
}

fn non_empty(mut runs: Vec<Run>) -> Vec<Run> {
    if runs.is_empty() {
        runs.push(Run::plain(""));
    }
    runs
}

fn list_items(list: &ContentNode) -> Vec<ListItem> {
    list.children()
        .iter()
        .filter(|child| child.is_tag("li"))
        .map(|li| vec![Block::text(runs_text(&flatten_runs(li)))])
        .collect()
}

fn table_rows(table: &ContentNode) -> Vec<Vec<Cell>> {
    let mut rows = Vec::new();
    for child in table.children() {
        match child.tag() {
            Some("tr") => rows.push(table_row(child)),
            Some("thead") | Some("tbody") | Some("tfoot") => rows.extend(
                child
                    .children()
                    .iter()
                    .filter(|n| n.is_tag("tr"))
                    .map(table_row),
            ),
            _ => {}
        }
    }
    rows
}

fn table_row(tr: &ContentNode) -> Vec<Cell> {
    tr.children()
        .iter()
        .filter_map(|cell| match cell.tag() {
            Some("td") => Some(Cell::new(flatten_runs(cell), false)),
            Some("th") => Some(Cell::new(flatten_runs(cell), true)),
            _ => None,
        })
        .collect()
}

fn image_block(img: &ContentNode) -> Option<Block> {
    let source = img.attr("src").map(str::trim).unwrap_or_default();
    if source.is_empty() {
        tracing::debug!("Skipping image without a source");
        return None;
    }
    Some(Block::Image {
        source: source.to_string(),
        alt_text: img.attr("alt").unwrap_or_default().to_string(),
    })
}

/// The only meaningful child of `node`, when that child is an image
fn sole_image(node: &ContentNode) -> Option<&ContentNode> {
    let mut meaningful = node.children().iter().filter(|c| !c.is_blank_text());
    match (meaningful.next(), meaningful.next()) {
        (Some(only), None) if only.is_tag("img") => Some(only),
        _ => None,
    }
}

fn find_descendant<'a>(node: &'a ContentNode, tag: &str) -> Option<&'a ContentNode> {
    node.children().iter().find_map(|child| {
        if child.is_tag(tag) {
            Some(child)
        } else {
            find_descendant(child, tag)
        }
    })
}

fn is_block_level(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "li"
            | "ul"
            | "ol"
            | "blockquote"
            | "pre"
            | "tr"
            | "table"
    )
}

/// Collapse each whitespace sequence to one space. No-break spaces are kept.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() && c != '\u{a0}' {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Flatten inline content into formatted runs.
///
/// Adjacent text with the same formatting merges into one run. Nested
/// block elements and `br` become newlines.
pub fn flatten_runs(node: &ContentNode) -> Vec<Run> {
    let mut collector = RunCollector::default();
    for child in node.children() {
        collector.walk(child, RunStyle::default(), None);
    }
    collector.finish()
}

#[derive(Default)]
struct RunCollector {
    runs: Vec<Run>,
}

impl RunCollector {
    fn walk<'a>(&mut self, node: &'a ContentNode, mut style: RunStyle, mut href: Option<&'a str>) {
        let (tag, children) = match node {
            ContentNode::Text { text } => {
                self.push_text(&collapse_whitespace(text), style, href);
                return;
            }
            ContentNode::Element { tag, children, .. } => (tag.as_str(), children),
        };

        match tag {
            "br" => {
                self.push_raw("\n", style, href);
                return;
            }
            "strong" | "b" => style.bold = true,
            "em" | "i" => style.italic = true,
            "u" => style.underline = true,
            "s" | "strike" | "del" => style.strike = true,
            "sub" => style.subscript = true,
            "sup" => style.superscript = true,
            "a" => href = node.attr("href").or(href),
            _ => {}
        }

        let block = is_block_level(tag);
        if block {
            self.break_line();
        }
        for child in children {
            self.walk(child, style, href);
        }
        if block {
            self.break_line();
        }
    }

    fn ends_with_space(&self) -> bool {
        match self.runs.last() {
            Some(run) => run.text.ends_with(' ') || run.text.ends_with('\n'),
            None => true,
        }
    }

    fn push_text(&mut self, text: &str, style: RunStyle, href: Option<&str>) {
        let text = if self.ends_with_space() {
            text.trim_start_matches(' ')
        } else {
            text
        };
        self.push_raw(text, style, href);
    }

    fn push_raw(&mut self, text: &str, style: RunStyle, href: Option<&str>) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.runs.last_mut() {
            if last.style == style && last.link_href.as_deref() == href {
                last.text.push_str(text);
                return;
            }
        }
        let mut run = Run::styled(text, style);
        run.link_href = href.map(str::to_string);
        self.runs.push(run);
    }

    fn break_line(&mut self) {
        if let Some(last) = self.runs.last_mut() {
            let trimmed = last.text.trim_end_matches(' ').len();
            last.text.truncate(trimmed);
            if !last.text.ends_with('\n') {
                last.text.push('\n');
            }
        }
    }

    fn finish(mut self) -> Vec<Run> {
        while let Some(last) = self.runs.last_mut() {
            let trimmed = last.text.trim_end().len();
            last.text.truncate(trimmed);
            if last.text.is_empty() {
                self.runs.pop();
            } else {
                break;
            }
        }
        self.runs.retain(|r| !r.text.is_empty());
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(html: &str) -> Vec<Block> {
        DocumentTreeBuilder::new().build_html(html).into_blocks()
    }

    #[test]
    fn test_classify_roles() {
        assert_eq!(ElementRole::classify("h3"), Some(ElementRole::Heading(3)));
        assert_eq!(ElementRole::classify("div"), Some(ElementRole::Paragraph));
        assert_eq!(
            ElementRole::classify("ol"),
            Some(ElementRole::List { ordered: true })
        );
        assert_eq!(ElementRole::classify("section"), None);
        assert_eq!(ElementRole::classify("h7"), None);
    }

    #[test]
    fn test_scenario_document() {
        let blocks = build("<h1>Intro</h1><p>Hello world.</p><ul><li>A</li><li>B</li></ul>");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    runs: vec![Run::plain("Intro")]
                },
                Block::text("Hello world."),
                Block::list(false, ["A", "B"]),
            ]
        );
    }

    #[test]
    fn test_unrecognized_elements_skipped() {
        let blocks = build("<section>x</section><hr><p>kept</p><custom-widget/>");
        assert_eq!(blocks, vec![Block::text("kept")]);
    }

    #[test]
    fn test_empty_heading_has_one_run() {
        let blocks = build("<h2></h2>");
        assert_eq!(blocks[0].runs(), &[Run::plain("")]);
    }

    #[test]
    fn test_inline_formatting() {
        let blocks = build(r#"<p>Plain <strong>bold <em>both</em></strong> <a href="https://x.org">link</a></p>"#);
        let runs = blocks[0].runs();
        assert_eq!(runs[0], Run::plain("Plain "));
        assert_eq!(runs[1], Run::styled("bold ", RunStyle::bold()));
        assert!(runs[2].style.bold && runs[2].style.italic);
        assert_eq!(runs[3], Run::plain(" "));
        assert_eq!(runs[4].link_href.as_deref(), Some("https://x.org"));
        assert_eq!(blocks[0].plain_text(), "Plain bold both link");
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        let blocks = build("<p>\n   Coal   remains\n a  source  </p>");
        assert_eq!(blocks[0].plain_text(), "Coal remains a source");
    }

    #[test]
    fn test_br_becomes_newline() {
        let blocks = build("<p>one<br>two</p>");
        assert_eq!(blocks[0].plain_text(), "one\ntwo");
    }

    #[test]
    fn test_list_item_keeps_formatting_text_only() {
        let blocks = build("<ol><li><strong>Coal Characterization:</strong> XRF and XRD</li></ol>");
        match &blocks[0] {
            Block::List { ordered, items } => {
                assert!(ordered);
                assert_eq!(items[0], vec![Block::text("Coal Characterization: XRF and XRD")]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_nested_list_text_included() {
        let blocks = build("<ul><li><p>Parent</p><ul><li>Child</li></ul></li></ul>");
        assert_eq!(blocks[0].plain_text(), "Parent\nChild");
    }

    #[test]
    fn test_table_rows_and_headers() {
        let blocks = build(
            "<table><thead><tr><th>Item</th><th>Cost</th></tr></thead>\
             <tbody><tr><td>Reactor</td><td>40</td></tr></tbody></table>",
        );
        match &blocks[0] {
            Block::Table { rows } => {
                assert_eq!(rows.len(), 2);
                assert!(rows[0][0].is_header);
                assert!(!rows[1][1].is_header);
                assert_eq!(rows[1][0].plain_text(), "Reactor");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_images() {
        let blocks = build(
            r#"<img src="a.png" alt="A"><p><img src="b.png"></p><figure><img src="c.png" alt="C"></figure><img alt="no source">"#,
        );
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[1],
            Block::Image {
                source: "b.png".into(),
                alt_text: String::new()
            }
        );
    }

    #[test]
    fn test_blockquote_paragraphs_joined_by_newline() {
        let blocks = build("<blockquote><p>first</p><p>second</p></blockquote>");
        assert_eq!(blocks[0].kind(), crate::BlockKind::Blockquote);
        assert_eq!(blocks[0].plain_text(), "first\nsecond");
    }

    #[test]
    fn test_code_block_preserves_whitespace() {
        let blocks = build("<pre><code>fn main() {\n    run();\n}\n</code></pre>");
        assert_eq!(
            blocks[0],
            Block::CodeBlock {
                text: "fn main() {\n    run();\n}".into()
            }
        );
    }

    #[test]
    fn test_bare_top_level_text_wrapped() {
        let blocks = build("  loose text  <p>p</p>");
        assert_eq!(blocks, vec![Block::text("loose text"), Block::text("p")]);
    }

    #[test]
    fn test_build_json() {
        let json = r#"{"kind":"element","tag":"body","children":[
            {"kind":"element","tag":"h5","children":[{"kind":"text","text":"Deep"}]},
            {"kind":"element","tag":"marquee","children":[]}
        ]}"#;
        let doc = DocumentTreeBuilder::new().build_json(json).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(matches!(doc.blocks()[0], Block::Heading { level: 5, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(build("").is_empty());
        assert!(build("   \n  ").is_empty());
    }
}
