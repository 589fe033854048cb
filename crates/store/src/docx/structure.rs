//! Structural export
//!
//! Maps blocks onto the flat paragraph sequence a word processor expects:
//! a bold title, one blank separator, then headings, body paragraphs and
//! bullet-prefixed list items. Block kinds without a natural paragraph
//! form are flattened to their visible text; nothing here can fail.

use doc_model::{item_text, runs_text, Block, Cell, Run};

/// Deepest heading style the exported document defines
pub const MAX_DOCX_HEADING_LEVEL: u8 = 4;

/// Prefix written before every list item
pub const LIST_PREFIX: &str = "\u{2022} ";

/// Heading style for a block heading level
pub fn clamp_heading_level(level: u8) -> u8 {
    level.clamp(1, MAX_DOCX_HEADING_LEVEL)
}

/// Paragraph role, which selects the paragraph style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    Title,
    Blank,
    Heading(u8),
    Body,
}

impl ParagraphKind {
    /// Style id in styles.xml, `None` for the default paragraph style
    pub fn style_id(&self) -> Option<String> {
        match self {
            ParagraphKind::Title => Some("Title".to_string()),
            ParagraphKind::Heading(level) => Some(format!("Heading{level}")),
            ParagraphKind::Blank | ParagraphKind::Body => None,
        }
    }
}

/// One exported paragraph. `\n` in the text is a line break, `\t` a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredParagraph {
    pub kind: ParagraphKind,
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl StructuredParagraph {
    pub fn new(kind: ParagraphKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::new(ParagraphKind::Title, text)
        }
    }

    pub fn blank() -> Self {
        Self::new(ParagraphKind::Blank, "")
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(ParagraphKind::Heading(clamp_heading_level(level)), text)
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self::new(ParagraphKind::Body, text)
    }

    /// Body paragraph from runs, keeping emphasis only when every run has it
    pub fn from_runs(runs: &[Run]) -> Self {
        let visible: Vec<&Run> = runs.iter().filter(|r| !r.text.is_empty()).collect();
        let all = |f: fn(&Run) -> bool| !visible.is_empty() && visible.iter().all(|r| f(r));
        Self {
            bold: all(|r| r.style.bold),
            italic: all(|r| r.style.italic),
            ..Self::body(runs_text(runs))
        }
    }
}

/// Produces the paragraph sequence of an exported document
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralExporter;

impl StructuralExporter {
    pub fn new() -> Self {
        Self
    }

    /// Title paragraph, blank separator, then every block in order
    pub fn export(&self, title: &str, blocks: &[Block]) -> Vec<StructuredParagraph> {
        let mut paragraphs = vec![StructuredParagraph::title(title), StructuredParagraph::blank()];
        for block in blocks {
            self.push_block(block, &mut paragraphs);
        }
        paragraphs
    }

    fn push_block(&self, block: &Block, out: &mut Vec<StructuredParagraph>) {
        match block {
            Block::Heading { level, runs } => {
                out.push(StructuredParagraph::heading(*level, runs_text(runs)));
            }
            Block::Paragraph { runs } | Block::Blockquote { runs } => {
                out.push(StructuredParagraph::from_runs(runs));
            }
            Block::List { items, .. } => {
                out.extend(
                    items
                        .iter()
                        .map(|item| StructuredParagraph::body(format!("{LIST_PREFIX}{}", item_text(item)))),
                );
            }
            Block::Table { rows } => {
                for row in rows {
                    let text = row.iter().map(Cell::plain_text).collect::<Vec<_>>().join("\t");
                    let header = !row.is_empty() && row.iter().all(|c| c.is_header);
                    out.push(StructuredParagraph {
                        bold: header,
                        ..StructuredParagraph::body(text)
                    });
                }
            }
            Block::Image { alt_text, .. } => {
                if !alt_text.trim().is_empty() {
                    out.push(StructuredParagraph {
                        italic: true,
                        ..StructuredParagraph::body(alt_text.clone())
                    });
                }
            }
            Block::CodeBlock { text } => {
                out.push(StructuredParagraph::body(text.trim_end_matches('\n')));
            }
        }
    }
}
