//! Block - one semantic unit of document content
//!
//! Blocks form a closed set of variants. Everything downstream of the
//! builder (metrics, pagination, structural export) pattern-matches on
//! this enum rather than inspecting element tags.

use crate::{runs_text, DocModelError, Result, Run};
use serde::{Deserialize, Serialize};

/// Deepest heading level the model accepts
pub const MAX_HEADING_LEVEL: u8 = 6;

/// One entry of a list. Usually a single synthetic paragraph.
pub type ListItem = Vec<Block>;

/// A table cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub runs: Vec<Run>,
    #[serde(default)]
    pub is_header: bool,
}

impl Cell {
    pub fn new(runs: Vec<Run>, is_header: bool) -> Self {
        Self { runs, is_header }
    }

    /// Plain-text cell
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Run::plain(text)], false)
    }

    /// Plain-text header cell
    pub fn header(text: impl Into<String>) -> Self {
        Self::new(vec![Run::plain(text)], true)
    }

    pub fn plain_text(&self) -> String {
        runs_text(&self.runs)
    }
}

/// A semantic document block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Block {
    Heading { level: u8, runs: Vec<Run> },
    Paragraph { runs: Vec<Run> },
    List { ordered: bool, items: Vec<ListItem> },
    Table { rows: Vec<Vec<Cell>> },
    Image { source: String, alt_text: String },
    Blockquote { runs: Vec<Run> },
    CodeBlock { text: String },
}

/// Variant tag of a [`Block`], used for logging and dispatch tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Paragraph,
    List,
    Table,
    Image,
    Blockquote,
    CodeBlock,
}

impl Block {
    /// Create a heading. Levels outside 1..=6 are rejected.
    pub fn heading(level: u8, runs: Vec<Run>) -> Result<Self> {
        if !(1..=MAX_HEADING_LEVEL).contains(&level) {
            return Err(DocModelError::InvalidHeadingLevel(level));
        }
        Ok(Block::Heading {
            level,
            runs: ensure_run(runs),
        })
    }

    /// Create a paragraph from runs. An empty run list becomes one empty run.
    pub fn paragraph(runs: Vec<Run>) -> Self {
        Block::Paragraph {
            runs: ensure_run(runs),
        }
    }

    /// Create a single-run unformatted paragraph
    pub fn text(text: impl Into<String>) -> Self {
        Block::Paragraph {
            runs: vec![Run::plain(text)],
        }
    }

    /// Create a list whose items are plain-text synthetic paragraphs
    pub fn list<I, S>(ordered: bool, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::List {
            ordered,
            items: items.into_iter().map(|s| vec![Block::text(s)]).collect(),
        }
    }

    pub fn blockquote(runs: Vec<Run>) -> Self {
        Block::Blockquote {
            runs: ensure_run(runs),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::List { .. } => BlockKind::List,
            Block::Table { .. } => BlockKind::Table,
            Block::Image { .. } => BlockKind::Image,
            Block::Blockquote { .. } => BlockKind::Blockquote,
            Block::CodeBlock { .. } => BlockKind::CodeBlock,
        }
    }

    /// Runs owned directly by this block (empty for container variants)
    pub fn runs(&self) -> &[Run] {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } | Block::Blockquote { runs } => {
                runs
            }
            _ => &[],
        }
    }

    /// Visible text of this block.
    ///
    /// List items and table rows are separated by newlines, table cells by tabs.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } | Block::Blockquote { runs } => {
                runs_text(runs)
            }
            Block::List { items, .. } => items
                .iter()
                .map(|item| item_text(item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Table { rows } => rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(Cell::plain_text)
                        .collect::<Vec<_>>()
                        .join("\t")
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Image { alt_text, .. } => alt_text.clone(),
            Block::CodeBlock { text } => text.clone(),
        }
    }

    /// Independent text segments of this block, in document order.
    ///
    /// Leaf blocks yield one segment. Each list item and each table cell is
    /// its own segment, so words never fuse across entries. Images carry no
    /// document text; their alt text is not a segment.
    pub fn text_segments(&self) -> Vec<String> {
        match self {
            Block::Image { .. } => Vec::new(),
            Block::List { items, .. } => items
                .iter()
                .flat_map(|item| item.iter().flat_map(Block::text_segments))
                .collect(),
            Block::Table { rows } => rows.iter().flatten().map(Cell::plain_text).collect(),
            other => vec![other.plain_text()],
        }
    }
}

/// Plain text of one list item
pub fn item_text(item: &[Block]) -> String {
    item.iter()
        .map(Block::plain_text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn ensure_run(mut runs: Vec<Run>) -> Vec<Run> {
    if runs.is_empty() {
        runs.push(Run::plain(""));
    }
    runs
}
