//! Document root and export metadata

use crate::Block;
use serde::{Deserialize, Serialize};

/// Title used when the host supplies none
pub const DEFAULT_TITLE: &str = "Research Proposal";

/// Export metadata supplied alongside the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMetadata {
    /// Proposal title; drawn as the document title and used for file names
    pub title: String,
    /// Optional author, written into document properties
    pub author: Option<String>,
    /// Optional proposal identifier, shown in the footer
    pub reference: Option<String>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: None,
            reference: None,
        }
    }
}

impl DocumentMetadata {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// An ordered sequence of blocks. Insertion order is document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Append a block at the end of the document
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self::from_blocks(blocks)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_preserves_insertion_order() {
        let mut doc = Document::new();
        doc.push(Block::text("first"));
        doc.push(Block::text("second"));
        let texts: Vec<_> = doc.iter().map(Block::plain_text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_default_metadata_title() {
        let meta = DocumentMetadata::default();
        assert_eq!(meta.title, DEFAULT_TITLE);
        assert!(meta.author.is_none());
    }

    #[test]
    fn test_metadata_deserializes_with_defaults() {
        let meta: DocumentMetadata = serde_json::from_str(r#"{"author":"R. Iyer"}"#).unwrap();
        assert_eq!(meta.title, DEFAULT_TITLE);
        assert_eq!(meta.author.as_deref(), Some("R. Iyer"));
    }
}
