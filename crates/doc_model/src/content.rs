//! Content tree - the raw, element-shaped input handed over by the editor
//!
//! This is the only place where element tags appear. The tree builder
//! classifies each node once and the rest of the pipeline works on blocks.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of the rendered content tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContentNode {
    Element {
        tag: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        #[serde(default)]
        children: Vec<ContentNode>,
    },
    Text {
        text: String,
    },
}

impl ContentNode {
    /// Create an element node. The tag is stored lowercase.
    pub fn element(tag: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::Element {
            tag: tag.into().to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text { text: text.into() }
    }

    /// Root container for a sequence of top-level nodes
    pub fn root(children: Vec<ContentNode>) -> Self {
        Self::element("body", children)
    }

    /// Builder-style attribute setter; a no-op on text nodes
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let ContentNode::Element { attrs, .. } = &mut self {
            attrs.insert(name.into().to_ascii_lowercase(), value.into());
        }
        self
    }

    /// Parse a JSON content tree
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Lowercase tag name, `None` for text nodes
    pub fn tag(&self) -> Option<&str> {
        match self {
            ContentNode::Element { tag, .. } => Some(tag.as_str()),
            ContentNode::Text { .. } => None,
        }
    }

    pub fn is_tag(&self, name: &str) -> bool {
        self.tag().is_some_and(|t| t.eq_ignore_ascii_case(name))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            ContentNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            ContentNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Element { children, .. } => children,
            ContentNode::Text { .. } => &[],
        }
    }

    /// Concatenated descendant text, with `br` read as a newline
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ContentNode::Text { text } => out.push_str(text),
            ContentNode::Element { tag, children, .. } => {
                if tag == "br" {
                    out.push('\n');
                }
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Whether the node is text made only of whitespace
    pub fn is_blank_text(&self) -> bool {
        matches!(self, ContentNode::Text { text } if text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_tag_lowercased() {
        let node = ContentNode::element("H1", vec![]);
        assert_eq!(node.tag(), Some("h1"));
        assert!(node.is_tag("h1"));
        assert!(node.is_tag("H1"));
    }

    #[test]
    fn test_text_content_reads_br_as_newline() {
        let node = ContentNode::element(
            "p",
            vec![
                ContentNode::text("line one"),
                ContentNode::element("br", vec![]),
                ContentNode::element("strong", vec![ContentNode::text("line two")]),
            ],
        );
        assert_eq!(node.text_content(), "line one\nline two");
    }

    #[test]
    fn test_attr_lookup() {
        let img = ContentNode::element("img", vec![]).with_attr("SRC", "logo.png");
        assert_eq!(img.attr("src"), Some("logo.png"));
        assert_eq!(img.attr("alt"), None);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "kind": "element",
            "tag": "body",
            "children": [
                {"kind": "element", "tag": "p", "children": [{"kind": "text", "text": "Hi"}]}
            ]
        }"#;
        let root = ContentNode::from_json(json).unwrap();
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.text_content(), "Hi");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ContentNode::from_json("{not json").is_err());
    }
}
