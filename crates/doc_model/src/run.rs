//! Text run - a contiguous span of text with consistent inline formatting

use serde::{Deserialize, Serialize};

/// Inline formatting flags carried by a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub subscript: bool,
    pub superscript: bool,
}

impl RunStyle {
    /// Style with only the bold flag set
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    /// Style with only the italic flag set
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Default::default()
        }
    }

    /// True when no flag is set
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A text run. Runs are plain values: a block owns its runs outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    /// The text content of this run
    pub text: String,
    /// Inline formatting
    #[serde(flatten)]
    pub style: RunStyle,
    /// Hyperlink target, when the run sits inside a link
    #[serde(default)]
    pub link_href: Option<String>,
}

impl Run {
    /// Create an unformatted run
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
            link_href: None,
        }
    }

    /// Create a run with the given formatting
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
            link_href: None,
        }
    }

    /// Attach a hyperlink target
    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.link_href = Some(href.into());
        self
    }

    /// Whether this run can absorb `other` without losing formatting
    pub fn same_format(&self, other: &Run) -> bool {
        self.style == other.style && self.link_href == other.link_href
    }

    /// Length of the text in code points
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Concatenate the text of a run slice
pub fn runs_text(runs: &[Run]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_run() {
        let run = Run::plain("Hello");
        assert_eq!(run.text, "Hello");
        assert!(run.style.is_plain());
        assert!(run.link_href.is_none());
    }

    #[test]
    fn test_same_format() {
        let a = Run::styled("a", RunStyle::bold());
        let b = Run::styled("b", RunStyle::bold());
        let c = Run::styled("c", RunStyle::bold()).with_link("https://example.com");
        assert!(a.same_format(&b));
        assert!(!a.same_format(&c));
    }

    #[test]
    fn test_char_len_counts_code_points() {
        assert_eq!(Run::plain("CO₂").char_len(), 3);
        assert_eq!(Run::plain("CO₂").text.len(), 5);
    }

    #[test]
    fn test_serde_shape_is_flat() {
        let run = Run::styled("x", RunStyle::italic());
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["italic"], true);
        assert_eq!(json["bold"], false);
        assert!(json.get("style").is_none());
    }

    #[test]
    fn test_runs_text() {
        let runs = vec![Run::plain("Hel"), Run::styled("lo", RunStyle::bold())];
        assert_eq!(runs_text(&runs), "Hello");
    }
}
