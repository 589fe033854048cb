//! Line breaking
//!
//! Greedy line filling over UAX #14 break opportunities. Newlines are
//! mandatory breaks. A word wider than the line is split between grapheme
//! clusters so that no line exceeds the available width unless a single
//! grapheme does.

use crate::{text_width, TextStyle};
use unicode_linebreak::linebreaks;
use unicode_segmentation::UnicodeSegmentation;

/// Wraps text to a fixed width for one text style
#[derive(Debug, Clone, Copy)]
pub struct LineBreaker {
    style: TextStyle,
    max_width: f32,
}

impl LineBreaker {
    pub fn new(style: TextStyle, max_width: f32) -> Self {
        Self { style, max_width }
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Break `text` into lines. Empty input yields one empty line.
    pub fn break_text(&self, text: &str) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            self.break_paragraph(paragraph, &mut lines);
        }
        lines
    }

    fn fits(&self, text: &str) -> bool {
        text_width(text.trim_end(), &self.style) <= self.max_width
    }

    fn break_paragraph(&self, text: &str, lines: &mut Vec<String>) {
        let text = text.trim_end_matches('\r');
        if text.trim().is_empty() {
            lines.push(String::new());
            return;
        }

        let mut line = String::new();
        let mut start = 0;
        for (offset, _) in linebreaks(text) {
            let segment = &text[start..offset];
            start = offset;
            self.push_segment(segment, &mut line, lines);
        }
        if start < text.len() {
            self.push_segment(&text[start..], &mut line, lines);
        }
        if !line.trim().is_empty() {
            lines.push(line.trim_end().to_string());
        }
    }

    fn push_segment(&self, segment: &str, line: &mut String, lines: &mut Vec<String>) {
        let candidate = format!("{line}{segment}");
        if self.fits(&candidate) {
            *line = candidate;
            return;
        }

        if !line.trim().is_empty() {
            lines.push(line.trim_end().to_string());
        }
        line.clear();

        if self.fits(segment) {
            line.push_str(segment);
            return;
        }

        for grapheme in segment.graphemes(true) {
            let candidate = format!("{line}{grapheme}");
            if !self.fits(&candidate) && !line.trim().is_empty() {
                lines.push(line.trim_end().to_string());
                line.clear();
            }
            line.push_str(grapheme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn breaker(width: f32) -> LineBreaker {
        LineBreaker::new(TextStyle::sans(11.0), width)
    }

    #[test]
    fn test_empty_text_is_one_blank_line() {
        assert_eq!(breaker(100.0).break_text(""), vec![String::new()]);
    }

    #[test]
    fn test_single_word() {
        assert_eq!(breaker(100.0).break_text("Hello"), vec!["Hello"]);
    }

    #[test]
    fn test_short_sentence_one_line() {
        assert_eq!(
            breaker(170.0).break_text("Hello world."),
            vec!["Hello world."]
        );
    }

    #[test]
    fn test_mandatory_break() {
        assert_eq!(breaker(500.0).break_text("Hello\nworld"), vec!["Hello", "world"]);
    }

    #[test]
    fn test_blank_lines_kept() {
        assert_eq!(breaker(500.0).break_text("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrapping_respects_width() {
        let b = breaker(40.0);
        let text = "Coal remains a critical energy source contributing a large share of the energy mix";
        let lines = b.break_text(text);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, b.style()) <= 40.0, "line too wide: {line}");
            assert_eq!(line.trim_end(), line);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_long_word_split_at_graphemes() {
        let b = breaker(10.0);
        let lines = b.break_text("Pneumonoultramicroscopicsilicovolcanoconiosis");
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "Pneumonoultramicroscopicsilicovolcanoconiosis");
    }

    proptest! {
        #[test]
        fn prop_words_preserved(words in prop::collection::vec("[a-z]{1,10}", 1..40), width in 40.0f32..200.0) {
            let text = words.join(" ");
            let lines = breaker(width).break_text(&text);
            let rejoined: Vec<String> = lines
                .iter()
                .flat_map(|l| l.split_whitespace().map(str::to_string))
                .collect();
            prop_assert_eq!(rejoined, words);
        }
    }
}
