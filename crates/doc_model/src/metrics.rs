//! Word and character accounting
//!
//! Counts are derived from run text only. Each block, list item and table
//! cell is a separate segment of the text stream, so a word never spans
//! two segments. Runs inside one segment are joined directly, so a word
//! split across formatting boundaries still counts once.

use crate::Block;
use serde::{Deserialize, Serialize};

/// Word and character totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordCount {
    pub words: usize,
    pub characters: usize,
}

/// Stateless text statistics over a block list
pub struct TextMetrics;

impl TextMetrics {
    /// Count whitespace-delimited words and code points
    pub fn count(blocks: &[Block]) -> WordCount {
        blocks
            .iter()
            .flat_map(Block::text_segments)
            .fold(WordCount::default(), |acc, segment| WordCount {
                words: acc.words + segment.split_whitespace().count(),
                characters: acc.characters + segment.chars().count(),
            })
    }

    /// The document text stream, one segment per line
    pub fn plain_text(blocks: &[Block]) -> String {
        blocks
            .iter()
            .flat_map(Block::text_segments)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Receives live counter updates
pub trait CountObserver {
    fn on_word_count_change(&mut self, words: usize);
    fn on_character_count_change(&mut self, characters: usize);
}

/// Observer built from two callbacks, one per counter
pub struct CallbackObserver<W, C> {
    on_words: W,
    on_characters: C,
}

impl<W, C> CallbackObserver<W, C>
where
    W: FnMut(usize),
    C: FnMut(usize),
{
    pub fn new(on_words: W, on_characters: C) -> Self {
        Self {
            on_words,
            on_characters,
        }
    }
}

impl<W, C> CountObserver for CallbackObserver<W, C>
where
    W: FnMut(usize),
    C: FnMut(usize),
{
    fn on_word_count_change(&mut self, words: usize) {
        (self.on_words)(words)
    }

    fn on_character_count_change(&mut self, characters: usize) {
        (self.on_characters)(characters)
    }
}

/// Recomputes counts on every document change and pushes them to an observer
pub struct LiveCounter<O> {
    observer: O,
    current: WordCount,
}

impl<O: CountObserver> LiveCounter<O> {
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            current: WordCount::default(),
        }
    }

    /// Recount after a document change and notify the observer
    pub fn update(&mut self, blocks: &[Block]) -> WordCount {
        self.current = TextMetrics::count(blocks);
        self.observer.on_word_count_change(self.current.words);
        self.observer.on_character_count_change(self.current.characters);
        self.current
    }

    pub fn current(&self) -> WordCount {
        self.current
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Run, RunStyle};
    use proptest::prelude::*;

    fn scenario() -> Vec<Block> {
        vec![
            Block::heading(1, vec![Run::plain("Intro")]).unwrap(),
            Block::text("Hello world."),
            Block::list(false, ["A", "B"]),
        ]
    }

    #[test]
    fn test_count_scenario() {
        let count = TextMetrics::count(&scenario());
        assert_eq!(count.words, 5);
        assert_eq!(count.characters, 19);
    }

    #[test]
    fn test_heading_and_paragraph_only() {
        let blocks = &scenario()[..2];
        assert_eq!(
            TextMetrics::count(blocks),
            WordCount {
                words: 3,
                characters: 17
            }
        );
        assert_eq!(TextMetrics::plain_text(blocks), "Intro\nHello world.");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(TextMetrics::count(&[]), WordCount::default());
        assert_eq!(TextMetrics::plain_text(&[]), "");
    }

    #[test]
    fn test_word_split_across_runs_counts_once() {
        let block = Block::paragraph(vec![Run::plain("Hel"), Run::styled("lo", RunStyle::bold())]);
        assert_eq!(TextMetrics::count(&[block]).words, 1);
    }

    #[test]
    fn test_cells_are_separate_segments() {
        let table = Block::Table {
            rows: vec![vec![Cell::text("alpha"), Cell::text("beta")]],
        };
        let count = TextMetrics::count(&[table]);
        assert_eq!(count.words, 2);
        assert_eq!(count.characters, 9);
    }

    #[test]
    fn test_image_alt_text_not_counted() {
        let image = Block::Image {
            source: "chart.png".into(),
            alt_text: "Budget chart".into(),
        };
        assert_eq!(TextMetrics::count(&[image]), WordCount::default());
    }

    #[test]
    fn test_code_point_counting() {
        let count = TextMetrics::count(&[Block::text("CO₂ ↓40%")]);
        assert_eq!(count.characters, 8);
        assert_eq!(count.words, 2);
    }

    #[test]
    fn test_live_counter_notifies_every_update() {
        let mut words_seen = Vec::new();
        let mut chars_seen = Vec::new();
        {
            let observer = CallbackObserver::new(
                |w| words_seen.push(w),
                |c| chars_seen.push(c),
            );
            let mut counter = LiveCounter::new(observer);
            counter.update(&scenario());
            counter.update(&scenario());
            assert_eq!(counter.update(&[]), WordCount::default());
        }
        assert_eq!(words_seen, vec![5, 5, 0]);
        assert_eq!(chars_seen, vec![19, 19, 0]);
    }

    fn arb_text() -> impl Strategy<Value = String> {
        prop::collection::vec(prop_oneof!["[a-zA-Z.,]{1,8}", Just(" ".to_string()), Just("\t".to_string())], 0..12)
            .prop_map(|parts| parts.concat())
    }

    fn arb_block() -> impl Strategy<Value = Block> {
        prop_oneof![
            arb_text().prop_map(Block::text),
            (1u8..=6, arb_text()).prop_map(|(level, t)| Block::heading(level, vec![Run::plain(t)]).unwrap()),
            prop::collection::vec(arb_text(), 0..4).prop_map(|items| Block::list(false, items)),
        ]
    }

    proptest! {
        #[test]
        fn prop_count_is_idempotent(blocks in prop::collection::vec(arb_block(), 0..10)) {
            prop_assert_eq!(TextMetrics::count(&blocks), TextMetrics::count(&blocks));
        }

        #[test]
        fn prop_words_are_additive_over_blocks(blocks in prop::collection::vec(arb_block(), 0..10)) {
            let total = TextMetrics::count(&blocks);
            let summed: usize = blocks
                .iter()
                .map(|b| TextMetrics::count(std::slice::from_ref(b)).words)
                .sum();
            prop_assert_eq!(total.words, summed);
        }

        #[test]
        fn prop_characters_equal_run_lengths(blocks in prop::collection::vec(arb_block(), 0..10)) {
            let expected: usize = blocks
                .iter()
                .flat_map(|b| match b {
                    Block::List { items, .. } => items.iter().flatten().flat_map(|p| p.runs().to_vec()).collect::<Vec<_>>(),
                    other => other.runs().to_vec(),
                })
                .map(|r| r.char_len())
                .sum();
            prop_assert_eq!(TextMetrics::count(&blocks).characters, expected);
        }
    }
}
