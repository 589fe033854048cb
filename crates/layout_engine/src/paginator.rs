//! Flow pagination
//!
//! Places atomic flow units onto fixed-height pages. A unit that does not
//! fit below the cursor opens a new page and starts at its top; a unit is
//! never split across pages unless it is taller than a whole page, in
//! which case it falls back to its slice granularity (text lines, table
//! rows) so the flow always terminates.

use crate::{PageGeometry, RenderCursor};

/// An indivisible piece of a unit, drawn at one vertical offset
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSlice<T> {
    pub height: f32,
    pub payload: T,
}

/// The atomic flow granularity: one paragraph, heading, list item or table row
#[derive(Debug, Clone, PartialEq)]
pub struct FlowUnit<T> {
    slices: Vec<FlowSlice<T>>,
    gap_before: f32,
}

impl<T> FlowUnit<T> {
    pub fn new(gap_before: f32) -> Self {
        Self {
            slices: Vec::new(),
            gap_before,
        }
    }

    /// Unit made of one slice
    pub fn single(height: f32, payload: T, gap_before: f32) -> Self {
        let mut unit = Self::new(gap_before);
        unit.push(height, payload);
        unit
    }

    pub fn push(&mut self, height: f32, payload: T) {
        self.slices.push(FlowSlice { height, payload });
    }

    pub fn height(&self) -> f32 {
        self.slices.iter().map(|s| s.height).sum()
    }

    pub fn gap_before(&self) -> f32 {
        self.gap_before
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// A slice placed on a page; `top` is the y of the slice's top edge
#[derive(Debug, Clone, PartialEq)]
pub struct Placed<T> {
    pub page: usize,
    pub top: f32,
    pub payload: T,
}

/// Flows units down pages, tracking the render cursor
#[derive(Debug, Clone)]
pub struct FlowPaginator {
    cursor: RenderCursor,
    top: f32,
    bottom: f32,
    fresh_page: bool,
}

impl FlowPaginator {
    /// Paginator whose pages run from `top` to `bottom`
    pub fn new(top: f32, bottom: f32) -> Self {
        Self {
            cursor: RenderCursor::new(top),
            top,
            bottom,
            fresh_page: true,
        }
    }

    pub fn for_geometry(geometry: &PageGeometry) -> Self {
        Self::new(geometry.content_top(), geometry.content_bottom())
    }

    pub fn cursor(&self) -> RenderCursor {
        self.cursor
    }

    /// Pages opened so far
    pub fn page_count(&self) -> usize {
        self.cursor.page() + 1
    }

    pub fn usable_height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Consume vertical space on the current page without placing anything
    pub fn advance(&mut self, dy: f32) {
        self.cursor.advance(dy);
        self.fresh_page = false;
    }

    fn open_page(&mut self) {
        self.cursor.new_page(self.top);
        self.fresh_page = true;
    }

    /// Place a unit and return where each of its slices landed
    pub fn place<T>(&mut self, unit: FlowUnit<T>) -> Vec<Placed<T>> {
        if unit.is_empty() {
            return Vec::new();
        }

        let gap = if self.fresh_page { 0.0 } else { unit.gap_before };
        let height = unit.height();
        let oversized = height > self.usable_height();

        if !oversized && !self.fresh_page && self.cursor.y() + gap + height > self.bottom {
            self.open_page();
        } else {
            self.cursor.advance(gap);
        }

        let mut placed = Vec::with_capacity(unit.slices.len());
        for slice in unit.slices {
            if oversized && !self.fresh_page && self.cursor.y() + slice.height > self.bottom {
                self.open_page();
            }
            placed.push(Placed {
                page: self.cursor.page(),
                top: self.cursor.y(),
                payload: slice.payload,
            });
            self.cursor.advance(slice.height);
            self.fresh_page = false;
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit(height: f32) -> FlowUnit<()> {
        FlowUnit::single(height, (), 0.0)
    }

    #[test]
    fn test_three_units_of_forty_need_two_pages() {
        let mut p = FlowPaginator::new(0.0, 100.0);
        let pages: Vec<usize> = (0..3).map(|_| p.place(unit(40.0))[0].page).collect();
        assert_eq!(pages, vec![0, 0, 1]);
        assert_eq!(p.page_count(), 2);
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        let mut p = FlowPaginator::new(20.0, 120.0);
        p.place(unit(50.0));
        let placed = p.place(unit(50.0));
        assert_eq!(placed[0].page, 0);
        assert_eq!(placed[0].top, 70.0);
        assert_eq!(p.page_count(), 1);
    }

    #[test]
    fn test_new_page_starts_at_top() {
        let mut p = FlowPaginator::new(20.0, 120.0);
        p.place(unit(90.0));
        let placed = p.place(unit(20.0));
        assert_eq!(placed[0].page, 1);
        assert_eq!(placed[0].top, 20.0);
    }

    #[test]
    fn test_gap_dropped_at_page_top() {
        let mut p = FlowPaginator::new(0.0, 100.0);
        let first = p.place(FlowUnit::single(10.0, (), 5.0));
        assert_eq!(first[0].top, 0.0);
        let second = p.place(FlowUnit::single(10.0, (), 5.0));
        assert_eq!(second[0].top, 15.0);
    }

    #[test]
    fn test_unit_kept_together() {
        let mut p = FlowPaginator::new(0.0, 100.0);
        p.place(unit(70.0));
        let mut lines = FlowUnit::new(0.0);
        for i in 0..4 {
            lines.push(10.0, i);
        }
        let placed = p.place(lines);
        assert!(placed.iter().all(|s| s.page == 1));
        assert_eq!(placed.iter().map(|s| s.top).collect::<Vec<_>>(), vec![0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_oversized_unit_splits_at_slices() {
        let mut p = FlowPaginator::new(0.0, 100.0);
        p.place(unit(30.0));
        let mut tall = FlowUnit::new(0.0);
        for i in 0..25 {
            tall.push(10.0, i);
        }
        let placed = p.place(tall);
        assert_eq!(placed[0].page, 0);
        assert_eq!(placed[0].top, 30.0);
        assert_eq!(placed.iter().filter(|s| s.page == 0).count(), 7);
        assert_eq!(placed.last().map(|s| s.page), Some(2));
    }

    #[test]
    fn test_advance_consumes_first_page() {
        let mut p = FlowPaginator::new(0.0, 100.0);
        p.advance(15.0);
        assert_eq!(p.place(unit(40.0))[0].top, 15.0);
        assert_eq!(p.place(unit(40.0))[0].top, 55.0);
        assert_eq!(p.place(unit(40.0))[0].page, 1);
    }

    proptest! {
        #[test]
        fn prop_page_count_for_uniform_units(per_page in prop::sample::select(vec![1usize, 2, 4, 5, 8]), count in 0usize..40) {
            let height = 100.0 / per_page as f32;
            let mut p = FlowPaginator::new(0.0, 100.0);
            for _ in 0..count {
                p.place(unit(height));
            }
            let expected = count.div_ceil(per_page).max(1);
            prop_assert_eq!(p.page_count(), expected);
        }

        #[test]
        fn prop_cursor_monotonic_within_page(heights in prop::collection::vec(1.0f32..60.0, 1..30)) {
            let mut p = FlowPaginator::new(10.0, 110.0);
            let mut last = p.cursor();
            for h in heights {
                for slice in p.place(unit(h)) {
                    prop_assert!(slice.top + h <= 110.0 + 1e-3);
                }
                let now = p.cursor();
                prop_assert!(now.page() >= last.page());
                if now.page() == last.page() {
                    prop_assert!(now.y() >= last.y());
                }
                last = now;
            }
        }
    }
}
