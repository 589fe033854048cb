//! Render cursor - where the next flow unit goes

/// Position of the next drawing operation during flow.
///
/// `y` only grows within a page. Opening a page is the only operation that
/// resets it, and `page` only ever increments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    page: usize,
    y: f32,
}

impl RenderCursor {
    /// Cursor at the top of page 0
    pub fn new(top: f32) -> Self {
        Self { page: 0, y: top }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move down the current page. Negative distances are ignored.
    pub fn advance(&mut self, dy: f32) {
        if dy > 0.0 {
            self.y += dy;
        }
    }

    /// Open the next page and return to its top
    pub fn new_page(&mut self, top: f32) {
        self.page += 1;
        self.y = top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_on_first_page() {
        let cursor = RenderCursor::new(20.0);
        assert_eq!(cursor.page(), 0);
        assert_eq!(cursor.y(), 20.0);
    }

    #[test]
    fn test_advance_never_moves_up() {
        let mut cursor = RenderCursor::new(20.0);
        cursor.advance(6.0);
        cursor.advance(-10.0);
        assert_eq!(cursor.y(), 26.0);
    }

    #[test]
    fn test_new_page_resets_y() {
        let mut cursor = RenderCursor::new(20.0);
        cursor.advance(200.0);
        cursor.new_page(20.0);
        assert_eq!(cursor.page(), 1);
        assert_eq!(cursor.y(), 20.0);
    }
}
