use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Current page over the in-memory record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    index: usize,
    page_size: usize,
    record_count: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageWindow {
    pub fn new(page_size: usize) -> Self {
        Self {
            index: 0,
            page_size: page_size.max(1),
            record_count: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn page_count(&self) -> usize {
        self.record_count.div_ceil(self.page_size)
    }

    /// New record set: back to the first page.
    pub fn reset(&mut self, record_count: usize) {
        self.record_count = record_count;
        self.index = 0;
    }

    /// Same record set, possibly reordered or resized; keeps the page when
    /// it still exists.
    pub fn resize(&mut self, record_count: usize) {
        self.record_count = record_count;
        self.index = self.index.min(self.page_count().saturating_sub(1));
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.page_count()
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0 && self.record_count > 0
    }

    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Visible index range, clamped to the record count.
    pub fn range(&self) -> Range<usize> {
        let start = (self.index * self.page_size).min(self.record_count);
        let end = (start + self.page_size).min(self.record_count);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// `"2 / 3"`, or `"0 / 0"` for an empty record set.
    pub fn label(&self) -> String {
        let pages = self.page_count();
        if pages == 0 {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.index + 1, pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_and_boundaries() {
        let mut window = PageWindow::new(50);
        window.reset(120);

        assert_eq!(window.page_count(), 3);
        assert!(!window.prev(), "prev from page 0 should be a no-op");
        assert_eq!(window.index(), 0);

        assert!(window.next());
        assert!(window.next());
        assert_eq!(window.index(), 2);
        assert!(!window.next(), "next from the last page should be a no-op");
        assert_eq!(window.index(), 2);
        assert_eq!(window.range(), 100..120);
        assert_eq!(window.label(), "3 / 3");
    }

    #[test]
    fn empty_set_disables_navigation() {
        let mut window = PageWindow::new(50);
        window.reset(0);

        assert_eq!(window.page_count(), 0);
        assert!(!window.has_next());
        assert!(!window.has_prev());
        assert!(!window.next());
        assert!(!window.prev());
        assert_eq!(window.range(), 0..0);
        assert_eq!(window.label(), "0 / 0");
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let mut window = PageWindow::new(50);
        window.reset(100);
        assert_eq!(window.page_count(), 2);
        window.next();
        assert!(!window.has_next());
        assert_eq!(window.range(), 50..100);
    }

    #[test]
    fn reset_returns_to_first_page_but_resize_keeps_it() {
        let mut window = PageWindow::new(10);
        window.reset(35);
        window.next();
        window.next();

        window.resize(35);
        assert_eq!(window.index(), 2);

        window.resize(15);
        assert_eq!(window.index(), 1);

        window.reset(35);
        assert_eq!(window.index(), 0);
    }

    #[test]
    fn slice_returns_visible_items() {
        let items: Vec<u32> = (0..7).collect();
        let mut window = PageWindow::new(3);
        window.reset(items.len());
        window.next();
        window.next();

        assert_eq!(window.slice(&items), &[6]);
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        let mut window = PageWindow::new(0);
        window.reset(3);
        assert_eq!(window.page_count(), 3);
        assert_eq!(window.range(), 0..1);
    }
}
