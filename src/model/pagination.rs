//! Pagination over the sorted dataset
//!
//! Pages are 1-indexed. The table only ever sees the current page's rows.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 25;
/// Sizes offered by the page size selector
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [25, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 0)
    }
}

impl Pagination {
    /// A page size of zero is treated as one
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size, staying on the page that holds the first item
    /// currently shown
    pub fn set_page_size(&mut self, page_size: usize) {
        let first = self.page_bounds().start;
        self.page_size = page_size.max(1);
        self.current_page = (first / self.page_size + 1).min(self.total_pages());
    }

    /// The option after the current size, wrapping to the smallest
    pub fn next_page_size(&self) -> usize {
        PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|size| *size > self.page_size)
            .unwrap_or(PAGE_SIZE_OPTIONS[0])
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Always at least one, even with no items
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Update the item count, clamping the current page into range
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page.min(self.total_pages());
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Advance one page. Returns false on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Go back one page. Returns false on the first page.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Index range of the current page within the full item list
    pub fn page_bounds(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let bounds = self.page_bounds();
        let end = bounds.end.min(items.len());
        &items[bounds.start.min(end)..end]
    }

    /// 1-indexed `(first, last)` item numbers shown, `None` with no items
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.total_items == 0 {
            return None;
        }
        let bounds = self.page_bounds();
        Some((bounds.start + 1, bounds.end))
    }

    /// "Showing 1-25 of 40 items"
    pub fn summary(&self) -> Option<String> {
        self.item_range().map(|(first, last)| {
            format!("Showing {}-{} of {} items", first, last, self.total_items)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(Pagination::new(10, 0).total_pages(), 1);
        assert_eq!(Pagination::new(10, 10).total_pages(), 1);
        assert_eq!(Pagination::new(10, 11).total_pages(), 2);
        assert_eq!(Pagination::new(0, 3).total_pages(), 3);
    }

    #[test]
    fn test_next_and_previous_clamp() {
        let mut pages = Pagination::new(10, 25);
        assert!(!pages.has_previous());
        assert!(!pages.previous());

        assert!(pages.next());
        assert!(pages.next());
        assert_eq!(pages.current_page(), 3);
        assert!(!pages.next());
        assert_eq!(pages.current_page(), 3);

        assert!(pages.previous());
        assert_eq!(pages.current_page(), 2);
    }

    #[test]
    fn test_item_range_and_summary() {
        let mut pages = Pagination::new(10, 25);
        assert_eq!(pages.item_range(), Some((1, 10)));

        pages.next();
        pages.next();
        assert_eq!(pages.item_range(), Some((21, 25)));
        assert_eq!(pages.summary().as_deref(), Some("Showing 21-25 of 25 items"));

        assert_eq!(Pagination::new(10, 0).summary(), None);
    }

    #[test]
    fn test_page_slice() {
        let items: Vec<u32> = (1..=12).collect();
        let mut pages = Pagination::new(5, items.len());
        assert_eq!(pages.page_slice(&items), &[1, 2, 3, 4, 5]);

        pages.next();
        pages.next();
        assert_eq!(pages.page_slice(&items), &[11, 12]);
    }

    #[test]
    fn test_shrinking_total_clamps_current_page() {
        let mut pages = Pagination::new(5, 20);
        pages.next();
        pages.next();
        pages.next();
        assert_eq!(pages.current_page(), 4);

        pages.set_total_items(7);
        assert_eq!(pages.current_page(), 2);
        assert_eq!(pages.page_bounds(), 5..7);

        pages.set_total_items(0);
        assert_eq!(pages.current_page(), 1);
        assert_eq!(pages.page_bounds(), 0..0);
    }

    #[test]
    fn test_page_size_change_keeps_first_item_in_view() {
        let mut pages = Pagination::new(5, 20);
        while pages.next() {}
        assert_eq!(pages.current_page(), 4);
        assert_eq!(pages.item_range(), Some((16, 20)));

        pages.set_page_size(10);
        assert_eq!(pages.page_size(), 10);
        assert_eq!(pages.current_page(), 2);
        assert_eq!(pages.item_range(), Some((11, 20)));

        pages.set_page_size(100);
        assert_eq!(pages.current_page(), 1);
        assert_eq!(pages.total_pages(), 1);

        pages.set_page_size(0);
        assert_eq!(pages.page_size(), 1);
    }

    #[test]
    fn test_next_page_size_cycles_options() {
        let mut pages = Pagination::new(DEFAULT_PAGE_SIZE, 300);
        assert_eq!(pages.next_page_size(), 50);
        pages.set_page_size(50);
        assert_eq!(pages.next_page_size(), 100);
        pages.set_page_size(100);
        assert_eq!(pages.next_page_size(), 25);

        // Sizes outside the options step to the next larger one
        assert_eq!(Pagination::new(10, 5).next_page_size(), 25);
        assert_eq!(Pagination::new(500, 5).next_page_size(), 25);
    }
}
