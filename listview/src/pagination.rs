//! Pagination state and the page-button window.

use std::ops::Range;

use log::warn;
use serde::{Deserialize, Serialize};

/// Page sizes offered by the items-per-page selector.
pub const ITEMS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Page size used when the host asks for one outside the allowed set.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Maximum number of page-number buttons shown at once.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// Host-driven pagination: the host slices the data and reports the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPagination {
    pub total_items: usize,
}

/// Who slices the records into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// The engine slices the full record list.
    #[default]
    Internal,
    /// The host supplies one page at a time.
    External,
}

/// Current page, page size and item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    items_per_page: usize,
    total_items: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl PaginationState {
    /// Start on page 1 with no items.
    ///
    /// A page size outside [`ITEMS_PER_PAGE_OPTIONS`] falls back to
    /// [`DEFAULT_ITEMS_PER_PAGE`].
    pub fn new(items_per_page: usize) -> Self {
        let items_per_page = if ITEMS_PER_PAGE_OPTIONS.contains(&items_per_page) {
            items_per_page
        } else {
            warn!(
                "Unsupported page size {}, using {}",
                items_per_page, DEFAULT_ITEMS_PER_PAGE
            );
            DEFAULT_ITEMS_PER_PAGE
        };
        Self {
            current_page: 1,
            items_per_page,
            total_items: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages, at least 1 even when empty.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page).max(1)
    }

    pub fn can_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Move to `page`. Out-of-range pages are a no-op.
    /// Returns true if the current page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current_page + 1)
    }

    pub fn previous(&mut self) -> bool {
        self.current_page > 1 && self.go_to(self.current_page - 1)
    }

    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.total_pages())
    }

    /// Change the page size and go back to page 1.
    ///
    /// Sizes outside [`ITEMS_PER_PAGE_OPTIONS`] are rejected and leave the
    /// state untouched, as does re-selecting the current size. Returns true
    /// if the size changed.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> bool {
        if !ITEMS_PER_PAGE_OPTIONS.contains(&items_per_page) {
            warn!("Ignoring unsupported page size {}", items_per_page);
            return false;
        }
        if items_per_page == self.items_per_page {
            return false;
        }
        self.items_per_page = items_per_page;
        self.current_page = 1;
        true
    }

    /// Update the item count, pulling the current page back inside range.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page.min(self.total_pages());
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// Index range of the current page within the full item list.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.items_per_page;
        let end = (start + self.items_per_page).min(self.total_items);
        start.min(end)..end
    }

    /// Page numbers to show as buttons.
    pub fn window(&self) -> Vec<usize> {
        page_window(self.current_page, self.total_pages())
    }

    /// Footer summary, e.g. `"21-23 sur 23"`.
    pub fn summary(&self) -> String {
        if self.total_items == 0 {
            return "0-0 sur 0".to_string();
        }
        let range = self.page_range();
        format!("{}-{} sur {}", range.start + 1, range.end, self.total_items)
    }
}

/// Page numbers to show as buttons, at most [`MAX_PAGE_BUTTONS`].
///
/// The window starts pinned to the first pages, slides to keep the current
/// page centred, and ends pinned to the last pages.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<usize> {
    let half = MAX_PAGE_BUTTONS / 2;
    let (start, end) = if total_pages <= MAX_PAGE_BUTTONS {
        (1, total_pages)
    } else if current_page <= half + 1 {
        (1, MAX_PAGE_BUTTONS)
    } else if current_page + half >= total_pages {
        (total_pages + 1 - MAX_PAGE_BUTTONS, total_pages)
    } else {
        (current_page - half, current_page + half)
    };
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_small_total() {
        assert_eq!(page_window(1, 1), vec![1]);
        assert_eq!(page_window(2, 4), vec![1, 2, 3, 4]);
        assert_eq!(page_window(5, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_edges() {
        assert_eq!(page_window(3, 12), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(4, 12), vec![2, 3, 4, 5, 6]);
        assert_eq!(page_window(10, 12), vec![8, 9, 10, 11, 12]);
        assert_eq!(page_window(9, 12), vec![7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_unsupported_initial_page_size_falls_back() {
        assert_eq!(PaginationState::new(7).items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(PaginationState::new(20).items_per_page(), 20);
    }
}
