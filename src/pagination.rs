//! Pagination and search state for the orders table.

use serde::Serialize;

use crate::DEFAULT_PAGE_SIZE;

/// Current pagination/search state of a data table.
///
/// `page` is zero-based here; the wire protocol is one-based and the
/// conversion happens in the query key codec. `page_size` is not validated
/// locally: callers supply it from [`crate::PAGE_SIZE_OPTIONS`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub search: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationState {
    /// Replaces the search text. The page is intentionally left alone;
    /// the presenter resets it only once the debounced value commits.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Replaces the page size without resetting the page. The current page
    /// may now point past the end of the data; the fetch contract tolerates
    /// that by returning an empty page with the true total.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
    }

    /// Number of padding rows needed to keep the table height stable on the
    /// last page. Only meaningful past the first page.
    pub fn empty_rows(&self, total_count: usize) -> usize {
        if self.page == 0 {
            return 0;
        }
        ((self.page + 1) * self.page_size).saturating_sub(total_count)
    }

    /// Total number of pages for `total_count` rows.
    pub fn total_pages(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.page_size)
    }
}

fn window_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Windowed page links for a pagination control: one-based page numbers
/// with `None` marking an ellipsis gap.
#[derive(Clone, Debug, Serialize)]
pub struct PageLinks {
    pub pages: Vec<Option<usize>>,
    pub current: usize,
}

impl PageLinks {
    pub fn new(state: &PaginationState, total_count: usize) -> Self {
        let current = state.page + 1;
        let pages = window_pages(state.total_pages(total_count), current, 2, 2, 4, 2);

        Self { pages, current }
    }
}
