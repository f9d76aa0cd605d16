use serde::Serialize;

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// The page that was requested (1-based).
    pub current_page: u32,

    /// Total number of pages for the matching result set.
    pub total_pages: u32,

    /// Total number of matching items across all pages.
    pub total_items: usize,

    /// Requested page size.
    pub per_page: u32,
}

impl Pagination {
    /// Builds metadata for a page over `total_items` matching items.
    ///
    /// `total_pages` is the ceiling of `total_items / per_page`; an empty
    /// result set has zero pages.
    pub fn new(current_page: u32, per_page: u32, total_items: usize) -> Self {
        let total_pages = (total_items as u64).div_ceil(u64::from(per_page)) as u32;
        Self {
            current_page,
            total_pages,
            total_items,
            per_page,
        }
    }

    /// Returns the 0-based offset of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.current_page as usize - 1) * self.per_page as usize
    }
}
