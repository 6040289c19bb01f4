//! Offset pagination types

use serde::Serialize;

/// Maximum items per page
const MAX_PER_PAGE: u32 = 100;

/// A validated page request: page is 1-based, size within 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Pagination {
    /// Clamp page to at least 1 and per_page into 1..=100.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Rows on a full page.
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

/// One page of results with the total across all pages
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// Number of pages needed for `total`, at least 1.
    pub fn total_pages(&self) -> u32 {
        let total = u64::try_from(self.total).unwrap_or(0);
        let pages = total.div_ceil(u64::from(self.per_page.max(1))).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginated(total: i64, page: u32, per_page: u32) -> Paginated<()> {
        Paginated {
            items: vec![],
            total,
            page,
            per_page,
        }
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        // skip 10, take 5
        assert_eq!(Pagination::new(3, 5).offset(), 10);
        assert_eq!(Pagination::new(3, 5).limit(), 5);
    }

    #[test]
    fn page_zero_starts_at_first_row() {
        let p = Pagination::new(0, 10);
        assert_eq!(p.page(), 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn clamps_per_page() {
        assert_eq!(Pagination::new(1, 0).limit(), 1);
        assert_eq!(Pagination::new(1, 999).limit(), 100);
    }

    #[test]
    fn total_pages() {
        assert_eq!(paginated(0, 1, 10).total_pages(), 1);
        assert_eq!(paginated(-3, 1, 10).total_pages(), 1);
        assert_eq!(paginated(19, 1, 5).total_pages(), 4);
        assert_eq!(paginated(100, 1, 10).total_pages(), 10);
    }

    #[test]
    fn has_next_until_last_page() {
        assert!(paginated(19, 1, 5).has_next());
        assert!(paginated(19, 3, 5).has_next());
        assert!(!paginated(19, 4, 5).has_next());
        assert!(!paginated(19, 9, 5).has_next());
    }
}
