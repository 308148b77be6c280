//! Paged result sets.

use serde::Serialize;

/// Default page size: effectively the whole set in one page.
pub const UNBOUNDED_PAGE_SIZE: u64 = i32::MAX as u64;

/// Page selection for [`Repository::get_all_paged`](super::Repository::get_all_paged).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub index: u64,
    /// Items per page
    pub size: u64,
    /// Only compute the total count, leave the page empty
    pub count_only: bool,
}

impl PageRequest {
    pub fn new(index: u64, size: u64) -> Self {
        Self {
            index,
            size,
            count_only: false,
        }
    }

    /// Request that only counts matching rows
    pub fn count_only() -> Self {
        Self {
            count_only: true,
            ..Self::default()
        }
    }

    /// Page size, never below one
    pub fn effective_size(&self) -> u64 {
        self.size.max(1)
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> u64 {
        self.index.saturating_mul(self.effective_size())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            index: 0,
            size: UNBOUNDED_PAGE_SIZE,
            count_only: false,
        }
    }
}

/// A slice of a result set plus total-count metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub page_index: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> PagedList<T> {
    /// Create a page from its items and the total count of the underlying set
    pub fn new(items: Vec<T>, page_index: u64, page_size: u64, total_count: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_count.div_ceil(page_size);

        Self {
            items,
            page_index,
            page_size,
            total_count,
            total_pages,
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index.saturating_add(1) < self.total_pages
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PagedList::new(vec![1, 2, 3], 0, 3, 10);
        assert_eq!(page.total_pages, 4);
        assert!(!page.has_previous_page());
        assert!(page.has_next_page());
    }

    #[test]
    fn test_last_page() {
        let page = PagedList::new(vec![10], 3, 3, 10);
        assert!(page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let page: PagedList<u8> = PagedList::new(Vec::new(), 0, 0, 5);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 5);
    }

    #[test]
    fn test_empty_set() {
        let page: PagedList<u8> = PagedList::new(Vec::new(), 0, 10, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_default_request_is_one_unbounded_page() {
        let request = PageRequest::default();
        assert_eq!(request.offset(), 0);
        assert_eq!(request.effective_size(), UNBOUNDED_PAGE_SIZE);
        assert!(!request.count_only);
        assert!(PageRequest::count_only().count_only);
    }

    #[test]
    fn test_offset_does_not_overflow() {
        let request = PageRequest::new(u64::MAX, 2);
        assert_eq!(request.offset(), u64::MAX);
    }
}
