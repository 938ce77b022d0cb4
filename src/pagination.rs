use serde::Serialize;

/// Default page size for list endpoints.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

/// Offset-based pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Creates pagination parameters; page numbering starts at 1.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }
}

/// One page of results together with paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_starts_at_zero_for_first_page() {
        assert_eq!(Pagination::new(1, 25).offset(), 0);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }

    #[test]
    fn page_zero_is_clamped_to_one() {
        assert_eq!(Pagination::new(0, 25).page, 1);
    }
}
