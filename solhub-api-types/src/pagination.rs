//! Pagination input and response metadata shared by list endpoints

use serde::{Deserialize, Serialize};

/// Pagination input accepted by list operations
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PaginationInput {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Items per page
    pub limit: Option<u32>,
    /// Raw offset, takes precedence over page when set
    pub offset: Option<u32>,
}

impl PaginationInput {
    pub const DEFAULT_LIMIT: u32 = 50;
    pub const MAX_LIMIT: u32 = 100;

    /// Effective limit, clamped to `1..=MAX_LIMIT`
    pub fn get_limit(&self) -> u32 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    /// Effective starting offset
    pub fn get_offset(&self) -> u32 {
        match (self.offset, self.page) {
            (Some(offset), _) => offset,
            (None, Some(page)) => page.saturating_sub(1) * self.get_limit(),
            (None, None) => 0,
        }
    }
}

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub offset: u32,
}

impl PaginationMeta {
    /// Build metadata from the input that produced a page and the total row count
    pub fn new(input: &PaginationInput, total: u64) -> Self {
        let limit = input.get_limit();
        let offset = input.get_offset();
        let page = offset / limit + 1;
        let total_pages = (total as u32).div_ceil(limit);
        Self {
            page,
            limit,
            total,
            total_pages,
            has_previous: offset > 0,
            has_next: u64::from(offset + limit) < total,
            offset,
        }
    }
}

/// A page of items plus pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>, input: &PaginationInput, total: u64) -> Self {
        Self {
            items,
            meta: PaginationMeta::new(input, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_derived_from_page() {
        let input = PaginationInput {
            page: Some(3),
            limit: Some(20),
            offset: None,
        };
        assert_eq!(input.get_offset(), 40);
        assert_eq!(input.get_limit(), 20);
    }

    #[test]
    fn limit_is_clamped() {
        let input = PaginationInput {
            page: None,
            limit: Some(10_000),
            offset: None,
        };
        assert_eq!(input.get_limit(), PaginationInput::MAX_LIMIT);
    }

    #[test]
    fn zero_limit_is_raised_to_one() {
        let input = PaginationInput {
            page: None,
            limit: Some(0),
            offset: Some(10),
        };
        assert_eq!(input.get_limit(), 1);

        let meta = PaginationMeta::new(&input, 5);
        assert_eq!(meta.limit, 1);
        assert_eq!(meta.page, 11);
    }

    #[test]
    fn meta_reports_boundaries() {
        let input = PaginationInput {
            page: Some(1),
            limit: Some(25),
            offset: None,
        };
        let meta = PaginationMeta::new(&input, 60);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_previous);
        assert!(meta.has_next);
    }
}
