//! Query parameter extraction

use serde::{Deserialize, Serialize};

use crate::errors::WebError;
use solhub_api_types::PaginationInput;

/// Pagination query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Items per page (max 100)
    pub limit: Option<u32>,
    /// Raw starting offset, takes precedence over page
    pub offset: Option<u32>,
}

impl PaginationQuery {
    /// Convert to standard pagination input
    pub fn to_pagination_input(&self) -> PaginationInput {
        PaginationInput {
            page: self.page,
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Validate pagination parameters
    pub fn validate(&self) -> Result<(), WebError> {
        if let Some(limit) = self.limit {
            if limit > PaginationInput::MAX_LIMIT {
                return Err(WebError::bad_request(format!(
                    "Invalid pagination: maximum limit is {}",
                    PaginationInput::MAX_LIMIT
                )));
            }
            if limit == 0 {
                return Err(WebError::bad_request(
                    "Invalid pagination: limit must be greater than 0",
                ));
            }
        }

        if let Some(page) = self.page {
            if page == 0 {
                return Err(WebError::bad_request(
                    "Invalid pagination: page must be greater than 0",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_is_rejected() {
        let query = PaginationQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn oversized_limit_is_rejected() {
        let query = PaginationQuery {
            limit: Some(101),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(PaginationQuery::default().validate().is_ok());
    }
}
