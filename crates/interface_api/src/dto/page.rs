//! Paging parameters and the page envelope

use serde::{Deserialize, Serialize};

use core_kernel::{Page, PageRequest, Sort, SortDirection};
use domain_insurance::{PolicyPageRequest, PolicySortField};

use crate::error::ApiError;

pub const DEFAULT_PAGE_NUMBER: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_BY: &str = "id";
pub const DEFAULT_SORT_DIRECTION: &str = "asc";

/// `pageNo`, `pageSize`, `sortBy` and `sortDir` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_no: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl PageQuery {
    /// Applies the defaults and rejects unknown sort fields and empty pages
    pub fn to_request(&self) -> Result<PolicyPageRequest, ApiError> {
        let field: PolicySortField = self
            .sort_by
            .as_deref()
            .unwrap_or(DEFAULT_SORT_BY)
            .parse()?;
        let direction = SortDirection::parse_lenient(
            self.sort_dir.as_deref().unwrap_or(DEFAULT_SORT_DIRECTION),
        );

        Ok(PageRequest::new(
            self.page_no.unwrap_or(DEFAULT_PAGE_NUMBER),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            Sort::new(field, direction),
        )?)
    }
}

/// Page envelope: `{ items, currentPage, totalItems, totalPages }`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    pub fn from_page<U>(page: Page<U>, convert: impl FnMut(U) -> T) -> Self {
        let current_page = page.page_number();
        let total_items = page.total_items();
        let total_pages = page.total_pages();

        Self {
            items: page.into_items().into_iter().map(convert).collect(),
            current_page,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = PageQuery::default().to_request().unwrap();

        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), 10);
        assert_eq!(request.sort().field, PolicySortField::Id);
        assert_eq!(request.sort().direction, SortDirection::Asc);
    }

    #[test]
    fn test_non_asc_direction_sorts_descending() {
        let query = PageQuery {
            sort_by: Some("premiumAmount".to_string()),
            sort_dir: Some("sideways".to_string()),
            ..PageQuery::default()
        };
        let request = query.to_request().unwrap();

        assert_eq!(request.sort().field, PolicySortField::PremiumAmount);
        assert_eq!(request.sort().direction, SortDirection::Desc);
    }

    #[test]
    fn test_rejects_zero_size_and_unknown_field() {
        let zero = PageQuery {
            page_size: Some(0),
            ..PageQuery::default()
        };
        assert!(matches!(zero.to_request(), Err(ApiError::Validation(_))));

        let unknown = PageQuery {
            sort_by: Some("vin".to_string()),
            ..PageQuery::default()
        };
        assert!(matches!(unknown.to_request(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_envelope_from_page() {
        let page = Page::new(vec![1, 2, 3], 1, 3, 7);
        let response = PageResponse::from_page(page, |n| n * 10);

        assert_eq!(response.items, vec![10, 20, 30]);
        assert_eq!(response.current_page, 1);
        assert_eq!(response.total_items, 7);
        assert_eq!(response.total_pages, 3);
    }

    proptest::proptest! {
        #[test]
        fn prop_explicit_paging_is_kept(page in 0u32..10_000, size in 1u32..500) {
            let query = PageQuery {
                page_no: Some(page),
                page_size: Some(size),
                ..PageQuery::default()
            };
            let request = query.to_request().unwrap();
            proptest::prop_assert_eq!(request.page(), page);
            proptest::prop_assert_eq!(request.size(), size);
        }

        #[test]
        fn prop_only_asc_sorts_ascending(dir in "[a-zA-Z]{0,6}") {
            let query = PageQuery {
                sort_dir: Some(dir.clone()),
                ..PageQuery::default()
            };
            let expected = if dir.eq_ignore_ascii_case("asc") {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            };
            proptest::prop_assert_eq!(query.to_request().unwrap().sort().direction, expected);
        }
    }
}
