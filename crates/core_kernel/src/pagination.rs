//! Paging and sorting primitives shared by every list query
//!
//! A `PageRequest` describes the slice a caller wants (0-based page number,
//! page size, sort key and direction). A `Page` is the slice that came back
//! together with the size of the full result set, from which the total page
//! count is derived.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::CoreError;

/// Page number used when the caller does not supply one
pub const DEFAULT_PAGE_NUMBER: u32 = 0;

/// Page size used when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses a caller-supplied direction
    ///
    /// `asc` in any letter case is ascending; every other value is
    /// descending.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Applies the direction to an ascending comparison result
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Sort order over a closed set of fields `F`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> Sort<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: F) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: F) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// A request for one page of a sorted result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<F> {
    page: u32,
    size: u32,
    sort: Sort<F>,
}

impl<F> PageRequest<F> {
    /// Creates a page request
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `size` is zero
    pub fn new(page: u32, size: u32, sort: Sort<F>) -> Result<Self, CoreError> {
        if size == 0 {
            return Err(CoreError::validation("Page size must be greater than zero"));
        }
        Ok(Self { page, size, sort })
    }

    /// Zero-based page index
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> &Sort<F> {
        &self.sort
    }

    /// Number of items skipped before this page starts
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl<F: Default> Default for PageRequest<F> {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

/// One page of results plus the size of the full result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    size: u32,
    total_items: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, size: u32, total_items: u64) -> Self {
        Self {
            items,
            page,
            size,
            total_items,
        }
    }

    /// An empty page answering `request`
    pub fn empty<F>(request: &PageRequest<F>) -> Self {
        Self::new(Vec::new(), request.page(), request.size(), 0)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Zero-based index of this page
    pub fn page_number(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.size
    }

    /// Number of items across all pages
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// `ceil(total_items / page_size)`
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_items.div_ceil(u64::from(self.size))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }

    /// Converts every item while keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
        }
    }
}

/// Cuts the requested page out of an already filtered and sorted collection
///
/// In-memory adapters use this; database adapters push `LIMIT`/`OFFSET`
/// down to SQL instead.
pub fn paginate<T, F>(items: Vec<T>, request: &PageRequest<F>) -> Page<T> {
    let total_items = items.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let slice = items
        .into_iter()
        .skip(offset)
        .take(request.size() as usize)
        .collect();

    Page::new(slice, request.page(), request.size(), total_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        let result = PageRequest::new(0, 0, Sort::asc(()));
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_default_request() {
        let request: PageRequest<()> = PageRequest::default();
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), 10);
        assert_eq!(request.sort().direction, SortDirection::Asc);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(SortDirection::parse_lenient("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient("sideways"), SortDirection::Desc);
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], 2, 3, 11).map(|n| n * 10);
        assert_eq!(page.items(), &[10, 20, 30]);
        assert_eq!(page.page_number(), 2);
        assert_eq!(page.total_items(), 11);
        assert_eq!(page.total_pages(), 4);
        assert!(page.has_next());
    }
}
