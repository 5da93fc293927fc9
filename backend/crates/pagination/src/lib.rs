//! Page-number pagination primitives shared by list endpoints.
//!
//! List endpoints accept `page`/`perPage` query parameters and respond with a
//! [`Page`] envelope carrying the items plus totals, so clients can render
//! pagers without issuing a separate count request.

use serde::Serialize;

/// First page number; pages are 1-based.
pub const FIRST_PAGE: u32 = 1;
/// Page size applied when the client omits `perPage`.
pub const DEFAULT_PER_PAGE: u32 = 20;
/// Upper bound on `perPage` to keep result sets bounded.
pub const MAX_PER_PAGE: u32 = 100;

/// Validation errors for client-supplied pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageParamsError {
    /// The page number was zero; pages are 1-based.
    #[error("page must be at least {FIRST_PAGE}")]
    PageOutOfRange,
    /// The page size was zero or above [`MAX_PER_PAGE`].
    #[error("perPage must be between 1 and {MAX_PER_PAGE}")]
    PerPageOutOfRange,
}

/// Validated pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: u32,
    per_page: u32,
}

impl PageParams {
    /// Build parameters from optional query values, applying defaults.
    ///
    /// # Errors
    /// Returns [`PageParamsError`] when a supplied value is out of range.
    pub fn from_query(page: Option<u32>, per_page: Option<u32>) -> Result<Self, PageParamsError> {
        let page = page.unwrap_or(FIRST_PAGE);
        if page < FIRST_PAGE {
            return Err(PageParamsError::PageOutOfRange);
        }
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(PageParamsError::PerPageOutOfRange);
        }
        Ok(Self { page, per_page })
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    /// Number of items a query for this page should fetch.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.per_page as u64
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Response envelope for one page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    /// Page size used for this response.
    pub per_page: u32,
    /// Total number of matching items across all pages.
    pub total_items: u64,
    /// Total number of pages at this page size.
    pub total_pages: u64,
    /// Whether pages beyond this one exist.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Assemble an envelope from the fetched items and the total match count.
    #[must_use]
    pub fn new(items: Vec<T>, params: PageParams, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(u64::from(params.per_page()));
        let has_more = u64::from(params.page()) < total_pages;
        Self {
            items,
            page: params.page(),
            per_page: params.per_page(),
            total_items,
            total_pages,
            has_more,
        }
    }

    /// Map the item type while keeping the envelope metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, None, FIRST_PAGE, DEFAULT_PER_PAGE)]
    #[case(Some(3), Some(50), 3, 50)]
    #[case(Some(1), Some(MAX_PER_PAGE), 1, MAX_PER_PAGE)]
    fn from_query_accepts_valid_values(
        #[case] page: Option<u32>,
        #[case] per_page: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_per_page: u32,
    ) {
        let params = PageParams::from_query(page, per_page).expect("valid params");
        assert_eq!(params.page(), expected_page);
        assert_eq!(params.per_page(), expected_per_page);
    }

    #[rstest]
    #[case(Some(0), None, PageParamsError::PageOutOfRange)]
    #[case(None, Some(0), PageParamsError::PerPageOutOfRange)]
    #[case(None, Some(MAX_PER_PAGE + 1), PageParamsError::PerPageOutOfRange)]
    fn from_query_rejects_out_of_range_values(
        #[case] page: Option<u32>,
        #[case] per_page: Option<u32>,
        #[case] expected: PageParamsError,
    ) {
        let error = PageParams::from_query(page, per_page).expect_err("invalid params");
        assert_eq!(error, expected);
    }

    #[rstest]
    #[case(1, 20, 0)]
    #[case(2, 20, 20)]
    #[case(5, 7, 28)]
    fn offset_skips_previous_pages(#[case] page: u32, #[case] per_page: u32, #[case] offset: u64) {
        let params = PageParams::from_query(Some(page), Some(per_page)).expect("valid params");
        assert_eq!(params.offset(), offset);
    }

    #[rstest]
    #[case(0, 0, false)]
    #[case(19, 1, false)]
    #[case(20, 1, false)]
    #[case(21, 2, true)]
    fn envelope_totals_follow_match_count(
        #[case] total_items: u64,
        #[case] total_pages: u64,
        #[case] has_more: bool,
    ) {
        let page = Page::new(vec![0_u8; 1], PageParams::default(), total_items);
        assert_eq!(page.total_pages, total_pages);
        assert_eq!(page.has_more, has_more);
    }

    #[test]
    fn envelope_serialises_camel_case() {
        let page = Page::new(vec![1_u8], PageParams::default(), 1);
        let value = serde_json::to_value(&page).expect("serialises");
        assert!(value.get("perPage").is_some());
        assert!(value.get("totalItems").is_some());
        assert!(value.get("per_page").is_none());
    }
}
