use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};

/// RFC 7807 problem document returned for every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ProblemDetail {
    pub fn new(status: axum::http::StatusCode, detail: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }
}

/// A file part received in a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// "asc" in any case is ascending, anything else is descending
    pub fn parse(dir: &str) -> Self {
        if dir.eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Zero-indexed page request with an optional single-column sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<F> {
    page_number: i32,
    page_size: i32,
    sort: Option<(F, SortDirection)>,
}

impl<F> PageRequest<F> {
    pub fn new(page_number: i32, page_size: i32) -> Result<Self> {
        if page_number < 0 {
            return Err(AppError::BadRequest(
                "Page index must not be less than zero".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(AppError::BadRequest(
                "Page size must not be less than one".to_string(),
            ));
        }

        Ok(Self {
            page_number,
            page_size,
            sort: None,
        })
    }

    pub fn sorted_by(mut self, field: F, direction: SortDirection) -> Self {
        self.sort = Some((field, direction));
        self
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    pub fn sort(&self) -> Option<&(F, SortDirection)> {
        self.sort.as_ref()
    }

    /// SQL OFFSET for this page
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// One page of results plus the total element count
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: i32,
    pub page_size: i32,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new<F>(content: Vec<T>, request: &PageRequest<F>, total_elements: i64) -> Self {
        Self {
            content,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_elements,
        }
    }

    pub fn total_pages(&self) -> i32 {
        let size = i64::from(self.page_size.max(1));
        ((self.total_elements + size - 1) / size) as i32
    }

    pub fn is_last(&self) -> bool {
        i64::from(self.page_number) + 1 >= i64::from(self.total_pages())
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Desc);
    }

    #[test]
    fn test_page_request_rejects_negative_index() {
        let result = PageRequest::<()>::new(-1, 10);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_page_request_rejects_non_positive_size() {
        assert!(matches!(
            PageRequest::<()>::new(0, 0),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            PageRequest::<()>::new(0, -5),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::<()>::new(3, 10).unwrap();
        assert_eq!(request.offset(), 30);
        assert_eq!(request.limit(), 10);
        assert!(request.sort().is_none());
    }

    #[test]
    fn test_page_counts() {
        let request = PageRequest::<()>::new(0, 2).unwrap();
        let first = Page::new(vec![1, 2], &request, 5);
        assert_eq!(first.total_pages(), 3);
        assert!(!first.is_last());

        let request = PageRequest::<()>::new(2, 2).unwrap();
        let last = Page::new(vec![5], &request, 5);
        assert!(last.is_last());
    }

    #[test]
    fn test_last_page_index_does_not_overflow() {
        let request = PageRequest::<()>::new(i32::MAX, 10).unwrap();
        let page: Page<i32> = Page::new(vec![], &request, 25);
        assert!(page.is_last());
    }

    #[test]
    fn test_empty_page_is_last() {
        let request = PageRequest::<()>::new(0, 10).unwrap();
        let page: Page<i32> = Page::new(vec![], &request, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_last());
    }

    #[test]
    fn test_problem_detail_title_from_status() {
        let problem = ProblemDetail::new(axum::http::StatusCode::NOT_FOUND, "gone");
        assert_eq!(problem.title, "Not Found");
        assert_eq!(problem.status, 404);
        assert_eq!(problem.problem_type, "about:blank");
    }
}
