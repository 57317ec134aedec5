//! Pagination and filtering query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;

/// Query parameters for `GET /urls`.
///
/// Uses `serde_with` to parse numbers and booleans from query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListUrlsParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub per_page: Option<i64>,

    /// Restricts the listing to active (`true`) or inactive (`false`) records.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl ListUrlsParams {
    /// Validates paging and returns `(page, per_page)` with defaults applied.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `per_page`: 10
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Per page must be between 1 and 100
    /// - The row offset `(page - 1) * per_page` must fit in an `i64`
    pub fn validate_and_get_page(&self) -> Result<(i64, i64), String> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);

        if page < 1 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(format!("Per page must be between 1 and {MAX_PER_PAGE}"));
        }

        if (page - 1).checked_mul(per_page).is_none() {
            return Err("Page is out of range".to_string());
        }

        Ok((page, per_page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, per_page: Option<i64>) -> ListUrlsParams {
        ListUrlsParams {
            page,
            per_page,
            is_active: None,
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(params(None, None).validate_and_get_page().unwrap(), (1, 10));
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).validate_and_get_page().is_err());
        assert!(params(Some(-3), None).validate_and_get_page().is_err());
    }

    #[test]
    fn test_per_page_bounds() {
        assert!(params(None, Some(0)).validate_and_get_page().is_err());
        assert!(params(None, Some(1)).validate_and_get_page().is_ok());
        assert!(params(None, Some(100)).validate_and_get_page().is_ok());
        assert!(params(None, Some(101)).validate_and_get_page().is_err());
    }

    #[test]
    fn test_page_with_overflowing_offset_is_error() {
        assert_eq!(
            params(Some(i64::MAX), Some(5)).validate_and_get_page(),
            Err("Page is out of range".to_string())
        );
        assert!(params(Some(i64::MAX), Some(1)).validate_and_get_page().is_ok());
    }

    #[test]
    fn test_parse_string_values() {
        let json = r#"{"page": "2", "per_page": "5", "is_active": "true"}"#;
        let p: ListUrlsParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.page, Some(2));
        assert_eq!(p.per_page, Some(5));
        assert_eq!(p.is_active, Some(true));
    }
}
