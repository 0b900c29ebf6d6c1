//! Listing query parameters
//!
//! Lenient by design: anything unparseable falls back to its default and
//! out-of-range values are clamped, so the listing endpoint never rejects a
//! request over pagination noise. `sortBy` is accepted and echoed but only
//! `createdAt` exists to sort on.

use serde::Deserialize;

use crate::store::SortOrder;

/// Default page size
pub const DEFAULT_LIMIT: usize = 10;

/// Maximum page size
pub const MAX_LIMIT: usize = 100;

/// The only sort key the store supports
pub const SORT_BY_CREATED_AT: &str = "createdAt";

/// Raw query string fields, all optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default, rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(default, rename = "sortOrder")]
    pub sort_order: Option<String>,
}

/// Resolved pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: usize,
    pub limit: usize,
    pub sort_order: SortOrder,
}

impl ListQuery {
    /// Resolves raw parameters into clamped, defaulted values.
    pub fn resolve(&self) -> PageParams {
        let page = parse_or(&self.page, 1).max(1);
        let limit = parse_or(&self.limit, DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let sort_order = match self.sort_order.as_deref() {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        };

        PageParams {
            page,
            limit,
            sort_order,
        }
    }
}

fn parse_or(raw: &Option<String>, default: usize) -> usize {
    raw.as_deref()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>, order: Option<&str>) -> ListQuery {
        ListQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
            sort_by: None,
            sort_order: order.map(String::from),
        }
    }

    #[test]
    fn test_defaults() {
        let params = ListQuery::default().resolve();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, DEFAULT_LIMIT);
        assert_eq!(params.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let params = query(Some("abc"), Some("-5"), Some("sideways")).resolve();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, DEFAULT_LIMIT);
        assert_eq!(params.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_zero_clamps_to_one() {
        let params = query(Some("0"), Some("0"), None).resolve();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 1);
    }

    #[test]
    fn test_limit_capped() {
        let params = query(None, Some("100000"), None).resolve();
        assert_eq!(params.limit, MAX_LIMIT);
    }

    #[test]
    fn test_asc_recognized() {
        let params = query(Some("3"), Some("25"), Some("asc")).resolve();
        assert_eq!(params.page, 3);
        assert_eq!(params.limit, 25);
        assert_eq!(params.sort_order, SortOrder::Asc);
    }
}
