//! Pagination and filter query parameter extractors.

use serde::{Deserialize, Serialize};

use registro_core::error::AppError;
use registro_core::result::AppResult;
use registro_core::types::pagination::DEFAULT_LIMIT;
use registro_core::types::{Filter, FilterMode, PageWindow};

/// `skip`/`limit` query parameters of list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Rows to skip (default 0).
    pub skip: Option<u64>,
    /// Rows to return (default 100).
    pub limit: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageWindow`, rejecting limits outside `1..=max_limit`.
    pub fn into_window(self, max_limit: u64) -> AppResult<PageWindow> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT.min(max_limit));
        if limit > max_limit {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {max_limit}"
            )));
        }
        PageWindow::new(self.skip.unwrap_or(0), limit)
    }
}

/// `filters` query parameter: a JSON object of column conditions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterParams {
    /// JSON object such as `{"precio": {"$gte": 18}, "estado": "activo"}`.
    pub filters: Option<String>,
}

impl FilterParams {
    /// Parse the conditions; an absent or blank parameter matches all rows.
    pub fn into_filter(self, mode: FilterMode) -> AppResult<Filter> {
        match self.filters.as_deref().map(str::trim) {
            None | Some("") => Ok(Filter::new()),
            Some(raw) => Filter::from_json_str(raw, mode),
        }
    }
}
