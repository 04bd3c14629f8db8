//! Offset/limit windows for list queries.

use serde::Serialize;

use crate::error::AppError;
use crate::result::AppResult;

/// Default number of rows returned by a list query.
pub const DEFAULT_LIMIT: u64 = 100;

/// A `skip`/`limit` window over an ordered result set.
///
/// The store addresses rows with an inclusive index range, so a window of
/// `skip = 10, limit = 5` covers rows `10..=14`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    skip: u64,
    limit: u64,
}

impl PageWindow {
    /// Create a window. `limit` must be at least one.
    pub fn new(skip: u64, limit: u64) -> AppResult<Self> {
        if limit == 0 {
            return Err(AppError::validation("limit must be at least 1"));
        }
        Ok(Self { skip, limit })
    }

    /// The single-row window used by `find_one`.
    pub fn one() -> Self {
        Self { skip: 0, limit: 1 }
    }

    /// A window covering every row.
    pub fn all() -> Self {
        Self {
            skip: 0,
            limit: u64::MAX,
        }
    }

    /// Rows to skip.
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum rows to return.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Whether the window places no upper bound on the result.
    pub fn is_unbounded(&self) -> bool {
        self.skip == 0 && self.limit == u64::MAX
    }

    /// Inclusive `(from, to)` row range.
    pub fn range(&self) -> (u64, u64) {
        (self.skip, self.skip.saturating_add(self.limit - 1))
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}
