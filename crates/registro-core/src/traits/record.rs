//! Conversion from raw store rows to typed entities.

use crate::result::AppResult;
use crate::types::query::Row;

/// A type a repository can build from a raw row.
///
/// The conversion must be total and side-effect free; a row missing a
/// required column or holding a value of the wrong shape is a
/// [`Conversion`](crate::error::ErrorKind::Conversion) error.
pub trait Record: Sized + Send + Sync + 'static {
    /// Build the entity from a row.
    fn from_row(row: Row) -> AppResult<Self>;
}

impl Record for Row {
    fn from_row(row: Row) -> AppResult<Self> {
        Ok(row)
    }
}
