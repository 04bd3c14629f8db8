//! Typed accessors over raw store rows.
//!
//! Every accessor fails with a conversion error naming the column, so a
//! malformed row never turns into a partially filled entity.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use registro_core::error::AppError;
use registro_core::result::AppResult;
use registro_core::types::{RecordId, Row};

/// A required string column.
pub fn required_str(row: &Row, column: &str) -> AppResult<String> {
    match row.get(column) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(wrong_type(column, "a string", other)),
        None => Err(missing(column)),
    }
}

/// An optional string column; `null` and absence are both `None`.
pub fn optional_str(row: &Row, column: &str) -> AppResult<Option<String>> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(column, "a string or null", other)),
    }
}

/// A required integer column.
pub fn required_i64(row: &Row, column: &str) -> AppResult<i64> {
    match row.get(column) {
        Some(value @ Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| wrong_type(column, "an integer", value)),
        Some(other) => Err(wrong_type(column, "an integer", other)),
        None => Err(missing(column)),
    }
}

/// An optional identifier column.
pub fn optional_id(row: &Row, column: &str) -> AppResult<Option<RecordId>> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => RecordId::from_json(value)
            .map(Some)
            .ok_or_else(|| wrong_type(column, "a string or number", value)),
    }
}

/// An optional timestamp column.
pub fn optional_timestamp(row: &Row, column: &str) -> AppResult<Option<DateTime<Utc>>> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => parse_timestamp(s).map(Some).ok_or_else(|| {
            AppError::conversion(format!("Column '{column}' has an invalid timestamp: '{s}'"))
        }),
        Some(other) => Err(wrong_type(column, "a timestamp string", other)),
    }
}

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn missing(column: &str) -> AppError {
    AppError::conversion(format!("Row is missing required column '{column}'"))
}

fn wrong_type(column: &str, expected: &str, found: &Value) -> AppError {
    AppError::conversion(format!("Column '{column}' must be {expected}, found {found}"))
}
