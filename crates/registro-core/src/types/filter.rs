//! Filter types for dynamic query building.
//!
//! A [`Filter`] is an ordered list of [`FilterField`] conditions that the
//! store ANDs together. Filters usually arrive as a JSON object mapping a
//! column to either a literal (equality) or a single-key operator object:
//!
//! ```json
//! {"estado": "activo", "edad": {"$gte": 18}, "nombre": {"$ilike": "%ana%"}}
//! ```
//!
//! Supported operator keys are `$gt`, `$gte`, `$lt`, `$lte`, `$like` and
//! `$ilike`. Parsing in [`FilterMode::Permissive`] honors only the first key
//! of an operator object and drops unknown operators, leaving that column
//! unconstrained. [`FilterMode::Strict`] rejects both cases instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::AppError;
use crate::result::AppResult;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality (`IS NULL` when the operand is null).
    Eq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Case-sensitive `LIKE` pattern match.
    Like,
    /// Case-insensitive `ILIKE` pattern match.
    ILike,
}

impl FilterOp {
    /// Resolve a JSON operator key such as `"$gte"`.
    ///
    /// Equality has no operator key; it is expressed with a bare literal.
    pub fn from_operator_key(key: &str) -> Option<Self> {
        match key {
            "$gt" => Some(Self::Gt),
            "$gte" => Some(Self::Gte),
            "$lt" => Some(Self::Lt),
            "$lte" => Some(Self::Lte),
            "$like" => Some(Self::Like),
            "$ilike" => Some(Self::ILike),
            _ => None,
        }
    }

    /// The store-side operator name (`eq`, `gt`, ... `ilike`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::ILike => "ilike",
        }
    }
}

/// A scalar operand. No coercion is applied: the operand must already match
/// the column's type in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Null / no value.
    Null,
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    String(String),
}

impl FilterValue {
    /// Convert a JSON scalar. Arrays and objects are not valid operands.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Boolean(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Convert back into a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
            Self::String(s) => Value::String(s.clone()),
        }
    }

    /// Render the operand as a plain literal (`18`, `true`, `ana`).
    pub fn as_literal(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => s.clone(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column or field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

/// How strictly a JSON filter document is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// First operator key wins; unknown operators and non-scalar operands
    /// are dropped with a warning.
    #[default]
    Permissive,
    /// Any ambiguity is a validation error ("malformed filter").
    Strict,
}

/// An ordered conjunction of filter conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter {
    fields: Vec<FilterField>,
}

impl Filter {
    /// An empty filter (matches every row).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a condition.
    pub fn push(&mut self, field: FilterField) {
        self.fields.push(field);
    }

    /// Append a condition, builder style.
    pub fn with(mut self, field: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        self.push(FilterField::new(field, op, value));
        self
    }

    /// Shorthand for an equality condition.
    pub fn eq(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.with(field, FilterOp::Eq, value)
    }

    /// Shorthand for a greater-than condition.
    pub fn gt(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.with(field, FilterOp::Gt, value)
    }

    /// Shorthand for a greater-or-equal condition.
    pub fn gte(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.with(field, FilterOp::Gte, value)
    }

    /// Shorthand for a less-than condition.
    pub fn lt(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.with(field, FilterOp::Lt, value)
    }

    /// Shorthand for a less-or-equal condition.
    pub fn lte(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.with(field, FilterOp::Lte, value)
    }

    /// Shorthand for a case-sensitive pattern condition.
    pub fn like(self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.with(field, FilterOp::Like, FilterValue::String(pattern.into()))
    }

    /// Shorthand for a case-insensitive pattern condition.
    pub fn ilike(self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.with(field, FilterOp::ILike, FilterValue::String(pattern.into()))
    }

    /// Conditions in insertion order.
    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    /// Whether the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Parse a JSON filter document given as a string.
    pub fn from_json_str(source: &str, mode: FilterMode) -> AppResult<Self> {
        let value: Value = serde_json::from_str(source)
            .map_err(|e| AppError::validation(format!("Filter is not valid JSON: {e}")))?;
        Self::from_json(&value, mode)
    }

    /// Parse a JSON filter document. `null` is the empty filter.
    pub fn from_json(value: &Value, mode: FilterMode) -> AppResult<Self> {
        let map = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(map) => map,
            other => {
                return Err(AppError::validation(format!(
                    "Filter must be a JSON object, got {other}"
                )));
            }
        };

        let mut filter = Self::new();
        for (field, value) in map {
            if let Some(condition) = parse_condition(field, value, mode)? {
                filter.push(condition);
            }
        }
        Ok(filter)
    }
}

fn parse_condition(field: &str, value: &Value, mode: FilterMode) -> AppResult<Option<FilterField>> {
    let Value::Object(operators) = value else {
        return match FilterValue::from_json(value) {
            Some(operand) => Ok(Some(FilterField::new(field, FilterOp::Eq, operand))),
            None => malformed(mode, field, "equality operand must be a scalar"),
        };
    };

    let Some((key, operand)) = operators.iter().next() else {
        return malformed(mode, field, "operator object is empty");
    };
    if operators.len() > 1 {
        if mode == FilterMode::Strict {
            return Err(malformed_error(field, "operator object has more than one key"));
        }
        warn!(field = %field, honored = %key, "Extra filter operator keys ignored");
    }

    let Some(op) = FilterOp::from_operator_key(key) else {
        return malformed(mode, field, &format!("unknown operator '{key}'"));
    };
    match FilterValue::from_json(operand) {
        Some(operand) => Ok(Some(FilterField::new(field, op, operand))),
        None => malformed(mode, field, "operand must be a scalar"),
    }
}

fn malformed(mode: FilterMode, field: &str, reason: &str) -> AppResult<Option<FilterField>> {
    match mode {
        FilterMode::Strict => Err(malformed_error(field, reason)),
        FilterMode::Permissive => {
            warn!(field = %field, reason = %reason, "Filter condition ignored");
            Ok(None)
        }
    }
}

fn malformed_error(field: &str, reason: &str) -> AppError {
    AppError::validation(format!("Malformed filter on '{field}': {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_is_equality() {
        let filter = Filter::from_json(&json!({"estado": "activo"}), FilterMode::Permissive)
            .expect("parse");
        assert_eq!(filter.fields(), &[FilterField::new("estado", FilterOp::Eq, "activo")]);
    }

    #[test]
    fn test_every_operator_key() {
        let doc = json!({
            "a": {"$gt": 1},
            "b": {"$gte": 2},
            "c": {"$lt": 3},
            "d": {"$lte": 4.5},
            "e": {"$like": "%x%"},
            "f": {"$ilike": "%Y%"},
        });
        let filter = Filter::from_json(&doc, FilterMode::Strict).expect("parse");
        let ops: Vec<FilterOp> = filter.fields().iter().map(|f| f.op).collect();
        assert_eq!(
            ops,
            vec![
                FilterOp::Gt,
                FilterOp::Gte,
                FilterOp::Lt,
                FilterOp::Lte,
                FilterOp::Like,
                FilterOp::ILike
            ]
        );
        assert_eq!(filter.fields()[3].value, FilterValue::Float(4.5));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let filter = Filter::from_json_str(
            r#"{"zeta": 1, "alpha": 2, "mid": {"$lt": 3}}"#,
            FilterMode::Permissive,
        )
        .expect("parse");
        let names: Vec<&str> = filter.fields().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    // Ambiguous operator objects: permissive honors the first key and
    // drops unknown operators; strict rejects both.
    #[test]
    fn test_multi_key_operator_object() {
        let doc = json!({"edad": {"$gte": 18, "$lt": 65}});
        let permissive = Filter::from_json(&doc, FilterMode::Permissive).expect("parse");
        assert_eq!(permissive.fields(), &[FilterField::new("edad", FilterOp::Gte, 18)]);

        let strict = Filter::from_json(&doc, FilterMode::Strict).unwrap_err();
        assert_eq!(strict.kind, crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_unknown_operator() {
        let doc = json!({"edad": {"$between": [1, 2]}, "nombre": "Ana"});
        let permissive = Filter::from_json(&doc, FilterMode::Permissive).expect("parse");
        assert_eq!(permissive.fields(), &[FilterField::new("nombre", FilterOp::Eq, "Ana")]);

        assert!(Filter::from_json(&doc, FilterMode::Strict).is_err());
    }

    #[test]
    fn test_non_object_document_rejected() {
        assert!(Filter::from_json(&json!([1, 2]), FilterMode::Permissive).is_err());
        assert!(Filter::from_json_str("not json", FilterMode::Permissive).is_err());
        assert!(Filter::from_json(&Value::Null, FilterMode::Strict)
            .expect("null")
            .is_empty());
    }

    #[test]
    fn test_builder_matches_parsed() {
        let built = Filter::new().eq("estado", "activo").gte("edad", 18);
        let parsed = Filter::from_json(
            &json!({"estado": "activo", "edad": {"$gte": 18}}),
            FilterMode::Strict,
        )
        .expect("parse");
        assert_eq!(built, parsed);
    }
}
