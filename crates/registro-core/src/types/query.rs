//! Store-agnostic description of a single table operation.
//!
//! A [`Query`] is what repositories hand to a
//! [`StoreProvider`](crate::traits::store::StoreProvider): one table, one
//! action, an AND-ed predicate list and optional ordering, row range and
//! count mode. Providers translate it into their own wire format.

use serde::Serialize;
use serde_json::{Map, Value};

use super::filter::{FilterField, FilterOp, FilterValue};
use super::sorting::SortField;

/// A raw row: column name to JSON value, in column order.
pub type Row = Map<String, Value>;

/// What the query does to the matched rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "payload")]
pub enum QueryAction {
    /// Read matching rows.
    Select,
    /// Insert rows and return their stored representation.
    Insert(Vec<Row>),
    /// Update matching rows with the given columns and return them.
    Update(Row),
    /// Delete matching rows and return them.
    Delete,
}

/// A single table operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    /// Target table.
    pub table: String,
    /// Operation to perform.
    pub action: QueryAction,
    /// Column selection (`*` for all).
    pub columns: String,
    /// Conditions AND-ed together.
    pub predicates: Vec<FilterField>,
    /// Ordering of returned rows.
    pub order: Option<SortField>,
    /// Inclusive row range.
    pub range: Option<(u64, u64)>,
    /// Request an exact count of matching rows.
    pub count: bool,
    /// Return only the count, no rows.
    pub head: bool,
}

impl Query {
    fn new(table: impl Into<String>, action: QueryAction) -> Self {
        Self {
            table: table.into(),
            action,
            columns: "*".to_string(),
            predicates: Vec::new(),
            order: None,
            range: None,
            count: false,
            head: false,
        }
    }

    /// Select all columns from `table`.
    pub fn select(table: impl Into<String>) -> Self {
        Self::new(table, QueryAction::Select)
    }

    /// Insert a single row into `table`.
    pub fn insert(table: impl Into<String>, row: Row) -> Self {
        Self::new(table, QueryAction::Insert(vec![row]))
    }

    /// Update rows of `table` with the given columns.
    pub fn update(table: impl Into<String>, changes: Row) -> Self {
        Self::new(table, QueryAction::Update(changes))
    }

    /// Delete rows of `table`.
    pub fn delete(table: impl Into<String>) -> Self {
        Self::new(table, QueryAction::Delete)
    }

    /// Add a predicate.
    pub fn filter(mut self, predicate: FilterField) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// `column = value`
    pub fn eq(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(FilterField::new(column, FilterOp::Eq, value))
    }

    /// `column > value`
    pub fn gt(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(FilterField::new(column, FilterOp::Gt, value))
    }

    /// `column >= value`
    pub fn gte(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(FilterField::new(column, FilterOp::Gte, value))
    }

    /// `column < value`
    pub fn lt(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(FilterField::new(column, FilterOp::Lt, value))
    }

    /// `column <= value`
    pub fn lte(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(FilterField::new(column, FilterOp::Lte, value))
    }

    /// `column LIKE pattern`
    pub fn like(self, column: impl Into<String>, pattern: impl Into<FilterValue>) -> Self {
        self.filter(FilterField::new(column, FilterOp::Like, pattern))
    }

    /// `column ILIKE pattern`
    pub fn ilike(self, column: impl Into<String>, pattern: impl Into<FilterValue>) -> Self {
        self.filter(FilterField::new(column, FilterOp::ILike, pattern))
    }

    /// `column IS NULL`
    pub fn is_null(self, column: impl Into<String>) -> Self {
        self.filter(FilterField::new(column, FilterOp::Eq, FilterValue::Null))
    }

    /// Order the returned rows.
    pub fn order(mut self, order: SortField) -> Self {
        self.order = Some(order);
        self
    }

    /// Limit to the inclusive row range `from..=to`.
    pub fn range(mut self, from: u64, to: u64) -> Self {
        self.range = Some((from, to));
        self
    }

    /// Ask for an exact count of matching rows.
    pub fn count_exact(mut self) -> Self {
        self.count = true;
        self
    }

    /// Return the count only.
    pub fn head(mut self) -> Self {
        self.head = true;
        self
    }

    /// Whether the action writes to the table.
    pub fn is_mutation(&self) -> bool {
        !matches!(self.action, QueryAction::Select)
    }
}

/// Result of executing a [`Query`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    /// Returned rows (empty for head queries).
    pub rows: Vec<Row>,
    /// Exact count when requested.
    pub count: Option<u64>,
}

impl QueryResponse {
    /// A response carrying rows only.
    pub fn rows(rows: Vec<Row>) -> Self {
        Self { rows, count: None }
    }
}
