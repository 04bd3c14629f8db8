//! In-process store provider.
//!
//! Tables live in a `tokio` `RwLock`-guarded map and are created on first
//! insert. Predicates follow SQL semantics without coercion: a comparison
//! between a null cell or mismatched types never matches.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use registro_core::error::AppError;
use registro_core::result::AppResult;
use registro_core::traits::store::{StoreHealth, StoreProvider};
use registro_core::types::{
    FilterField, FilterOp, FilterValue, Query, QueryAction, QueryResponse, Row, SortDirection,
    SortField,
};

/// Store provider keeping every table in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreProvider {
    tables: Arc<RwLock<HashMap<String, Vec<Row>>>>,
}

impl MemoryStoreProvider {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held by `table`.
    pub async fn row_count(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }

    async fn select(&self, query: &Query) -> QueryResponse {
        let tables = self.tables.read().await;
        let mut rows: Vec<Row> = tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, &query.predicates))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let count = query.count.then_some(rows.len() as u64);
        if query.head {
            return QueryResponse {
                rows: Vec::new(),
                count,
            };
        }

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| order_rows(a, b, order));
        }
        if let Some((from, to)) = query.range {
            rows = window(rows, from, to);
        }
        QueryResponse { rows, count }
    }

    async fn insert(&self, table: &str, rows: &[Row]) -> AppResult<QueryResponse> {
        let mut tables = self.tables.write().await;
        let stored = tables.entry(table.to_string()).or_default();

        let mut inserted = Vec::with_capacity(rows.len());
        for row in rows {
            let mut row = row.clone();
            let now = Value::String(Utc::now().to_rfc3339());
            let id = row
                .entry("id")
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()))
                .clone();
            if id.is_null() || stored.iter().any(|r| r.get("id") == Some(&id)) {
                return Err(AppError::store(format!(
                    "duplicate key value violates unique constraint \"{table}_pkey\""
                )));
            }
            row.entry("created_at").or_insert_with(|| now.clone());
            row.entry("updated_at").or_insert(now);
            stored.push(row.clone());
            inserted.push(row);
        }
        Ok(QueryResponse::rows(inserted))
    }

    async fn update(&self, query: &Query, changes: &Row) -> AppResult<QueryResponse> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.get_mut(&query.table) else {
            return Ok(QueryResponse::default());
        };

        if let Some(new_id) = changes.get("id") {
            let targets = stored
                .iter()
                .filter(|row| matches_all(row, &query.predicates))
                .count();
            let collides = stored
                .iter()
                .any(|row| row.get("id") == Some(new_id) && !matches_all(row, &query.predicates));
            if new_id.is_null() || collides || targets > 1 {
                return Err(AppError::store(format!(
                    "duplicate key value violates unique constraint \"{}_pkey\"",
                    query.table
                )));
            }
        }

        let now = Value::String(Utc::now().to_rfc3339());
        let mut updated = Vec::new();
        for row in stored
            .iter_mut()
            .filter(|row| matches_all(row, &query.predicates))
        {
            for (column, value) in changes {
                row.insert(column.clone(), value.clone());
            }
            if !changes.contains_key("updated_at") {
                row.insert("updated_at".to_string(), now.clone());
            }
            updated.push(row.clone());
        }
        Ok(QueryResponse::rows(updated))
    }

    async fn delete(&self, query: &Query) -> QueryResponse {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.get_mut(&query.table) else {
            return QueryResponse::default();
        };

        let (removed, kept): (Vec<Row>, Vec<Row>) = stored
            .drain(..)
            .partition(|row| matches_all(row, &query.predicates));
        *stored = kept;
        QueryResponse::rows(removed)
    }
}

#[async_trait]
impl StoreProvider for MemoryStoreProvider {
    async fn execute(&self, query: Query) -> AppResult<QueryResponse> {
        debug!(table = %query.table, predicates = query.predicates.len(), "Memory store query");
        match &query.action {
            QueryAction::Select => Ok(self.select(&query).await),
            QueryAction::Insert(rows) => self.insert(&query.table, rows).await,
            QueryAction::Update(changes) => self.update(&query, changes).await,
            QueryAction::Delete => Ok(self.delete(&query).await),
        }
    }

    async fn health_check(&self, verify_auth: bool) -> AppResult<StoreHealth> {
        Ok(StoreHealth {
            connected: true,
            status_code: None,
            auth_ok: verify_auth.then_some(true),
            message: "In-memory store available".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

fn matches_all(row: &Row, predicates: &[FilterField]) -> bool {
    predicates.iter().all(|p| matches(row.get(&p.field), p))
}

fn matches(cell: Option<&Value>, predicate: &FilterField) -> bool {
    let cell = cell.unwrap_or(&Value::Null);
    let operand = &predicate.value;

    if *operand == FilterValue::Null {
        return predicate.op == FilterOp::Eq && cell.is_null();
    }
    match predicate.op {
        FilterOp::Like | FilterOp::ILike => match (cell, operand) {
            (Value::String(text), FilterValue::String(pattern)) => {
                like(text, pattern, predicate.op == FilterOp::ILike)
            }
            _ => false,
        },
        op => compare(cell, &operand.to_json()).is_some_and(|ordering| match op {
            FilterOp::Eq => ordering == Ordering::Equal,
            FilterOp::Gt => ordering == Ordering::Greater,
            FilterOp::Gte => ordering != Ordering::Less,
            FilterOp::Lt => ordering == Ordering::Less,
            FilterOp::Lte => ordering != Ordering::Greater,
            FilterOp::Like | FilterOp::ILike => false,
        }),
    }
}

/// Ordering between two JSON scalars of the same type; `None` otherwise.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Nulls sort last ascending and first descending.
fn order_rows(a: &Row, b: &Row, order: &SortField) -> Ordering {
    let a = a.get(&order.field).unwrap_or(&Value::Null);
    let b = b.get(&order.field).unwrap_or(&Value::Null);
    let ascending = match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => compare(a, b).unwrap_or(Ordering::Equal),
    };
    match order.direction {
        SortDirection::Asc => ascending,
        SortDirection::Desc => ascending.reverse(),
    }
}

fn window(rows: Vec<Row>, from: u64, to: u64) -> Vec<Row> {
    let skip = usize::try_from(from).unwrap_or(usize::MAX);
    let take = usize::try_from(to.saturating_sub(from).saturating_add(1)).unwrap_or(usize::MAX);
    rows.into_iter().skip(skip).take(take).collect()
}

/// SQL `LIKE`: `%` matches any run, `_` one character, `\` escapes.
fn like(text: &str, pattern: &str, case_insensitive: bool) -> bool {
    let fold = |s: &str| -> Vec<char> {
        if case_insensitive {
            s.to_lowercase().chars().collect()
        } else {
            s.chars().collect()
        }
    };
    like_tokens(&fold(text), &tokenize(&fold(pattern)))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LikeToken {
    AnyRun,
    AnyOne,
    Literal(char),
}

fn tokenize(pattern: &[char]) -> Vec<LikeToken> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.iter().copied();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::AnyRun,
            '_' => LikeToken::AnyOne,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            c => LikeToken::Literal(c),
        });
    }
    tokens
}

/// Greedy wildcard match: on mismatch, resume after the last `%` with one
/// more character consumed. Runs in O(text * pattern).
fn like_tokens(text: &[char], pattern: &[LikeToken]) -> bool {
    let (mut t, mut p) = (0, 0);
    let mut resume: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(LikeToken::AnyRun) => {
                resume = Some((p, t));
                p += 1;
            }
            Some(LikeToken::AnyOne) => {
                t += 1;
                p += 1;
            }
            Some(LikeToken::Literal(c)) if *c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match resume {
                Some((star, matched)) => {
                    p = star + 1;
                    t = matched + 1;
                    resume = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|token| *token == LikeToken::AnyRun)
}
