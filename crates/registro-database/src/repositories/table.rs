//! Generic repository over a named table.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use registro_core::error::AppError;
use registro_core::result::AppResult;
use registro_core::traits::repository::{Repository, SoftDelete};
use registro_core::traits::{Record, StoreProvider};
use registro_core::types::{Filter, PageWindow, Query, RecordId, Row, TableProfile};

use crate::filter::apply_filter;

/// CRUD over one table, yielding rows converted into `T`.
///
/// `T` defaults to the raw [`Row`]; a typed entity validates each row at
/// conversion time. The [`TableProfile`] adds ordering, audit stamps and
/// the status column used by [`SoftDelete::deactivate`].
pub struct TableRepository<T = Row> {
    store: Arc<dyn StoreProvider>,
    table: String,
    profile: TableProfile,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> TableRepository<T> {
    /// Create a repository for `table` with the given profile.
    pub fn new(store: Arc<dyn StoreProvider>, table: impl Into<String>, profile: TableProfile) -> Self {
        Self {
            store,
            table: table.into(),
            profile,
            _record: PhantomData,
        }
    }

    /// Create a repository for `table` with the plain profile.
    pub fn plain(store: Arc<dyn StoreProvider>, table: impl Into<String>) -> Self {
        Self::new(store, table, TableProfile::default())
    }

    /// Table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Table profile.
    pub fn profile(&self) -> &TableProfile {
        &self.profile
    }

    fn by_id(&self, query: Query, id: &RecordId) -> Query {
        query.eq("id", id)
    }

    fn convert(rows: Vec<Row>) -> AppResult<Vec<T>> {
        rows.into_iter().map(T::from_row).collect()
    }

    fn first(rows: Vec<Row>) -> AppResult<Option<T>> {
        rows.into_iter().next().map(T::from_row).transpose()
    }

    /// Drop an `id` that names the target row; reject one that would
    /// re-key it.
    fn pin_id(&self, id: &RecordId, changes: &mut Row) -> AppResult<()> {
        if let Some(value) = changes.remove("id") {
            if RecordId::from_json(&value).as_ref() != Some(id) {
                return Err(AppError::validation(format!(
                    "Column 'id' of '{}' cannot be changed (row {id})",
                    self.table
                )));
            }
        }
        Ok(())
    }

    fn stamp_update(&self, changes: &mut Row) {
        if let Some(audit) = &self.profile.audit {
            changes.insert(audit.updated.clone(), now());
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for TableRepository<T> {
    type Draft = Row;
    type Changes = Row;

    async fn create(&self, draft: &Row) -> AppResult<T> {
        let mut row = draft.clone();
        if let Some(audit) = &self.profile.audit {
            let stamp = now();
            row.entry(audit.created.clone()).or_insert_with(|| stamp.clone());
            row.entry(audit.updated.clone()).or_insert(stamp);
        }
        if let Some(status) = &self.profile.status {
            row.entry(status.column.clone())
                .or_insert_with(|| Value::from(status.active.as_str()));
        }

        let response = self.store.execute(Query::insert(&self.table, row)).await?;
        let created = Self::first(response.rows)?
            .ok_or_else(|| AppError::store(format!("Insert into '{}' returned no row", self.table)))?;
        info!(table = %self.table, "Row created");
        Ok(created)
    }

    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<T>> {
        let query = self.by_id(Query::select(&self.table), id).range(0, 0);
        let response = self.store.execute(query).await?;
        Self::first(response.rows)
    }

    async fn find_all(&self, window: &PageWindow, filter: &Filter) -> AppResult<Vec<T>> {
        let mut query = apply_filter(Query::select(&self.table), filter);
        if let Some(order) = &self.profile.order {
            query = query.order(order.clone());
        }
        if !window.is_unbounded() {
            let (from, to) = window.range();
            query = query.range(from, to);
        }
        debug!(
            table = %self.table,
            skip = window.skip(),
            limit = window.limit(),
            conditions = filter.len(),
            "Listing rows"
        );
        let response = self.store.execute(query).await?;
        Self::convert(response.rows)
    }

    async fn update(&self, id: &RecordId, changes: &Row) -> AppResult<Option<T>> {
        let mut changes = changes.clone();
        self.pin_id(id, &mut changes)?;
        self.stamp_update(&mut changes);
        let query = self.by_id(Query::update(&self.table, changes), id);
        let response = self.store.execute(query).await?;
        let updated = Self::first(response.rows)?;
        if updated.is_some() {
            info!(table = %self.table, id = %id, "Row updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: &RecordId) -> AppResult<bool> {
        let query = self.by_id(Query::delete(&self.table), id);
        let response = self.store.execute(query).await?;
        let deleted = !response.rows.is_empty();
        if deleted {
            info!(table = %self.table, id = %id, "Row deleted");
        }
        Ok(deleted)
    }

    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        let query = apply_filter(Query::select(&self.table), filter)
            .count_exact()
            .head();
        let response = self.store.execute(query).await?;
        response.count.ok_or_else(|| {
            AppError::store(format!("Store returned no count for '{}'", self.table))
        })
    }
}

#[async_trait]
impl<T: Record> SoftDelete<T> for TableRepository<T> {
    async fn deactivate(&self, id: &RecordId) -> AppResult<Option<T>> {
        let status = self.profile.status.as_ref().ok_or_else(|| {
            AppError::validation(format!("Table '{}' has no status column", self.table))
        })?;

        let mut changes = Row::new();
        changes.insert(status.column.clone(), Value::from(status.inactive.as_str()));
        self.stamp_update(&mut changes);

        let query = self.by_id(Query::update(&self.table, changes), id);
        let response = self.store.execute(query).await?;
        let deactivated = Self::first(response.rows)?;
        if deactivated.is_some() {
            info!(table = %self.table, id = %id, "Row deactivated");
        }
        Ok(deactivated)
    }
}

impl<T> Clone for TableRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            table: self.table.clone(),
            profile: self.profile.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TableRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRepository")
            .field("store", &self.store.name())
            .field("table", &self.table)
            .field("profile", &self.profile)
            .finish()
    }
}

fn now() -> Value {
    Value::String(Utc::now().to_rfc3339())
}
