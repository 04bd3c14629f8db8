//! Use cases over a configured generic table.

use std::sync::Arc;

use tracing::{info, warn};

use registro_core::error::AppError;
use registro_core::result::AppResult;
use registro_core::traits::repository::SoftDelete;
use registro_core::types::{Filter, PageWindow, RecordId, Row};
use registro_database::repositories::TableRepository;

/// Orchestrates row operations on one table.
#[derive(Debug)]
pub struct RecordService<R = TableRepository> {
    table: String,
    repo: Arc<R>,
}

impl<R> Clone for RecordService<R> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> RecordService<R>
where
    R: SoftDelete<Row, Draft = Row, Changes = Row>,
{
    /// Creates a new record service for `table`.
    pub fn new(table: impl Into<String>, repo: Arc<R>) -> Self {
        Self {
            table: table.into(),
            repo,
        }
    }

    /// Table served by this service.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Insert a row.
    pub async fn create(&self, data: Row) -> AppResult<Row> {
        let row = self.repo.create(&data).await?;
        info!(table = %self.table, "Record created");
        Ok(row)
    }

    /// Fetch a row by id.
    pub async fn get(&self, id: &RecordId) -> AppResult<Row> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    /// List rows matching `filter` in `window`.
    pub async fn list(&self, window: &PageWindow, filter: &Filter) -> AppResult<Vec<Row>> {
        self.repo.find_all(window, filter).await
    }

    /// Update the given columns of an existing row.
    pub async fn update(&self, id: &RecordId, data: Row) -> AppResult<Row> {
        self.get(id).await?;
        let row = self
            .repo
            .update(id, &data)
            .await?
            .ok_or_else(|| self.not_found(id))?;
        info!(table = %self.table, id = %id, "Record updated");
        Ok(row)
    }

    /// Hard-delete an existing row. `false` means it vanished after the
    /// existence check.
    pub async fn delete(&self, id: &RecordId) -> AppResult<bool> {
        self.get(id).await?;
        let deleted = self.repo.delete(id).await?;
        if !deleted {
            warn!(table = %self.table, id = %id, "Record disappeared before delete");
        }
        Ok(deleted)
    }

    /// Mark an existing row inactive.
    pub async fn deactivate(&self, id: &RecordId) -> AppResult<Row> {
        self.get(id).await?;
        let row = self
            .repo
            .deactivate(id)
            .await?
            .ok_or_else(|| self.not_found(id))?;
        info!(table = %self.table, id = %id, "Record deactivated");
        Ok(row)
    }

    /// Count rows matching `filter`.
    pub async fn count(&self, filter: &Filter) -> AppResult<u64> {
        self.repo.count(filter).await
    }

    fn not_found(&self, id: &RecordId) -> AppError {
        AppError::not_found(format!("Record {id} not found in '{}'", self.table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registro_core::error::ErrorKind;
    use registro_core::types::TableProfile;
    use registro_database::store::MemoryStoreProvider;
    use serde_json::{Value, json};

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => Row::new(),
        }
    }

    fn service(profile: TableProfile) -> RecordService {
        let store = Arc::new(MemoryStoreProvider::new());
        let repo = TableRepository::new(store, "clientes", profile);
        RecordService::new("clientes", Arc::new(repo))
    }

    #[tokio::test]
    async fn test_crud_round() {
        let service = service(TableProfile::audited());
        let created = service
            .create(row(json!({"nombre": "Eva", "estado": "activo"})))
            .await
            .expect("create");
        let id = RecordId::from_json(&created["id"]).expect("id");

        let fetched = service.get(&id).await.expect("get");
        assert_eq!(fetched["nombre"], json!("Eva"));

        let updated = service
            .update(&id, row(json!({"nombre": "Eva María"})))
            .await
            .expect("update");
        assert_eq!(updated["nombre"], json!("Eva María"));
        assert_eq!(updated["estado"], json!("activo"));

        let inactive = service.deactivate(&id).await.expect("deactivate");
        assert_eq!(inactive["estado"], json!("inactivo"));
        assert_eq!(service.count(&Filter::new()).await.expect("count"), 1);

        assert!(service.delete(&id).await.expect("delete"));
        assert_eq!(service.count(&Filter::new()).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_existence_gates_leave_table_unchanged() {
        let service = service(TableProfile::audited());
        service
            .create(row(json!({"nombre": "Eva", "estado": "activo"})))
            .await
            .expect("create");
        let ghost = RecordId::from(404);

        for err in [
            service.get(&ghost).await.unwrap_err(),
            service.update(&ghost, Row::new()).await.unwrap_err(),
            service.delete(&ghost).await.unwrap_err(),
            service.deactivate(&ghost).await.unwrap_err(),
        ] {
            assert!(err.is(ErrorKind::NotFound));
        }
        assert_eq!(service.count(&Filter::new()).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_list_with_filter_and_window() {
        let service = service(TableProfile::default());
        for edad in [17, 18, 19, 20] {
            service
                .create(row(json!({"edad": edad})))
                .await
                .expect("create");
        }
        let filter = Filter::new().gte("edad", 18);
        let page = service
            .list(&PageWindow::new(0, 2).expect("window"), &filter)
            .await
            .expect("list");
        let ages: Vec<&Value> = page.iter().map(|r| &r["edad"]).collect();
        assert_eq!(ages, vec![&json!(18), &json!(19)]);
        assert_eq!(service.count(&filter).await.expect("count"), 3);
    }
}
