//! Generic repository traits for table access.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::filter::Filter;
use crate::types::id::RecordId;
use crate::types::pagination::PageWindow;

/// Generic CRUD repository trait.
///
/// Implementations report absence as `None` / `false` and never raise
/// not-found errors; existence rules belong to the service layer. Each
/// method is a single store round-trip.
#[async_trait]
pub trait Repository<Entity>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
{
    /// Payload accepted by `create`.
    type Draft: Send + Sync;
    /// Payload accepted by `update`.
    type Changes: Send + Sync;

    /// Insert a new entity and return it with store-assigned fields.
    async fn create(&self, draft: &Self::Draft) -> AppResult<Entity>;

    /// Find an entity by its identifier.
    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<Entity>>;

    /// List entities matching `filter` within `window`.
    async fn find_all(&self, window: &PageWindow, filter: &Filter) -> AppResult<Vec<Entity>>;

    /// Update an entity; `None` when no row matched.
    async fn update(&self, id: &RecordId, changes: &Self::Changes) -> AppResult<Option<Entity>>;

    /// Delete an entity. Returns `true` if at least one row was removed.
    async fn delete(&self, id: &RecordId) -> AppResult<bool>;

    /// Count entities matching `filter`, ignoring pagination.
    async fn count(&self, filter: &Filter) -> AppResult<u64>;

    /// First entity matching `filter`.
    async fn find_one(&self, filter: &Filter) -> AppResult<Option<Entity>> {
        let mut rows = self.find_all(&PageWindow::one(), filter).await?;
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }
}

/// Repositories whose rows can be marked inactive instead of removed.
#[async_trait]
pub trait SoftDelete<Entity>: Repository<Entity>
where
    Entity: Send + Sync + 'static,
{
    /// Flip the status column to its inactive value; `None` when no row
    /// matched.
    async fn deactivate(&self, id: &RecordId) -> AppResult<Option<Entity>>;
}
