//! Persona repository implementation.

use std::sync::Arc;

use async_trait::async_trait;

use registro_core::result::AppResult;
use registro_core::traits::StoreProvider;
use registro_core::traits::repository::Repository;
use registro_core::types::{Filter, PageWindow, RecordId};
use registro_entity::persona::{NewPersona, PERSONAS_TABLE, Persona};

use super::table::TableRepository;

/// Repository for persona CRUD and lookups.
#[derive(Debug, Clone)]
pub struct PersonaRepository {
    rows: TableRepository<Persona>,
}

impl PersonaRepository {
    /// Create a persona repository on the `personas` table.
    pub fn new(store: Arc<dyn StoreProvider>) -> Self {
        Self {
            rows: TableRepository::plain(store, PERSONAS_TABLE),
        }
    }
}

#[async_trait]
impl Repository<Persona> for PersonaRepository {
    type Draft = NewPersona;
    type Changes = Persona;

    async fn create(&self, draft: &NewPersona) -> AppResult<Persona> {
        self.rows.create(&draft.to_row()).await
    }

    async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<Persona>> {
        self.rows.find_by_id(id).await
    }

    async fn find_all(&self, window: &PageWindow, filter: &Filter) -> AppResult<Vec<Persona>> {
        self.rows.find_all(window, filter).await
    }

    async fn update(&self, id: &RecordId, persona: &Persona) -> AppResult<Option<Persona>> {
        self.rows.update(id, &persona.to_row()).await
    }

    async fn delete(&self, id: &RecordId) -> AppResult<bool> {
        self.rows.delete(id).await
    }

    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        self.rows.count(filter).await
    }
}
