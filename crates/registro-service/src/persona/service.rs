//! Persona use cases: email uniqueness on create, existence checks on
//! update and delete.

use std::sync::Arc;

use tracing::{info, warn};

use registro_core::error::AppError;
use registro_core::result::AppResult;
use registro_core::traits::repository::Repository;
use registro_core::types::{Filter, PageWindow, RecordId};
use registro_database::repositories::PersonaRepository;
use registro_entity::persona::{NewPersona, Persona, PersonaPatch};

/// Orchestrates persona operations over a repository.
///
/// Existence probes and the writes they guard are separate round-trips;
/// a row deleted between the two is reported by the write itself.
#[derive(Debug)]
pub struct PersonaService<R = PersonaRepository> {
    repo: Arc<R>,
}

impl<R> Clone for PersonaService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> PersonaService<R>
where
    R: Repository<Persona, Draft = NewPersona, Changes = Persona>,
{
    /// Creates a new persona service.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a persona unless one with the same email exists.
    pub async fn create(&self, draft: NewPersona) -> AppResult<Persona> {
        if self.get_by_email(&draft.email).await?.is_some() {
            warn!(email = %draft.email, "Rejected duplicate persona email");
            return Err(AppError::duplicate_key(format!(
                "A persona with email '{}' already exists",
                draft.email
            )));
        }

        let persona = self.repo.create(&draft).await?;
        info!(id = ?persona.id, email = %persona.email, "Persona created");
        Ok(persona)
    }

    /// Fetch a persona by id.
    pub async fn get(&self, id: &RecordId) -> AppResult<Persona> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// List personas in `window`.
    pub async fn list(&self, window: &PageWindow) -> AppResult<Vec<Persona>> {
        self.repo.find_all(window, &Filter::new()).await
    }

    /// Merge `patch` over the stored persona and write the result.
    pub async fn update(&self, id: &RecordId, patch: PersonaPatch) -> AppResult<Persona> {
        let current = self.get(id).await?;
        let merged = patch.apply_to(&current);

        let updated = self
            .repo
            .update(id, &merged)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(id = %id, "Persona updated");
        Ok(updated)
    }

    /// Delete a persona. `false` means it vanished after the existence
    /// check.
    pub async fn delete(&self, id: &RecordId) -> AppResult<bool> {
        self.get(id).await?;
        let deleted = self.repo.delete(id).await?;
        if deleted {
            info!(id = %id, "Persona deleted");
        } else {
            warn!(id = %id, "Persona disappeared before delete");
        }
        Ok(deleted)
    }

    /// Find a persona by exact email.
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Persona>> {
        self.repo.find_one(&Filter::new().eq("email", email)).await
    }
}

fn not_found(id: &RecordId) -> AppError {
    AppError::not_found(format!("Persona {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use registro_core::error::ErrorKind;
    use registro_database::store::MemoryStoreProvider;

    fn service() -> (PersonaService, Arc<MemoryStoreProvider>) {
        let store = Arc::new(MemoryStoreProvider::new());
        let repo = PersonaRepository::new(store.clone());
        (PersonaService::new(Arc::new(repo)), store)
    }

    fn draft(email: &str, edad: i32) -> NewPersona {
        NewPersona {
            nombre: "Ana".into(),
            apellido: "Pérez".into(),
            email: email.into(),
            edad,
            telefono: Some("555-0100".into()),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_before_write() {
        let (service, store) = service();
        service.create(draft("ana@example.com", 30)).await.expect("create");

        let err = service
            .create(draft("ana@example.com", 41))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::DuplicateKey));
        assert_eq!(store.row_count("personas").await, 1);
    }

    #[tokio::test]
    async fn test_missing_targets_are_not_found() {
        let (service, store) = service();
        service.create(draft("ana@example.com", 30)).await.expect("create");
        let ghost = RecordId::new("ghost");

        assert!(service.get(&ghost).await.unwrap_err().is(ErrorKind::NotFound));
        let patch = PersonaPatch {
            edad: Some(99),
            ..PersonaPatch::default()
        };
        assert!(service.update(&ghost, patch).await.unwrap_err().is(ErrorKind::NotFound));
        assert!(service.delete(&ghost).await.unwrap_err().is(ErrorKind::NotFound));
        assert_eq!(store.row_count("personas").await, 1);
    }

    #[tokio::test]
    async fn test_merge_update_is_idempotent() {
        let (service, _) = service();
        let created = service.create(draft("ana@example.com", 30)).await.expect("create");
        let id = created.id.clone().expect("id");
        let patch = PersonaPatch {
            edad: Some(31),
            ..PersonaPatch::default()
        };

        let once = service.update(&id, patch.clone()).await.expect("update");
        let twice = service.update(&id, patch).await.expect("update");
        assert_eq!(once.edad, 31);
        assert_eq!(twice.edad, 31);
        assert_eq!(twice.nombre, created.nombre);
        assert_eq!(twice.telefono, created.telefono);
        assert_eq!(twice.id, created.id);
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let (service, _) = service();
        for (email, edad) in [("a@x.com", 17), ("b@x.com", 18), ("c@x.com", 19)] {
            service.create(draft(email, edad)).await.expect("create");
        }
        let page = service
            .list(&PageWindow::new(1, 5).expect("window"))
            .await
            .expect("list");
        assert_eq!(page.len(), 2);

        let target = page[0].id.clone().expect("id");
        assert!(service.delete(&target).await.expect("delete"));
        assert_eq!(service.list(&PageWindow::default()).await.expect("list").len(), 2);
        assert!(service.get_by_email("b@x.com").await.expect("lookup").is_none());
    }

    /// Deletes the row right after every successful probe, as a concurrent
    /// client would.
    struct VanishingRepository(PersonaRepository);

    #[async_trait]
    impl Repository<Persona> for VanishingRepository {
        type Draft = NewPersona;
        type Changes = Persona;

        async fn create(&self, draft: &NewPersona) -> AppResult<Persona> {
            self.0.create(draft).await
        }

        async fn find_by_id(&self, id: &RecordId) -> AppResult<Option<Persona>> {
            let found = self.0.find_by_id(id).await?;
            self.0.delete(id).await?;
            Ok(found)
        }

        async fn find_all(&self, window: &PageWindow, filter: &Filter) -> AppResult<Vec<Persona>> {
            self.0.find_all(window, filter).await
        }

        async fn update(&self, id: &RecordId, persona: &Persona) -> AppResult<Option<Persona>> {
            self.0.update(id, persona).await
        }

        async fn delete(&self, id: &RecordId) -> AppResult<bool> {
            self.0.delete(id).await
        }

        async fn count(&self, filter: &Filter) -> AppResult<u64> {
            self.0.count(filter).await
        }
    }

    #[tokio::test]
    async fn test_row_vanishing_between_probe_and_write() {
        let store = Arc::new(MemoryStoreProvider::new());
        let service = PersonaService::new(Arc::new(VanishingRepository(PersonaRepository::new(
            store.clone(),
        ))));

        let first = service.create(draft("a@x.com", 20)).await.expect("create");
        let deleted = service
            .delete(first.id.as_ref().expect("id"))
            .await
            .expect("delete");
        assert!(!deleted);

        let second = service.create(draft("b@x.com", 20)).await.expect("create");
        let patch = PersonaPatch {
            edad: Some(21),
            ..PersonaPatch::default()
        };
        let err = service
            .update(second.id.as_ref().expect("id"), patch)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        assert_eq!(store.row_count("personas").await, 0);
    }
}
