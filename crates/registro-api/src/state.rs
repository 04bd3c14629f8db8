//! Application state shared across all handlers and middleware.

use std::collections::HashMap;
use std::sync::Arc;

use registro_core::config::AppConfig;
use registro_core::error::AppError;
use registro_core::result::AppResult;
use registro_core::traits::StoreProvider;
use registro_core::types::FilterMode;
use registro_database::StoreManager;
use registro_database::repositories::{PersonaRepository, TableRepository};
use registro_entity::persona::PERSONAS_TABLE;
use registro_service::{PersonaService, RecordService};

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Store used by every repository.
    pub store: StoreManager,
    /// Persona use cases.
    pub personas: PersonaService,
    /// Generic table use cases keyed by table name.
    pub records: Arc<HashMap<String, RecordService>>,
}

impl AppState {
    /// Wire repositories and services over `store`.
    pub fn new(config: AppConfig, store: StoreManager) -> AppResult<Self> {
        let provider = store.provider();
        let personas = PersonaService::new(Arc::new(PersonaRepository::new(provider.clone())));

        let mut records = HashMap::new();
        for resource in &config.resources {
            if resource.table == PERSONAS_TABLE {
                return Err(AppError::configuration(format!(
                    "Table '{PERSONAS_TABLE}' is served by the persona endpoints"
                )));
            }
            let repo = TableRepository::new(
                provider.clone(),
                resource.table.clone(),
                resource.profile.clone(),
            );
            records.insert(
                resource.table.clone(),
                RecordService::new(resource.table.clone(), Arc::new(repo)),
            );
        }

        tracing::info!(
            store = store.name(),
            resources = records.len(),
            "Application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            store,
            personas,
            records: Arc::new(records),
        })
    }

    /// Service for a configured table.
    pub fn records(&self, table: &str) -> AppResult<&RecordService> {
        self.records
            .get(table)
            .ok_or_else(|| AppError::not_found(format!("Unknown resource '{table}'")))
    }

    /// How query-string filters are parsed.
    pub fn filter_mode(&self) -> FilterMode {
        if self.config.server.strict_filters {
            FilterMode::Strict
        } else {
            FilterMode::Permissive
        }
    }
}
