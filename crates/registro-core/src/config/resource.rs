//! Generic table resources exposed through the parameterized repository.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::profile::TableProfile;

/// A table served by the generic CRUD endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Table name in the store; also the route segment.
    pub table: String,
    /// Ordering, audit columns and soft-delete status column.
    #[serde(default)]
    pub profile: TableProfile,
}

impl ResourceConfig {
    /// Create a resource with the plain profile.
    pub fn plain(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            profile: TableProfile::default(),
        }
    }

    /// Reject table names that are not plain identifiers.
    pub fn validate(&self) -> Result<(), AppError> {
        let valid = !self.table.is_empty()
            && self
                .table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(AppError::configuration(format!(
                "Invalid resource table name: '{}'",
                self.table
            )));
        }
        Ok(())
    }
}

pub(crate) fn default_resources() -> Vec<ResourceConfig> {
    vec![
        ResourceConfig::plain("productos"),
        ResourceConfig::plain("clientes"),
    ]
}
