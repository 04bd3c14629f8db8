//! Per-table behavior of the generic repository.

use serde::{Deserialize, Serialize};

use super::sorting::SortField;

/// Timestamp columns maintained by the repository on writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditColumns {
    /// Column stamped on insert.
    pub created: String,
    /// Column stamped on insert and on every update.
    pub updated: String,
}

/// Status column toggled by soft delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusColumn {
    /// Column name.
    pub column: String,
    /// Value written on insert when the row does not set the column.
    pub active: String,
    /// Value written by `deactivate`.
    pub inactive: String,
}

/// How a table is ordered, audited and soft-deleted.
///
/// The plain profile (the default) has no ordering, no audit stamps and no
/// status column, so `deactivate` is rejected on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableProfile {
    /// Default ordering for list queries.
    #[serde(default)]
    pub order: Option<SortField>,
    /// Audit timestamp columns.
    #[serde(default)]
    pub audit: Option<AuditColumns>,
    /// Soft-delete status column.
    #[serde(default)]
    pub status: Option<StatusColumn>,
}

impl TableProfile {
    /// The conventional audited profile: newest `id` first, `fecha_creado` /
    /// `fecha_edit` stamps, and `estado` toggled between `activo` and
    /// `inactivo`.
    pub fn audited() -> Self {
        Self {
            order: Some(SortField::desc("id")),
            audit: Some(AuditColumns {
                created: "fecha_creado".to_string(),
                updated: "fecha_edit".to_string(),
            }),
            status: Some(StatusColumn {
                column: "estado".to_string(),
                active: "activo".to_string(),
                inactive: "inactivo".to_string(),
            }),
        }
    }
}
