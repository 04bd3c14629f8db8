//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use registro_entity::persona::Persona;

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Persona as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaResponse {
    pub id: Option<String>,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub edad: i32,
    pub telefono: Option<String>,
    pub nombre_completo: String,
    pub es_mayor_de_edad: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Persona> for PersonaResponse {
    fn from(p: Persona) -> Self {
        Self {
            id: p.id.as_ref().map(|id| id.to_string()),
            nombre_completo: p.full_name(),
            es_mayor_de_edad: p.is_adult(),
            nombre: p.nombre,
            apellido: p.apellido,
            email: p.email,
            edad: p.edad,
            telefono: p.telefono,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Basic health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Row count of a generic table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}
