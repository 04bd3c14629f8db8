//! Partial persona updates.

use serde::{Deserialize, Deserializer, Serialize};

use super::model::Persona;

/// Fields to change on an existing persona. Absent fields stay as they
/// are; `telefono: null` clears the phone number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaPatch {
    /// New given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    /// New family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    /// New email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edad: Option<i32>,
    /// `Some(None)` clears the phone number.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub telefono: Option<Option<String>>,
}

impl PersonaPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.apellido.is_none()
            && self.email.is_none()
            && self.edad.is_none()
            && self.telefono.is_none()
    }

    /// Merge the patch over `current`. Identifier and timestamps are kept.
    pub fn apply_to(&self, current: &Persona) -> Persona {
        let mut merged = current.clone();
        if let Some(nombre) = &self.nombre {
            merged.nombre = nombre.clone();
        }
        if let Some(apellido) = &self.apellido {
            merged.apellido = apellido.clone();
        }
        if let Some(email) = &self.email {
            merged.email = email.clone();
        }
        if let Some(edad) = self.edad {
            merged.edad = edad;
        }
        if let Some(telefono) = &self.telefono {
            merged.telefono = telefono.clone();
        }
        merged
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field
/// (`None`, via `#[serde(default)]`).
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
