//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use registro_core::types::Row;
use registro_entity::persona::{NewPersona, PersonaPatch};

/// Create persona request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePersonaRequest {
    /// Given name.
    #[validate(length(min = 2, max = 100, message = "nombre must be 2-100 characters"))]
    pub nombre: String,
    /// Family name.
    #[validate(length(min = 2, max = 100, message = "apellido must be 2-100 characters"))]
    pub apellido: String,
    /// Email, unique across personas.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// Age in years.
    #[validate(range(min = 0, max = 150, message = "edad must be between 0 and 150"))]
    pub edad: i32,
    /// Phone number.
    #[validate(length(max = 20, message = "telefono must be at most 20 characters"))]
    pub telefono: Option<String>,
}

impl From<CreatePersonaRequest> for NewPersona {
    fn from(req: CreatePersonaRequest) -> Self {
        Self {
            nombre: req.nombre,
            apellido: req.apellido,
            email: req.email,
            edad: req.edad,
            telefono: req.telefono,
        }
    }
}

/// Update persona request body. Absent fields keep their stored value;
/// `"telefono": null` clears the phone number.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePersonaRequest {
    /// Given name.
    #[validate(length(min = 2, max = 100, message = "nombre must be 2-100 characters"))]
    pub nombre: Option<String>,
    /// Family name.
    #[validate(length(min = 2, max = 100, message = "apellido must be 2-100 characters"))]
    pub apellido: Option<String>,
    /// Email.
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    /// Age in years.
    #[validate(range(min = 0, max = 150, message = "edad must be between 0 and 150"))]
    pub edad: Option<i32>,
    /// Phone number; `Some(None)` clears it.
    #[validate(length(max = 20, message = "telefono must be at most 20 characters"))]
    #[serde(default, deserialize_with = "double_option")]
    pub telefono: Option<Option<String>>,
}

impl From<UpdatePersonaRequest> for PersonaPatch {
    fn from(req: UpdatePersonaRequest) -> Self {
        Self {
            nombre: req.nombre,
            apellido: req.apellido,
            email: req.email,
            edad: req.edad,
            telefono: req.telefono,
        }
    }
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Body of generic create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordPayload {
    /// Column values.
    pub data: Row,
}

/// Query parameters of the store health probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreHealthParams {
    /// Also check that the key authenticates.
    #[serde(default)]
    pub verify_auth: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(email: &str, edad: i32) -> CreatePersonaRequest {
        CreatePersonaRequest {
            nombre: "Ana".into(),
            apellido: "Pérez".into(),
            email: email.into(),
            edad,
            telefono: None,
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(create("ana@example.com", 30).validate().is_ok());
        assert!(create("not-an-email", 30).validate().is_err());
        assert!(create("ana@example.com", 151).validate().is_err());
        assert!(create("ana@example.com", -1).validate().is_err());
    }

    #[test]
    fn test_update_telefono_presence() {
        let absent: UpdatePersonaRequest = serde_json::from_str(r#"{"edad": 31}"#).expect("parse");
        assert_eq!(absent.telefono, None);

        let cleared: UpdatePersonaRequest =
            serde_json::from_str(r#"{"telefono": null}"#).expect("parse");
        assert_eq!(cleared.telefono, Some(None));

        let long: UpdatePersonaRequest =
            serde_json::from_str(r#"{"telefono": "123456789012345678901"}"#).expect("parse");
        assert!(long.validate().is_err());
    }
}
