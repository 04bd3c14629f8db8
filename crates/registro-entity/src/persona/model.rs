//! Persona entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use registro_core::error::AppError;
use registro_core::result::AppResult;
use registro_core::traits::Record;
use registro_core::types::{RecordId, Row};

use crate::row;

/// Table holding persona rows.
pub const PERSONAS_TABLE: &str = "personas";

/// Age from which a persona counts as an adult.
const ADULT_AGE: i32 = 18;

/// A person registered in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Store-assigned identifier; absent before creation.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Given name.
    pub nombre: String,
    /// Family name.
    pub apellido: String,
    /// Email address, unique across personas.
    pub email: String,
    /// Age in years.
    pub edad: i32,
    /// Phone number.
    #[serde(default)]
    pub telefono: Option<String>,
    /// When the row was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the row was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Persona {
    /// `"nombre apellido"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }

    /// Whether the persona is at least 18.
    pub fn is_adult(&self) -> bool {
        self.edad >= ADULT_AGE
    }

    /// Columns written on update. Timestamps are left to the store;
    /// `telefono` is always sent so that clearing it reaches the row.
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        if let Some(id) = &self.id {
            row.insert("id".into(), id.to_json());
        }
        row.insert("nombre".into(), Value::from(self.nombre.as_str()));
        row.insert("apellido".into(), Value::from(self.apellido.as_str()));
        row.insert("email".into(), Value::from(self.email.as_str()));
        row.insert("edad".into(), Value::from(self.edad));
        row.insert(
            "telefono".into(),
            self.telefono.as_deref().map_or(Value::Null, Value::from),
        );
        row
    }
}

impl Record for Persona {
    fn from_row(row: Row) -> AppResult<Self> {
        let edad = row::required_i64(&row, "edad")?;
        let edad = i32::try_from(edad)
            .map_err(|_| AppError::conversion(format!("Column 'edad' is out of range: {edad}")))?;

        Ok(Self {
            id: row::optional_id(&row, "id")?,
            nombre: row::required_str(&row, "nombre")?,
            apellido: row::required_str(&row, "apellido")?,
            email: row::required_str(&row, "email")?,
            edad,
            telefono: row::optional_str(&row, "telefono")?,
            created_at: row::optional_timestamp(&row, "created_at")?,
            updated_at: row::optional_timestamp(&row, "updated_at")?,
        })
    }
}

/// Data required to create a new persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPersona {
    /// Given name.
    pub nombre: String,
    /// Family name.
    pub apellido: String,
    /// Email address.
    pub email: String,
    /// Age in years.
    pub edad: i32,
    /// Phone number.
    #[serde(default)]
    pub telefono: Option<String>,
}

impl NewPersona {
    /// Columns written on insert; the store assigns `id` and timestamps.
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("nombre".into(), Value::from(self.nombre.as_str()));
        row.insert("apellido".into(), Value::from(self.apellido.as_str()));
        row.insert("email".into(), Value::from(self.email.as_str()));
        row.insert("edad".into(), Value::from(self.edad));
        if let Some(telefono) = &self.telefono {
            row.insert("telefono".into(), Value::from(telefono.as_str()));
        }
        row
    }
}
