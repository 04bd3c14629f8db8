//! Persona domain entities.

pub mod model;
pub mod patch;

pub use model::{NewPersona, PERSONAS_TABLE, Persona};
pub use patch::PersonaPatch;
