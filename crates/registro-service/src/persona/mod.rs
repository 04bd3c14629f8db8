//! Persona use cases.

pub mod service;

pub use service::PersonaService;
