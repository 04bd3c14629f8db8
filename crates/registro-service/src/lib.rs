//! # registro-service
//!
//! Use-case layer for Registro. Services enforce existence and uniqueness
//! rules before delegating to a repository and are the only layer that
//! raises not-found and duplicate-key errors.
//!
//! Services follow constructor injection: the repository is provided at
//! construction time behind an `Arc`.

pub mod persona;
pub mod record;

pub use persona::PersonaService;
pub use record::RecordService;
