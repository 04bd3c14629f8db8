//! # registro-core
//!
//! Core crate for Registro. Contains the repository and store traits,
//! configuration schemas, typed identifiers, filter/pagination/sorting and
//! query types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Registro crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
