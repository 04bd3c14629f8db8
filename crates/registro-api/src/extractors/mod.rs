//! Custom Axum extractors.

pub mod pagination;
pub mod validated;

pub use pagination::{FilterParams, PaginationParams};
pub use validated::ValidatedJson;
