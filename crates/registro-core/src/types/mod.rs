//! Core type definitions used across the Registro workspace.

pub mod filter;
pub mod id;
pub mod pagination;
pub mod profile;
pub mod query;
pub mod sorting;

pub use filter::{Filter, FilterField, FilterMode, FilterOp, FilterValue};
pub use id::RecordId;
pub use pagination::PageWindow;
pub use profile::{AuditColumns, StatusColumn, TableProfile};
pub use query::{Query, QueryAction, QueryResponse, Row};
pub use sorting::{SortDirection, SortField};
