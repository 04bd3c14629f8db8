//! # registro-database
//!
//! Store access for Registro: the filter translator, the REST and
//! in-memory [`StoreProvider`](registro_core::traits::StoreProvider)
//! implementations, the provider manager, and the concrete repositories.

pub mod filter;
pub mod repositories;
pub mod store;

pub use store::StoreManager;
