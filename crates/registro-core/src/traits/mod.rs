//! Core traits defined in `registro-core` and implemented by other crates.

pub mod record;
pub mod repository;
pub mod store;

pub use record::Record;
pub use repository::{Repository, SoftDelete};
pub use store::{StoreHealth, StoreProvider};
