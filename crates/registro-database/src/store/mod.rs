//! Store provider implementations and the manager selecting between them.

pub mod manager;
pub mod memory;
pub mod rest;

pub use manager::StoreManager;
pub use memory::MemoryStoreProvider;
pub use rest::RestStoreProvider;
