//! Repository implementations.

pub mod persona;
pub mod table;

pub use persona::PersonaRepository;
pub use table::TableRepository;
