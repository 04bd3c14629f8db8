//! HTTP request handlers.

pub mod health;
pub mod persona;
pub mod record;
