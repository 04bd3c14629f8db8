//! Generic table use cases.

pub mod service;

pub use service::RecordService;
