//! Store provider trait for the relational data service.

use async_trait::async_trait;
use serde::Serialize;

use crate::result::AppResult;
use crate::types::query::{Query, QueryResponse};

/// Reachability report of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreHealth {
    /// Whether the store answered at all.
    pub connected: bool,
    /// HTTP status of the probe, when there was one.
    pub status_code: Option<u16>,
    /// Outcome of the auth subsystem check, when requested.
    pub auth_ok: Option<bool>,
    /// Human-readable summary.
    pub message: String,
}

/// Backend executing [`Query`] values against tables (hosted REST service
/// or in-process memory).
///
/// Providers never interpret absence: a query matching nothing yields an
/// empty [`QueryResponse`], and only transport or store-side failures are
/// errors.
#[async_trait]
pub trait StoreProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Execute one table operation in a single round-trip.
    async fn execute(&self, query: Query) -> AppResult<QueryResponse>;

    /// Probe connectivity, optionally checking the access key against the
    /// auth subsystem.
    async fn health_check(&self, verify_auth: bool) -> AppResult<StoreHealth>;

    /// Short provider name for logs (`rest`, `memory`).
    fn name(&self) -> &'static str;
}
