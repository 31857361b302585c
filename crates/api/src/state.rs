use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The pool is constructed once in `main` and injected here, so tests can
/// build isolated instances against their own databases.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: demiurge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
