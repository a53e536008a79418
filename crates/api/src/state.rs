use std::sync::Arc;

use crate::config::ServerConfig;

/// State handed to every handler through `State<AppState>`.
///
/// Cloning is cheap: the pool is internally reference-counted and the
/// config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Postgres connection pool.
    pub pool: lingo_db::DbPool,
    /// Server configuration, including JWT settings read by the auth
    /// extractors.
    pub config: Arc<ServerConfig>,
}
