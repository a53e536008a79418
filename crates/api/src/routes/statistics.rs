//! Route definitions for the `/statistics` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::statistics;
use crate::state::AppState;

/// Routes mounted at `/statistics`.
///
/// ```text
/// POST /logs       -> create_log
/// GET  /{user_id}  -> statistics (self, or any user as admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logs", post(statistics::create_log))
        .route("/{user_id}", get(statistics::statistics))
}
