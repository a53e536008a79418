//! Route definitions for the `/pronunciation` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::pronunciation;
use crate::state::AppState;

/// Routes mounted at `/pronunciation`.
///
/// ```text
/// GET    /history       -> history (?limit=&offset=, summaries)
/// GET    /history/{id}  -> detail (includes phoneme scores)
/// DELETE /history/{id}  -> delete
/// GET    /statistics    -> statistics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(pronunciation::history))
        .route(
            "/history/{id}",
            get(pronunciation::detail).delete(pronunciation::delete),
        )
        .route("/statistics", get(pronunciation::statistics))
}
