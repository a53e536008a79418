//! Route definitions for the `/attendance` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// POST /check-in -> check_in (once per UTC day)
/// GET  /history  -> history
/// GET  /stats    -> stats (total days + longest streak)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check-in", post(attendance::check_in))
        .route("/history", get(attendance::history))
        .route("/stats", get(attendance::stats))
}
