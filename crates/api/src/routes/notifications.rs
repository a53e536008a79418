//! Route definitions for the `/notifications` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET   /            -> list_notifications (?limit=&offset=)
/// PATCH /{id}/read   -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/{id}/read", patch(notifications::mark_read))
}
