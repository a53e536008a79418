//! Route definitions for the `/grammar` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::grammar;
use crate::state::AppState;

/// Routes mounted at `/grammar`.
///
/// ```text
/// GET   /history                 -> history (?limit=&offset=)
/// POST  /history                 -> create_session
/// GET   /statistics              -> statistics
/// PATCH /history/{id}/favorite   -> toggle_favorite
/// GET   /favorites               -> favorites
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/history",
            get(grammar::history).post(grammar::create_session),
        )
        .route("/statistics", get(grammar::statistics))
        .route("/history/{id}/favorite", patch(grammar::toggle_favorite))
        .route("/favorites", get(grammar::favorites))
}
