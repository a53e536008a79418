//! Route definitions for the `/plans` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::plans;
use crate::state::AppState;

/// Routes mounted at `/plans`.
///
/// ```text
/// GET  /templates        -> templates (catalog)
/// POST /select-template  -> select_template
/// POST /                 -> create_direct
/// GET  /latest           -> latest
/// PUT  /{plan_id}        -> update (latest plan only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(plans::create_direct))
        .route("/templates", get(plans::templates))
        .route("/select-template", post(plans::select_template))
        .route("/latest", get(plans::latest))
        .route("/{plan_id}", put(plans::update))
}
