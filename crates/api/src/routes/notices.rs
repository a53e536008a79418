//! Route definitions for the `/notices` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::notices;
use crate::state::AppState;

/// Routes mounted at `/notices`. Writes require the admin role.
///
/// ```text
/// GET    /      -> list_notices (?limit=&offset=)
/// POST   /      -> create_notice (admin)
/// GET    /{id}  -> get_notice
/// PUT    /{id}  -> update_notice (admin)
/// DELETE /{id}  -> delete_notice (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notices::list_notices).post(notices::create_notice))
        .route(
            "/{id}",
            get(notices::get_notice)
                .put(notices::update_notice)
                .delete(notices::delete_notice),
        )
}
