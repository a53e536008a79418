//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All handlers require the admin role.
///
/// ```text
/// GET /dashboard -> dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(admin::dashboard))
}
