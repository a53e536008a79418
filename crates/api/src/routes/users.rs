//! Route definitions for the `/users` resource. Everything here operates
//! on the authenticated caller's own account.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /me           -> me
/// PUT    /me           -> update_me
/// PATCH  /me/password  -> change_password
/// POST   /me/delete    -> delete_me (re-authenticates with the password)
/// PATCH  /me/settings  -> update_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me).put(users::update_me))
        .route("/me/password", patch(users::change_password))
        .route("/me/delete", post(users::delete_me))
        .route("/me/settings", patch(users::update_settings))
}
