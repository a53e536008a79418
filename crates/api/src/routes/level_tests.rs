//! Route definitions for the `/level-tests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::level_tests;
use crate::state::AppState;

/// Routes mounted at `/level-tests`.
///
/// ```text
/// GET  /questions -> questions (random sample)
/// POST /submit    -> submit (grades and updates the user's level)
/// GET  /results   -> results (own history)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(level_tests::questions))
        .route("/submit", post(level_tests::submit))
        .route("/results", get(level_tests::results))
}
