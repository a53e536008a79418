//! Route definitions for the `/challenges` resource.
//!
//! Creation and listing are group-scoped and live under `/study-groups`;
//! see [`super::study_groups`].

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::challenges;
use crate::state::AppState;

/// Routes mounted at `/challenges`.
///
/// ```text
/// GET    /{id}                      -> get_challenge (detail + leaderboard)
/// PUT    /{id}                      -> update_challenge (creator only)
/// DELETE /{id}                      -> delete_challenge (creator only)
/// POST   /log-progress              -> log_progress
///
/// POST   /{id}/submissions          -> create_submission (members only)
/// GET    /{id}/submissions          -> list_submissions (owner: all, member: own)
/// POST   /submissions/{id}/process  -> process_submission (group owner only)
/// PUT    /submissions/{id}          -> update_submission (submitter only)
/// DELETE /submissions/{id}          -> delete_submission (submitter only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(challenges::get_challenge)
                .put(challenges::update_challenge)
                .delete(challenges::delete_challenge),
        )
        .route("/log-progress", post(challenges::log_progress))
        .route(
            "/{id}/submissions",
            get(challenges::list_submissions).post(challenges::create_submission),
        )
        .route(
            "/submissions/{id}/process",
            post(challenges::process_submission),
        )
        .route(
            "/submissions/{id}",
            put(challenges::update_submission).delete(challenges::delete_submission),
        )
}
