//! Route definitions for the `/study-groups` resource, including the
//! group-scoped challenge routes.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{challenges, study_groups};
use crate::state::AppState;

/// Routes mounted at `/study-groups`.
///
/// ```text
/// POST   /                                  -> create_group
/// GET    /                                  -> list_groups
/// GET    /{id}                              -> get_group
/// DELETE /{id}                              -> delete_group (owner only)
/// POST   /{id}/join                         -> join_group
/// DELETE /{id}/leave                        -> leave_group
/// GET    /{id}/members                      -> list_members (members only)
/// GET    /{id}/messages                     -> list_messages (members only)
/// POST   /{id}/messages                     -> post_message (members only)
/// GET    /{id}/requests                     -> list_requests (owner only)
/// POST   /{id}/requests/{request_id}/approve -> approve_request (owner only)
/// POST   /{id}/requests/{request_id}/reject  -> reject_request (owner only)
///
/// POST   /{id}/challenges                   -> create_challenge (owner only)
/// GET    /{id}/challenges                   -> list_challenges (members only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(study_groups::list_groups).post(study_groups::create_group),
        )
        .route(
            "/{id}",
            get(study_groups::get_group).delete(study_groups::delete_group),
        )
        .route("/{id}/join", post(study_groups::join_group))
        .route("/{id}/leave", delete(study_groups::leave_group))
        .route("/{id}/members", get(study_groups::list_members))
        .route(
            "/{id}/messages",
            get(study_groups::list_messages).post(study_groups::post_message),
        )
        .route("/{id}/requests", get(study_groups::list_requests))
        .route(
            "/{id}/requests/{request_id}/approve",
            post(study_groups::approve_request),
        )
        .route(
            "/{id}/requests/{request_id}/reject",
            post(study_groups::reject_request),
        )
        .route(
            "/{id}/challenges",
            get(challenges::list_challenges).post(challenges::create_challenge),
        )
}
