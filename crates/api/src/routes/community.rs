//! Route definitions for the `/community` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::community;
use crate::state::AppState;

/// Routes mounted at `/community`.
///
/// ```text
/// POST   /posts               -> create_post
/// GET    /posts               -> list_posts (?category=&search=&limit=&offset=)
/// GET    /posts/{id}          -> get_post
/// PUT    /posts/{id}          -> update_post (author or admin)
/// DELETE /posts/{id}          -> delete_post (author or admin, soft)
/// POST   /posts/{id}/comments -> create_comment
/// GET    /posts/{id}/comments -> list_comments
///
/// PUT    /comments/{id}       -> update_comment (author or admin)
/// DELETE /comments/{id}       -> delete_comment (author or admin)
///
/// POST   /reports             -> create_report
/// GET    /reports             -> list_reports (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(community::list_posts).post(community::create_post),
        )
        .route(
            "/posts/{id}",
            get(community::get_post)
                .put(community::update_post)
                .delete(community::delete_post),
        )
        .route(
            "/posts/{id}/comments",
            get(community::list_comments).post(community::create_comment),
        )
        .route(
            "/comments/{id}",
            put(community::update_comment).delete(community::delete_comment),
        )
        .route(
            "/reports",
            get(community::list_reports).post(community::create_report),
        )
}
