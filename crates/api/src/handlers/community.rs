//! Handlers for the `/community` resource: posts, comments, and reports.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lingo_core::community::{
    resolve_report_target, validate_comment_content, validate_post_fields,
    validate_report_reason, ReportTarget,
};
use lingo_core::error::CoreError;
use lingo_core::pagination::{clamp_limit, clamp_offset};
use lingo_core::users::ROLE_ADMIN;
use lingo_core::types::DbId;
use lingo_db::models::community::{
    CommunityPost, CreatePost, PostComment, PostReport, UpdatePost,
};
use lingo_db::repositories::CommunityRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const DEFAULT_POST_LIMIT: i64 = 20;
const MAX_POST_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /community/posts`.
#[derive(Debug, Deserialize)]
pub struct PostListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /community/posts/{id}/comments` and
/// `PUT /community/comments/{id}`.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// Request body for `POST /community/reports`.
#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    pub reason: String,
    pub post_id: Option<DbId>,
    pub comment_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// POST /api/v1/community/posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreatePost>,
) -> AppResult<(StatusCode, Json<CommunityPost>)> {
    validate_post_fields(&input.title, &input.content)?;

    let post = CommunityRepo::create_post(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/v1/community/posts?category=&search=&limit=&offset=
pub async fn list_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PostListParams>,
) -> AppResult<Json<Vec<CommunityPost>>> {
    let limit = clamp_limit(params.limit, DEFAULT_POST_LIMIT, MAX_POST_LIMIT);
    let offset = clamp_offset(params.offset);

    let posts = CommunityRepo::list_posts(
        &state.pool,
        params.category.as_deref(),
        params.search.as_deref(),
        limit,
        offset,
    )
    .await?;
    Ok(Json(posts))
}

/// GET /api/v1/community/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CommunityPost>> {
    let post = require_post(&state, id).await?;
    Ok(Json(post))
}

/// PUT /api/v1/community/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<Json<CommunityPost>> {
    let post = require_post(&state, id).await?;
    require_author_or_admin(post.user_id, &auth, "You can only edit your own posts")?;

    let title = input.title.as_deref().unwrap_or(&post.title);
    let content = input.content.as_deref().unwrap_or(&post.content);
    validate_post_fields(title, content)?;

    let updated = CommunityRepo::update_post(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/community/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let post = require_post(&state, id).await?;
    require_author_or_admin(post.user_id, &auth, "You can only delete your own posts")?;

    CommunityRepo::soft_delete_post(&state.pool, id).await?;

    tracing::info!(post_id = id, deleted_by = auth.user_id, "Community post deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// POST /api/v1/community/posts/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<DbId>,
    Json(input): Json<CommentRequest>,
) -> AppResult<(StatusCode, Json<PostComment>)> {
    validate_comment_content(&input.content)?;
    let post = require_post(&state, post_id).await?;

    let comment =
        CommunityRepo::create_comment(&state.pool, post.id, auth.user_id, &input.content).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/community/posts/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<Vec<PostComment>>> {
    let post = require_post(&state, post_id).await?;
    let comments = CommunityRepo::comments_for_post(&state.pool, post.id).await?;
    Ok(Json(comments))
}

/// PUT /api/v1/community/comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CommentRequest>,
) -> AppResult<Json<PostComment>> {
    validate_comment_content(&input.content)?;

    let comment = require_comment(&state, id).await?;
    require_author_or_admin(comment.user_id, &auth, "You can only edit your own comments")?;

    let updated = CommunityRepo::update_comment(&state.pool, id, &input.content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/community/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = require_comment(&state, id).await?;
    require_author_or_admin(comment.user_id, &auth, "You can only delete your own comments")?;

    CommunityRepo::delete_comment(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// POST /api/v1/community/reports
pub async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<PostReport>)> {
    validate_report_reason(&input.reason)?;
    let target = resolve_report_target(input.post_id, input.comment_id)?;

    // The reported target must still exist.
    match target {
        ReportTarget::Post(post_id) => {
            require_post(&state, post_id).await?;
        }
        ReportTarget::Comment(comment_id) => {
            require_comment(&state, comment_id).await?;
        }
    }

    let report = CommunityRepo::create_report(
        &state.pool,
        auth.user_id,
        input.post_id,
        input.comment_id,
        &input.reason,
    )
    .await?;

    tracing::info!(report_id = report.id, reporter_id = auth.user_id, "Report filed");
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/v1/community/reports
pub async fn list_reports(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<PostReport>>> {
    let reports = CommunityRepo::list_reports(&state.pool).await?;
    Ok(Json(reports))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn require_post(state: &AppState, id: DbId) -> AppResult<CommunityPost> {
    CommunityRepo::find_post(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))
}

async fn require_comment(state: &AppState, id: DbId) -> AppResult<PostComment> {
    CommunityRepo::find_comment(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))
}

fn require_author_or_admin(author_id: DbId, auth: &AuthUser, message: &str) -> AppResult<()> {
    if author_id != auth.user_id && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(())
}
