//! Handlers for the `/notices` resource. Reads are open to any
//! authenticated user; writes are admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lingo_core::error::CoreError;
use lingo_core::pagination::{clamp_limit, clamp_offset};
use lingo_core::types::DbId;
use lingo_db::models::notice::{CreateNotice, Notice, UpdateNotice};
use lingo_db::repositories::NoticeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// GET /api/v1/notices?limit=&offset=
pub async fn list_notices(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Notice>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let notices = NoticeRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(notices))
}

/// GET /api/v1/notices/{id}
pub async fn get_notice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Notice>> {
    let notice = NoticeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notice",
            id,
        }))?;
    Ok(Json(notice))
}

/// POST /api/v1/notices
pub async fn create_notice(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateNotice>,
) -> AppResult<(StatusCode, Json<Notice>)> {
    validate_fields(&input.title, &input.content)?;

    let notice = NoticeRepo::create(&state.pool, &input).await?;

    tracing::info!(notice_id = notice.id, admin_id = admin.user_id, "Notice published");
    Ok((StatusCode::CREATED, Json(notice)))
}

/// PUT /api/v1/notices/{id}
pub async fn update_notice(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNotice>,
) -> AppResult<Json<Notice>> {
    if let Some(title) = input.title.as_deref() {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Notice title must not be empty".into(),
            )));
        }
    }
    if let Some(content) = input.content.as_deref() {
        if content.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Notice content must not be empty".into(),
            )));
        }
    }

    let notice = NoticeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notice",
            id,
        }))?;
    Ok(Json(notice))
}

/// DELETE /api/v1/notices/{id}
pub async fn delete_notice(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = NoticeRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notice",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn validate_fields(title: &str, content: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Notice title must not be empty".into(),
        )));
    }
    if content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Notice content must not be empty".into(),
        )));
    }
    Ok(())
}
