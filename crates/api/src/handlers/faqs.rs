//! Handlers for the `/faqs` resource. Same access split as notices:
//! authenticated reads, admin-only writes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lingo_core::error::CoreError;
use lingo_core::pagination::{clamp_limit, clamp_offset};
use lingo_core::types::DbId;
use lingo_db::models::faq::{CreateFaq, Faq, UpdateFaq};
use lingo_db::repositories::FaqRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// GET /api/v1/faqs?limit=&offset=
pub async fn list_faqs(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Faq>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let faqs = FaqRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(faqs))
}

/// GET /api/v1/faqs/{id}
pub async fn get_faq(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Faq>> {
    let faq = FaqRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "FAQ", id }))?;
    Ok(Json(faq))
}

/// POST /api/v1/faqs
pub async fn create_faq(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateFaq>,
) -> AppResult<(StatusCode, Json<Faq>)> {
    if input.question.trim().is_empty() || input.answer.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "FAQ question and answer must not be empty".into(),
        )));
    }

    let faq = FaqRepo::create(&state.pool, &input).await?;

    tracing::info!(faq_id = faq.id, admin_id = admin.user_id, "FAQ published");
    Ok((StatusCode::CREATED, Json(faq)))
}

/// PUT /api/v1/faqs/{id}
pub async fn update_faq(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFaq>,
) -> AppResult<Json<Faq>> {
    if input.question.as_deref().is_some_and(|q| q.trim().is_empty())
        || input.answer.as_deref().is_some_and(|a| a.trim().is_empty())
    {
        return Err(AppError::Core(CoreError::Validation(
            "FAQ question and answer must not be empty".into(),
        )));
    }

    let faq = FaqRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "FAQ", id }))?;
    Ok(Json(faq))
}

/// DELETE /api/v1/faqs/{id}
pub async fn delete_faq(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FaqRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "FAQ", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
