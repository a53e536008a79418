//! Handlers for the `/pronunciation` resource.
//!
//! Analysis results are produced by the speech pipeline; this API only
//! reads them back, serves aggregates, and lets users prune their history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lingo_core::error::CoreError;
use lingo_core::pagination::{clamp_limit, clamp_offset};
use lingo_core::types::DbId;
use lingo_db::models::pronunciation::{
    PronunciationResult, PronunciationStatistics, PronunciationSummary,
};
use lingo_db::repositories::PronunciationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// GET /api/v1/pronunciation/history?limit=&offset=
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<PronunciationSummary>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let results =
        PronunciationRepo::history_for_user(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(results))
}

/// GET /api/v1/pronunciation/history/{id}
///
/// Full detail including phoneme scores.
pub async fn detail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<PronunciationResult>> {
    let result = PronunciationRepo::find_detail(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Pronunciation result",
            id,
        }))?;
    Ok(Json(result))
}

/// DELETE /api/v1/pronunciation/history/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PronunciationRepo::delete(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Pronunciation result",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/pronunciation/statistics
pub async fn statistics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<PronunciationStatistics>> {
    let stats = PronunciationRepo::statistics_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(stats))
}
