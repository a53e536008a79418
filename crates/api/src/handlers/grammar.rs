//! Handlers for the `/grammar` resource: practice-session history,
//! accuracy statistics, and favorites.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lingo_core::error::CoreError;
use lingo_core::pagination::{clamp_limit, clamp_offset};
use lingo_core::types::DbId;
use lingo_db::models::grammar::{CreateGrammarSession, GrammarSession, GrammarStatistics};
use lingo_db::repositories::GrammarRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// GET /api/v1/grammar/history?limit=&offset=
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<GrammarSession>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let sessions = GrammarRepo::history_for_user(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(sessions))
}

/// POST /api/v1/grammar/history
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateGrammarSession>,
) -> AppResult<(StatusCode, Json<GrammarSession>)> {
    if input.transcribed_text.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Transcribed text must not be empty".into(),
        )));
    }

    let session = GrammarRepo::insert(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/grammar/statistics
pub async fn statistics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<GrammarStatistics>> {
    let stats = GrammarRepo::statistics_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(stats))
}

/// PATCH /api/v1/grammar/history/{id}/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<GrammarSession>> {
    let session = GrammarRepo::toggle_favorite(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Grammar session",
            id,
        }))?;
    Ok(Json(session))
}

/// GET /api/v1/grammar/favorites
pub async fn favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<GrammarSession>>> {
    let sessions = GrammarRepo::favorites_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(sessions))
}
