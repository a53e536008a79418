//! Handlers for the `/statistics` resource.
//!
//! Learning logs are the raw event stream; the statistics endpoint folds
//! them into lifetime totals plus goal progress scoped to the current plan.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lingo_core::error::CoreError;
use lingo_core::planning::LearningGoals;
use lingo_core::users::ROLE_ADMIN;
use lingo_core::statistics::{compute_progress, validate_log, ProgressReport, LOG_TYPE_CONVERSATION};
use lingo_core::types::DbId;
use lingo_db::models::learning_log::{CreateLearningLog, LearningLog};
use lingo_db::repositories::{LearningLogRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Lifetime totals across all learning logs.
#[derive(Debug, Serialize)]
pub struct OverallStatistics {
    pub conversation: i64,
    pub grammar: i64,
    pub pronunciation: i64,
    pub total: i64,
}

/// Response body for `GET /statistics/{user_id}`.
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub overall_statistics: OverallStatistics,
    /// Goal progress since the current plan was generated; `null` when the
    /// user has no learning goals.
    pub progress_statistics: Option<ProgressReport>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/statistics/logs
///
/// Record one learning activity. Conversation carries minutes; grammar and
/// pronunciation carry an item count.
pub async fn create_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateLearningLog>,
) -> AppResult<(StatusCode, Json<LearningLog>)> {
    let value = if input.log_type == LOG_TYPE_CONVERSATION {
        input.duration_minutes
    } else {
        input.item_count
    };
    let value = value.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "A duration or item count is required for this log type".into(),
        ))
    })?;
    validate_log(&input.log_type, value)?;

    let log = LearningLogRepo::insert(&state.pool, auth.user_id, &input).await?;

    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/v1/statistics/{user_id}
///
/// Visible to the user themselves and to admins.
pub async fn statistics(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<StatisticsResponse>> {
    if auth.user_id != user_id && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only view your own statistics".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let overall = LearningLogRepo::totals_for_user(&state.pool, user_id).await?;

    // Progress only covers logs recorded since the goals were set.
    let goals: Option<LearningGoals> = user
        .learning_goals
        .as_ref()
        .and_then(|v| serde_json::from_value(v.clone()).ok());
    let progress_statistics = match &goals {
        Some(g) => {
            let since = LearningLogRepo::totals_for_user_since(&state.pool, user_id, g.created_at)
                .await?;
            Some(compute_progress(&since, Some(g)))
        }
        None => None,
    };

    Ok(Json(StatisticsResponse {
        overall_statistics: OverallStatistics {
            conversation: overall.conversation,
            grammar: overall.grammar,
            pronunciation: overall.pronunciation,
            total: overall.total(),
        },
        progress_statistics,
    }))
}
