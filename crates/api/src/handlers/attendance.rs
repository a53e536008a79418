//! Handlers for the `/attendance` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use lingo_core::attendance::longest_streak;
use lingo_core::error::CoreError;
use lingo_db::models::attendance::AttendanceRecord;
use lingo_db::repositories::AttendanceRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response body for `GET /attendance/stats`.
#[derive(Debug, Serialize)]
pub struct AttendanceStats {
    pub total_days: i64,
    pub longest_streak: i32,
}

/// POST /api/v1/attendance/check-in
///
/// Record today's attendance. A second check-in on the same day conflicts.
pub async fn check_in(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<(StatusCode, Json<AttendanceRecord>)> {
    let today = Utc::now().date_naive();

    let record = match AttendanceRepo::insert(&state.pool, auth.user_id, today).await {
        Ok(record) => record,
        Err(sqlx::Error::Database(e)) if e.constraint() == Some("uq_attendance_user_date") => {
            return Err(AppError::Core(CoreError::Conflict(
                "Already checked in today".into(),
            )));
        }
        Err(e) => return Err(e.into()),
    };

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/attendance/history
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    let records = AttendanceRepo::history_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(records))
}

/// GET /api/v1/attendance/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<AttendanceStats>> {
    let dates = AttendanceRepo::dates_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(AttendanceStats {
        total_days: dates.len() as i64,
        longest_streak: longest_streak(&dates),
    }))
}
