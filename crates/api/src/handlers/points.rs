//! Handlers for the `/points` resource.

use axum::extract::State;
use axum::Json;
use lingo_core::error::CoreError;
use lingo_core::types::DbId;
use lingo_db::models::point::{PointHistory, PointTransaction};
use lingo_db::repositories::point_repo::PointOutcome;
use lingo_db::repositories::PointRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response for `POST /points/transaction`.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub user_id: DbId,
    pub message: String,
    pub final_points: i32,
}

/// POST /api/v1/points/transaction
///
/// Applies a signed balance change. Deductions that would take the
/// balance below zero are refused with a 400.
pub async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<PointTransaction>,
) -> AppResult<Json<TransactionResponse>> {
    if input.amount == 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Point amount must not be zero".into(),
        )));
    }
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A reason is required for point transactions".into(),
        )));
    }

    match PointRepo::apply_transaction(&state.pool, auth.user_id, input.amount, &input.reason)
        .await?
    {
        PointOutcome::Applied(balance) => {
            tracing::info!(
                user_id = auth.user_id,
                amount = input.amount,
                balance,
                "Points applied"
            );
            Ok(Json(TransactionResponse {
                user_id: auth.user_id,
                message: format!("{} points applied", input.amount),
                final_points: balance,
            }))
        }
        PointOutcome::InsufficientPoints => Err(AppError::BadRequest(
            "Insufficient points".into(),
        )),
    }
}

/// GET /api/v1/points/history
pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<PointHistory>>> {
    let entries = PointRepo::history_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(entries))
}
