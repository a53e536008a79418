//! Handlers for the `/users` resource (self-service profile management).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lingo_core::error::CoreError;
use lingo_core::types::DbId;
use lingo_core::users::{validate_display_name, validate_password};
use lingo_db::models::user::{UpdateProfile, User, UserResponse};
use lingo_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /users/me/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Request body for `POST /users/me/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub password: String,
}

/// Request body for `PATCH /users/me/settings`.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub beginner_mode: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = require_user(&state, auth.user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/v1/users/me
///
/// Update display name and language settings. Absent fields are left as-is.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserResponse>> {
    if let Some(name) = &input.name {
        validate_display_name(name)?;
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(UserResponse::from(user)))
}

/// PATCH /api/v1/users/me/password
///
/// Change the account password after verifying the current one. Returns 204.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = require_user(&state, auth.user_id).await?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    validate_password(&input.new_password)?;
    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password_hash(&state.pool, auth.user_id, &new_hash).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/me/delete
///
/// Soft-deactivate the account after verifying the password, then revoke all
/// sessions. Returns 204.
pub async fn delete_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<DeleteAccountRequest>,
) -> AppResult<StatusCode> {
    let user = require_user(&state, auth.user_id).await?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Password is incorrect".into(),
        )));
    }

    UserRepo::deactivate(&state.pool, auth.user_id).await?;
    SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;

    tracing::info!(user_id = auth.user_id, "Account deactivated");

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/users/me/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateSettingsRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::update_settings(&state.pool, auth.user_id, input.beginner_mode)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(UserResponse::from(user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the authenticated user's row or 404 when the account vanished.
pub async fn require_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
}
