//! Handlers for group challenges, progress logging, and proof submissions.
//!
//! Challenges belong to a study group; creation and submission processing
//! are owner operations, everything else is member-scoped. Completion is
//! granted only through submission approval and revoked when the
//! submission is edited or deleted.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lingo_core::challenges::{
    progress_percentage, validate_challenge_fields, validate_progress_delta,
    DEFAULT_DURATION_DAYS, SUBMISSION_STATUS_APPROVED, SUBMISSION_STATUS_REJECTED,
    VALID_CHALLENGE_TYPES,
};
use lingo_core::error::CoreError;
use lingo_core::groups::MEMBER_ROLE_OWNER;
use lingo_core::notifications::{submission_resolved_content, KIND_CHALLENGE};
use lingo_core::types::DbId;
use lingo_db::models::challenge::{
    ChallengeSubmission, ChallengeWithProgress, CreateChallenge, CreateSubmission, GroupChallenge,
    LeaderboardEntry, UpdateChallenge,
};
use lingo_db::repositories::{ChallengeRepo, GroupRepo, NotificationRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::study_groups::{require_group, require_member, require_owner};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /challenges/log-progress`.
#[derive(Debug, Deserialize)]
pub struct LogProgressRequest {
    pub log_type: String,
    pub value: i32,
}

/// Response for `POST /challenges/log-progress`.
#[derive(Debug, Serialize)]
pub struct LogProgressResponse {
    pub updated_challenges: u64,
}

/// Request body for `POST /challenges/submissions/{id}/process`.
#[derive(Debug, Deserialize)]
pub struct ProcessSubmissionRequest {
    pub status: String,
}

/// Leaderboard row with the completion percentage resolved.
#[derive(Debug, Serialize)]
pub struct LeaderboardItem {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    pub progress_percentage: f64,
}

/// Challenge detail with its ranked participants.
#[derive(Debug, Serialize)]
pub struct ChallengeDetail {
    #[serde(flatten)]
    pub challenge: GroupChallenge,
    pub leaderboard: Vec<LeaderboardItem>,
}

// ---------------------------------------------------------------------------
// Challenge lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/study-groups/{id}/challenges
pub async fn create_challenge(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<DbId>,
    Json(input): Json<CreateChallenge>,
) -> AppResult<(StatusCode, Json<GroupChallenge>)> {
    let group = require_group(&state, group_id).await?;
    require_owner(&group, &auth, "Only the group owner can create challenges")?;

    let duration_days = input.duration_days.unwrap_or(DEFAULT_DURATION_DAYS);
    validate_challenge_fields(
        &input.title,
        input.description.as_deref(),
        &input.challenge_type,
        input.target_value,
        duration_days,
    )?;

    let challenge =
        ChallengeRepo::create(&state.pool, group.id, auth.user_id, &input, duration_days).await?;

    tracing::info!(
        challenge_id = challenge.id,
        group_id = group.id,
        challenge_type = %challenge.challenge_type,
        "Challenge created"
    );
    Ok((StatusCode::CREATED, Json(challenge)))
}

/// GET /api/v1/study-groups/{id}/challenges
pub async fn list_challenges(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(group_id): Path<DbId>,
) -> AppResult<Json<Vec<ChallengeWithProgress>>> {
    let group = require_group(&state, group_id).await?;
    require_member(&state, &group, &auth, "Only group members can view challenges").await?;

    let challenges = ChallengeRepo::list_for_group(&state.pool, group.id).await?;
    Ok(Json(challenges))
}

/// GET /api/v1/challenges/{id}
pub async fn get_challenge(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ChallengeDetail>> {
    let challenge = require_challenge(&state, id).await?;
    let group = require_group(&state, challenge.group_id).await?;
    require_member(&state, &group, &auth, "Only group members can view this challenge").await?;

    let leaderboard = ChallengeRepo::leaderboard(&state.pool, challenge.id)
        .await?
        .into_iter()
        .map(|entry| {
            let pct = progress_percentage(entry.current_value, challenge.target_value);
            LeaderboardItem {
                entry,
                progress_percentage: pct,
            }
        })
        .collect();

    Ok(Json(ChallengeDetail {
        challenge,
        leaderboard,
    }))
}

/// PUT /api/v1/challenges/{id}
pub async fn update_challenge(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChallenge>,
) -> AppResult<Json<GroupChallenge>> {
    let challenge = require_challenge(&state, id).await?;
    require_creator(&challenge, &auth, "Only the challenge creator can edit it")?;

    let title = input.title.as_deref().unwrap_or(&challenge.title);
    // Absent field keeps the stored description; explicit null clears it.
    let description = match &input.description {
        Some(replacement) => replacement.as_deref(),
        None => challenge.description.as_deref(),
    };
    let target_value = input.target_value.unwrap_or(challenge.target_value);
    validate_challenge_fields(
        title,
        description,
        &challenge.challenge_type,
        target_value,
        DEFAULT_DURATION_DAYS,
    )?;

    let updated = ChallengeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Challenge",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/challenges/{id}
pub async fn delete_challenge(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let challenge = require_challenge(&state, id).await?;
    require_creator(&challenge, &auth, "Only the challenge creator can delete it")?;

    ChallengeRepo::deactivate(&state.pool, id).await?;

    tracing::info!(challenge_id = id, "Challenge deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// POST /api/v1/challenges/log-progress
///
/// Credits the value toward every live challenge of the given type across
/// the caller's groups.
pub async fn log_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<LogProgressRequest>,
) -> AppResult<Json<LogProgressResponse>> {
    if !VALID_CHALLENGE_TYPES.contains(&input.log_type.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid log type '{}'. Must be one of: {}",
            input.log_type,
            VALID_CHALLENGE_TYPES.join(", ")
        ))));
    }
    validate_progress_delta(input.value)?;

    let updated =
        ChallengeRepo::log_progress(&state.pool, auth.user_id, &input.log_type, input.value)
            .await?;

    Ok(Json(LogProgressResponse {
        updated_challenges: updated,
    }))
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// POST /api/v1/challenges/{id}/submissions
pub async fn create_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateSubmission>,
) -> AppResult<(StatusCode, Json<ChallengeSubmission>)> {
    if input.proof_content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Proof content must not be empty".into(),
        )));
    }

    let challenge = require_challenge(&state, id).await?;
    let group = require_group(&state, challenge.group_id).await?;
    require_member(&state, &group, &auth, "Only group members can submit proof").await?;

    match ChallengeRepo::create_submission(&state.pool, challenge.id, auth.user_id, &input).await {
        Ok(submission) => {
            tracing::info!(
                submission_id = submission.id,
                challenge_id = challenge.id,
                user_id = auth.user_id,
                "Submission filed"
            );
            Ok((StatusCode::CREATED, Json(submission)))
        }
        Err(sqlx::Error::Database(e))
            if e.constraint() == Some("uq_challenge_submissions_open") =>
        {
            Err(AppError::Core(CoreError::Conflict(
                "A pending or approved submission already exists for this challenge".into(),
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /api/v1/challenges/{id}/submissions
///
/// The group owner sees every submission; members see their own.
pub async fn list_submissions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ChallengeSubmission>>> {
    let challenge = require_challenge(&state, id).await?;
    let group = require_group(&state, challenge.group_id).await?;

    let role = GroupRepo::member_role(&state.pool, group.id, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "Only group members can view submissions".into(),
            ))
        })?;

    let submissions = if role == MEMBER_ROLE_OWNER {
        ChallengeRepo::submissions_for_challenge(&state.pool, challenge.id).await?
    } else {
        ChallengeRepo::own_submissions(&state.pool, challenge.id, auth.user_id).await?
    };
    Ok(Json(submissions))
}

/// POST /api/v1/challenges/submissions/{id}/process
///
/// Approving grants the submitter completion credit in the same
/// transaction as the status flip.
pub async fn process_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ProcessSubmissionRequest>,
) -> AppResult<Json<ChallengeSubmission>> {
    let approve = match input.status.as_str() {
        SUBMISSION_STATUS_APPROVED => true,
        SUBMISSION_STATUS_REJECTED => false,
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be approved or rejected"
            ))));
        }
    };

    let submission = require_submission(&state, id).await?;
    let challenge = require_challenge(&state, submission.challenge_id).await?;
    let group = require_group(&state, challenge.group_id).await?;
    require_owner(&group, &auth, "Only the group owner can process submissions")?;

    let processed = ChallengeRepo::process_submission(&state.pool, id, approve)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Submission has already been processed".into(),
            ))
        })?;

    NotificationRepo::insert(
        &state.pool,
        processed.user_id,
        KIND_CHALLENGE,
        &submission_resolved_content(&challenge.title, approve),
    )
    .await?;

    tracing::info!(
        submission_id = id,
        challenge_id = challenge.id,
        approved = approve,
        "Submission processed"
    );
    Ok(Json(processed))
}

/// PUT /api/v1/challenges/submissions/{id}
///
/// Replaces the proof and resets the submission to pending, revoking any
/// completion credit.
pub async fn update_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateSubmission>,
) -> AppResult<Json<ChallengeSubmission>> {
    if input.proof_content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Proof content must not be empty".into(),
        )));
    }

    let submission = require_submission(&state, id).await?;
    require_submitter(&submission, &auth, "You can only edit your own submissions")?;

    let updated = ChallengeRepo::reset_submission(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/challenges/submissions/{id}
pub async fn delete_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let submission = require_submission(&state, id).await?;
    require_submitter(&submission, &auth, "You can only delete your own submissions")?;

    ChallengeRepo::delete_submission(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn require_challenge(state: &AppState, id: DbId) -> AppResult<GroupChallenge> {
    ChallengeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Challenge",
            id,
        }))
}

async fn require_submission(state: &AppState, id: DbId) -> AppResult<ChallengeSubmission> {
    ChallengeRepo::find_submission(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id,
        }))
}

fn require_creator(challenge: &GroupChallenge, auth: &AuthUser, message: &str) -> AppResult<()> {
    if challenge.created_by != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(())
}

fn require_submitter(
    submission: &ChallengeSubmission,
    auth: &AuthUser,
    message: &str,
) -> AppResult<()> {
    if submission.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(())
}
