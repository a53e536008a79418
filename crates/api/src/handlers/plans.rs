//! Handlers for the `/plans` resource.
//!
//! Plans come in two flavors: generated from a fixed template, or built
//! directly from the caller's preferred session shape. Both persist the
//! generated plan, store the derived per-style goals on the user row, and
//! leave a `study_start` notification.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use lingo_core::error::CoreError;
use lingo_core::levels::numeric_level;
use lingo_core::notifications::{plan_created_content, KIND_STUDY_START};
use lingo_core::planning::{
    derive_goals, find_template, generate_plan, GeneratedPlan, PlanInput, PlanTemplate,
    FREQUENCY_DAILY, PLAN_TEMPLATES,
};
use lingo_core::types::DbId;
use lingo_db::models::plan::LearningPlan;
use lingo_db::repositories::{NotificationRepo, PlanRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Level steps added on top of the current level for direct plans.
const DIRECT_PLAN_LEVEL_GAIN: i32 = 2;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /plans/select-template`.
#[derive(Debug, Deserialize)]
pub struct SelectTemplateRequest {
    pub template_id: String,
}

/// Request body for `POST /plans` and `PUT /plans/{id}`.
#[derive(Debug, Deserialize)]
pub struct DirectPlanRequest {
    pub session_duration_minutes: i32,
    pub preferred_styles: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/plans/templates
///
/// The fixed template catalog. Only id, name, and description are exposed;
/// generation parameters stay server-side.
pub async fn templates(_auth: AuthUser) -> Json<&'static [PlanTemplate]> {
    Json(PLAN_TEMPLATES)
}

/// POST /api/v1/plans/select-template
pub async fn select_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SelectTemplateRequest>,
) -> AppResult<(StatusCode, Json<LearningPlan>)> {
    let template = find_template(&input.template_id).ok_or_else(|| {
        AppError::NotFound(format!("Unknown plan template '{}'", input.template_id))
    })?;

    let current_level = current_numeric_level(&state, auth.user_id).await?;
    let plan_input = PlanInput {
        current_level,
        goal_level: template.goal_level,
        frequency_type: template.frequency_type.to_string(),
        frequency_value: template.frequency_value,
        session_duration_minutes: template.session_duration_minutes,
        preferred_styles: template
            .preferred_styles
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    let generated = generate_plan(&plan_input)?;
    let plan = persist_new_plan(&state, auth.user_id, &generated).await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// POST /api/v1/plans
///
/// Direct plan: the goal level is two steps above the current one, practiced
/// daily.
pub async fn create_direct(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<DirectPlanRequest>,
) -> AppResult<(StatusCode, Json<LearningPlan>)> {
    let current_level = current_numeric_level(&state, auth.user_id).await?;
    let generated = generate_direct(current_level, &input)?;
    let plan = persist_new_plan(&state, auth.user_id, &generated).await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/plans/latest
pub async fn latest(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<LearningPlan>> {
    let plan = PlanRepo::latest_for_user(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No learning plan found".into()))?;

    Ok(Json(plan))
}

/// PUT /api/v1/plans/{plan_id}
///
/// Regenerate a plan in place. Only the caller's newest plan may be edited;
/// older plans are read-only history.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<DbId>,
    Json(input): Json<DirectPlanRequest>,
) -> AppResult<Json<LearningPlan>> {
    let plan = PlanRepo::find_by_id(&state.pool, plan_id)
        .await?
        .filter(|p| p.user_id == auth.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LearningPlan",
            id: plan_id,
        }))?;

    let latest = PlanRepo::latest_for_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LearningPlan",
            id: plan_id,
        }))?;
    if latest.id != plan.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the latest plan can be edited".into(),
        )));
    }

    let current_level = current_numeric_level(&state, auth.user_id).await?;
    let generated = generate_direct(current_level, &input)?;

    let updated = PlanRepo::replace(&state.pool, plan.id, &generated)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LearningPlan",
            id: plan_id,
        }))?;

    store_goals(&state, auth.user_id, &generated).await?;

    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The caller's assessed level on the numeric planning scale.
async fn current_numeric_level(state: &AppState, user_id: DbId) -> AppResult<i32> {
    let user = super::users::require_user(state, user_id).await?;
    Ok(numeric_level(&user.level))
}

fn generate_direct(
    current_level: i32,
    input: &DirectPlanRequest,
) -> Result<GeneratedPlan, CoreError> {
    let plan_input = PlanInput {
        current_level,
        goal_level: current_level + DIRECT_PLAN_LEVEL_GAIN,
        frequency_type: FREQUENCY_DAILY.to_string(),
        frequency_value: 1,
        session_duration_minutes: input.session_duration_minutes,
        preferred_styles: input.preferred_styles.clone(),
    };
    generate_plan(&plan_input)
}

/// Insert the plan row, store derived goals, and notify the user.
async fn persist_new_plan(
    state: &AppState,
    user_id: DbId,
    generated: &GeneratedPlan,
) -> AppResult<LearningPlan> {
    let plan = PlanRepo::insert(&state.pool, user_id, generated).await?;
    store_goals(state, user_id, generated).await?;

    NotificationRepo::insert(
        &state.pool,
        user_id,
        KIND_STUDY_START,
        &plan_created_content(generated.estimated_days),
    )
    .await?;

    tracing::info!(
        user_id,
        plan_id = plan.id,
        estimated_days = generated.estimated_days,
        "Learning plan created"
    );

    Ok(plan)
}

/// Derive per-style goals from the plan's time distribution and persist them
/// on the user row. Statistics reads them to scope progress windows.
async fn store_goals(state: &AppState, user_id: DbId, generated: &GeneratedPlan) -> AppResult<()> {
    let goals = derive_goals(&generated.time_distribution, Utc::now());
    let value = serde_json::to_value(&goals)
        .map_err(|e| AppError::InternalError(format!("Goal serialization error: {e}")))?;
    UserRepo::update_learning_goals(&state.pool, user_id, &value).await?;
    Ok(())
}
