//! Repository for the `learning_plans` table.

use sqlx::PgPool;

use lingo_core::planning::{distribution_to_json, GeneratedPlan};
use lingo_core::types::DbId;

use crate::models::plan::LearningPlan;

const COLUMNS: &str = "id, user_id, user_level, goal_level, estimated_days, \
                        frequency_description, total_session_duration, \
                        time_distribution, plan_summary, created_at";

/// Provides learning-plan persistence.
pub struct PlanRepo;

impl PlanRepo {
    /// Persist a generated plan, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        plan: &GeneratedPlan,
    ) -> Result<LearningPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO learning_plans
                (user_id, user_level, goal_level, estimated_days,
                 frequency_description, total_session_duration,
                 time_distribution, plan_summary)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningPlan>(&query)
            .bind(user_id)
            .bind(plan.user_level)
            .bind(plan.goal_level)
            .bind(plan.estimated_days)
            .bind(&plan.frequency_description)
            .bind(plan.total_session_duration)
            .bind(distribution_to_json(&plan.time_distribution))
            .bind(&plan.plan_summary)
            .fetch_one(pool)
            .await
    }

    /// Replace an existing plan's generated fields in place.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        plan: &GeneratedPlan,
    ) -> Result<Option<LearningPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE learning_plans SET
                user_level = $2,
                goal_level = $3,
                estimated_days = $4,
                frequency_description = $5,
                total_session_duration = $6,
                time_distribution = $7,
                plan_summary = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningPlan>(&query)
            .bind(id)
            .bind(plan.user_level)
            .bind(plan.goal_level)
            .bind(plan.estimated_days)
            .bind(&plan.frequency_description)
            .bind(plan.total_session_duration)
            .bind(distribution_to_json(&plan.time_distribution))
            .bind(&plan.plan_summary)
            .fetch_optional(pool)
            .await
    }

    /// Find a plan by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LearningPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learning_plans WHERE id = $1");
        sqlx::query_as::<_, LearningPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent plan for a user.
    pub async fn latest_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<LearningPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_plans
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, LearningPlan>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
