//! Repository for group challenges, participant progress, and proof
//! submissions.
//!
//! Progress writes clamp to the challenge target inside the upsert, and
//! submission processing pairs the status flip with the participant's
//! completion credit in one transaction.

use sqlx::PgPool;

use lingo_core::challenges::{
    SUBMISSION_STATUS_APPROVED, SUBMISSION_STATUS_PENDING, SUBMISSION_STATUS_REJECTED,
};
use lingo_core::types::DbId;

use crate::models::challenge::{
    ChallengeSubmission, ChallengeWithProgress, CreateChallenge, CreateSubmission, GroupChallenge,
    LeaderboardEntry, UpdateChallenge,
};

const CHALLENGE_COLUMNS: &str = "id, group_id, created_by, title, description, \
                                  challenge_type, target_value, end_date, is_active, created_at";
const SUBMISSION_COLUMNS: &str = "id, challenge_id, user_id, proof_content, \
                                   proof_image_url, status, submitted_at, resolved_at";

/// Provides challenge operations.
pub struct ChallengeRepo;

impl ChallengeRepo {
    /// Insert a new challenge. `end_date` is `now` plus the duration.
    pub async fn create(
        pool: &PgPool,
        group_id: DbId,
        created_by: DbId,
        input: &CreateChallenge,
        duration_days: i32,
    ) -> Result<GroupChallenge, sqlx::Error> {
        let query = format!(
            "INSERT INTO group_challenges
                (group_id, created_by, title, description, challenge_type,
                 target_value, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, NOW() + make_interval(days => $7))
             RETURNING {CHALLENGE_COLUMNS}"
        );
        sqlx::query_as::<_, GroupChallenge>(&query)
            .bind(group_id)
            .bind(created_by)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(&input.challenge_type)
            .bind(input.target_value)
            .bind(duration_days)
            .fetch_one(pool)
            .await
    }

    /// A group's challenges, latest end date first, each with the summed
    /// progress of all participants.
    pub async fn list_for_group(
        pool: &PgPool,
        group_id: DbId,
    ) -> Result<Vec<ChallengeWithProgress>, sqlx::Error> {
        sqlx::query_as::<_, ChallengeWithProgress>(
            "SELECT c.id, c.group_id, c.created_by, c.title, c.description,
                    c.challenge_type, c.target_value, c.end_date, c.is_active,
                    c.created_at,
                    COALESCE(SUM(p.current_value), 0) AS group_current_value
             FROM group_challenges c
             LEFT JOIN challenge_participants p ON p.challenge_id = c.id
             WHERE c.group_id = $1 AND c.is_active = true
             GROUP BY c.id
             ORDER BY c.end_date DESC",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }

    /// Find an active challenge by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GroupChallenge>, sqlx::Error> {
        let query = format!(
            "SELECT {CHALLENGE_COLUMNS} FROM group_challenges
             WHERE id = $1 AND is_active = true"
        );
        sqlx::query_as::<_, GroupChallenge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Edit a challenge. Absent fields are left as-is; an explicit null
    /// description clears the stored one.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateChallenge,
    ) -> Result<Option<GroupChallenge>, sqlx::Error> {
        let query = format!(
            "UPDATE group_challenges SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                target_value = COALESCE($5, target_value)
             WHERE id = $1 AND is_active = true
             RETURNING {CHALLENGE_COLUMNS}"
        );
        sqlx::query_as::<_, GroupChallenge>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.target_value)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a challenge. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE group_challenges SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Progress
    // -----------------------------------------------------------------------

    /// Credit `value` toward every live challenge of the given type in the
    /// user's groups. Progress never exceeds the challenge target; the
    /// clamp happens inside the upsert so concurrent credits stay within
    /// bounds. Returns the number of challenges credited.
    pub async fn log_progress(
        pool: &PgPool,
        user_id: DbId,
        log_type: &str,
        value: i32,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO challenge_participants
                 (challenge_id, user_id, current_value, updated_at)
             SELECT c.id, $1, LEAST($3, c.target_value), NOW()
             FROM group_challenges c
             JOIN group_members m ON m.group_id = c.group_id AND m.user_id = $1
             WHERE c.challenge_type = $2
               AND c.is_active = true
               AND c.end_date > NOW()
             ON CONFLICT ON CONSTRAINT uq_challenge_participants_challenge_user
             DO UPDATE SET
                 current_value = LEAST(
                     challenge_participants.current_value + $3,
                     (SELECT target_value FROM group_challenges
                      WHERE id = challenge_participants.challenge_id)),
                 updated_at = NOW()",
        )
        .bind(user_id)
        .bind(log_type)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Participants ranked by progress, with display names.
    pub async fn leaderboard(
        pool: &PgPool,
        challenge_id: DbId,
    ) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT p.user_id, u.name, p.current_value, p.status, p.completed_at
             FROM challenge_participants p
             JOIN users u ON u.id = p.user_id
             WHERE p.challenge_id = $1
             ORDER BY p.current_value DESC, p.updated_at ASC",
        )
        .bind(challenge_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Submissions
    // -----------------------------------------------------------------------

    /// File a proof submission. A second pending or approved submission
    /// violates the partial unique index `uq_challenge_submissions_open`.
    pub async fn create_submission(
        pool: &PgPool,
        challenge_id: DbId,
        user_id: DbId,
        input: &CreateSubmission,
    ) -> Result<ChallengeSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO challenge_submissions
                (challenge_id, user_id, proof_content, proof_image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {SUBMISSION_COLUMNS}"
        );
        sqlx::query_as::<_, ChallengeSubmission>(&query)
            .bind(challenge_id)
            .bind(user_id)
            .bind(&input.proof_content)
            .bind(&input.proof_image_url)
            .fetch_one(pool)
            .await
    }

    /// All submissions for a challenge, newest first.
    pub async fn submissions_for_challenge(
        pool: &PgPool,
        challenge_id: DbId,
    ) -> Result<Vec<ChallengeSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM challenge_submissions
             WHERE challenge_id = $1
             ORDER BY submitted_at DESC"
        );
        sqlx::query_as::<_, ChallengeSubmission>(&query)
            .bind(challenge_id)
            .fetch_all(pool)
            .await
    }

    /// One user's submissions for a challenge, newest first.
    pub async fn own_submissions(
        pool: &PgPool,
        challenge_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<ChallengeSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM challenge_submissions
             WHERE challenge_id = $1 AND user_id = $2
             ORDER BY submitted_at DESC"
        );
        sqlx::query_as::<_, ChallengeSubmission>(&query)
            .bind(challenge_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a submission by ID.
    pub async fn find_submission(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ChallengeSubmission>, sqlx::Error> {
        let query = format!("SELECT {SUBMISSION_COLUMNS} FROM challenge_submissions WHERE id = $1");
        sqlx::query_as::<_, ChallengeSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a pending submission. On approval the submitter's
    /// participant row is upserted to `completed` in the same transaction.
    ///
    /// Returns `None` when the submission was not pending (already
    /// resolved, or gone).
    pub async fn process_submission(
        pool: &PgPool,
        id: DbId,
        approve: bool,
    ) -> Result<Option<ChallengeSubmission>, sqlx::Error> {
        let status = if approve {
            SUBMISSION_STATUS_APPROVED
        } else {
            SUBMISSION_STATUS_REJECTED
        };
        let query = format!(
            "UPDATE challenge_submissions
             SET status = $2, resolved_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {SUBMISSION_COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let submission = sqlx::query_as::<_, ChallengeSubmission>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(submission) = submission else {
            tx.rollback().await?;
            return Ok(None);
        };

        if approve {
            sqlx::query(
                "INSERT INTO challenge_participants
                     (challenge_id, user_id, status, completed_at, updated_at)
                 VALUES ($1, $2, 'completed', NOW(), NOW())
                 ON CONFLICT ON CONSTRAINT uq_challenge_participants_challenge_user
                 DO UPDATE SET status = 'completed', completed_at = NOW(), updated_at = NOW()",
            )
            .bind(submission.challenge_id)
            .bind(submission.user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(submission))
    }

    /// Replace a submission's proof and reset it to pending, revoking any
    /// completion credit in the same transaction.
    pub async fn reset_submission(
        pool: &PgPool,
        id: DbId,
        input: &CreateSubmission,
    ) -> Result<Option<ChallengeSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE challenge_submissions
             SET proof_content = $2, proof_image_url = $3,
                 status = $4, submitted_at = NOW(), resolved_at = NULL
             WHERE id = $1
             RETURNING {SUBMISSION_COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let submission = sqlx::query_as::<_, ChallengeSubmission>(&query)
            .bind(id)
            .bind(&input.proof_content)
            .bind(&input.proof_image_url)
            .bind(SUBMISSION_STATUS_PENDING)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(submission) = submission else {
            tx.rollback().await?;
            return Ok(None);
        };

        Self::revoke_completion(&mut tx, submission.challenge_id, submission.user_id).await?;
        tx.commit().await?;
        Ok(Some(submission))
    }

    /// Delete a submission, revoking any completion credit in the same
    /// transaction. Returns `true` if a row was deleted.
    pub async fn delete_submission(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let deleted: Option<(DbId, DbId)> = sqlx::query_as(
            "DELETE FROM challenge_submissions WHERE id = $1 RETURNING challenge_id, user_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((challenge_id, user_id)) = deleted else {
            tx.rollback().await?;
            return Ok(false);
        };

        Self::revoke_completion(&mut tx, challenge_id, user_id).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn revoke_completion(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        challenge_id: DbId,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE challenge_participants
             SET status = 'in_progress', completed_at = NULL, updated_at = NOW()
             WHERE challenge_id = $1 AND user_id = $2 AND status = 'completed'",
        )
        .bind(challenge_id)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
