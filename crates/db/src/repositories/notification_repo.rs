//! Repository for the `notifications` table.

use sqlx::PgPool;

use lingo_core::types::DbId;

use crate::models::notification::Notification;

const COLUMNS: &str = "id, user_id, kind, content, is_read, read_at, created_at";

/// Provides notification creation and read-state operations.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification for a user, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        kind: &str,
        content: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, kind, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(kind)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// A user's notifications, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark an owned notification as read, returning the updated row.
    ///
    /// Returns `None` when the notification does not exist or belongs to
    /// someone else. Re-reading an already-read notification keeps its
    /// original `read_at`.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications
             SET is_read = true, read_at = COALESCE(read_at, NOW())
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
