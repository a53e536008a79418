//! Repository for community posts, comments, and reports.

use sqlx::PgPool;

use lingo_core::types::DbId;

use crate::models::community::{
    CommunityPost, CreatePost, PostComment, PostReport, UpdatePost,
};

const POST_COLUMNS: &str = "id, user_id, category, title, content, is_deleted, \
                             created_at, updated_at";
const COMMENT_COLUMNS: &str = "id, post_id, user_id, content, created_at, updated_at";
const REPORT_COLUMNS: &str = "id, reporter_id, post_id, comment_id, reason, created_at";

/// Provides post, comment, and report operations. Posts are soft-deleted;
/// every read filters `is_deleted`.
pub struct CommunityRepo;

impl CommunityRepo {
    /// Insert a new post, returning the created row.
    pub async fn create_post(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePost,
    ) -> Result<CommunityPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO community_posts (user_id, category, title, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {POST_COLUMNS}"
        );
        sqlx::query_as::<_, CommunityPost>(&query)
            .bind(user_id)
            .bind(&input.category)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a live post by ID.
    pub async fn find_post(pool: &PgPool, id: DbId) -> Result<Option<CommunityPost>, sqlx::Error> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM community_posts
             WHERE id = $1 AND is_deleted = false"
        );
        sqlx::query_as::<_, CommunityPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live posts, newest first, optionally filtered by category and
    /// a case-insensitive title/content search.
    pub async fn list_posts(
        pool: &PgPool,
        category: Option<&str>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommunityPost>, sqlx::Error> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM community_posts
             WHERE is_deleted = false
               AND ($1::text IS NULL OR category = $1)
               AND ($2::text IS NULL
                    OR title ILIKE '%' || $2 || '%'
                    OR content ILIKE '%' || $2 || '%')
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, CommunityPost>(&query)
            .bind(category)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Edit a live post. Only non-`None` fields are applied.
    pub async fn update_post(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<CommunityPost>, sqlx::Error> {
        let query = format!(
            "UPDATE community_posts SET
                category = COALESCE($2, category),
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = false
             RETURNING {POST_COLUMNS}"
        );
        sqlx::query_as::<_, CommunityPost>(&query)
            .bind(id)
            .bind(&input.category)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a post. Returns `true` if the row was updated.
    pub async fn soft_delete_post(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE community_posts SET is_deleted = true, updated_at = NOW()
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count live posts. Used by the admin dashboard.
    pub async fn count_posts(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM community_posts WHERE is_deleted = false")
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Insert a comment, returning the created row.
    pub async fn create_comment(
        pool: &PgPool,
        post_id: DbId,
        user_id: DbId,
        content: &str,
    ) -> Result<PostComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO post_comments (post_id, user_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, PostComment>(&query)
            .bind(post_id)
            .bind(user_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Comments on a post, oldest first.
    pub async fn comments_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<PostComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM post_comments
             WHERE post_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, PostComment>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Find a comment by ID.
    pub async fn find_comment(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PostComment>, sqlx::Error> {
        let query = format!("SELECT {COMMENT_COLUMNS} FROM post_comments WHERE id = $1");
        sqlx::query_as::<_, PostComment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a comment's content.
    pub async fn update_comment(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<PostComment>, sqlx::Error> {
        let query = format!(
            "UPDATE post_comments SET content = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, PostComment>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment. Returns `true` if deleted.
    pub async fn delete_comment(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM post_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// File a report against a post or a comment.
    pub async fn create_report(
        pool: &PgPool,
        reporter_id: DbId,
        post_id: Option<DbId>,
        comment_id: Option<DbId>,
        reason: &str,
    ) -> Result<PostReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO post_reports (reporter_id, post_id, comment_id, reason)
             VALUES ($1, $2, $3, $4)
             RETURNING {REPORT_COLUMNS}"
        );
        sqlx::query_as::<_, PostReport>(&query)
            .bind(reporter_id)
            .bind(post_id)
            .bind(comment_id)
            .bind(reason)
            .fetch_one(pool)
            .await
    }

    /// All reports, newest first. Admin-only at the API layer.
    pub async fn list_reports(pool: &PgPool) -> Result<Vec<PostReport>, sqlx::Error> {
        let query = format!(
            "SELECT {REPORT_COLUMNS} FROM post_reports ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PostReport>(&query).fetch_all(pool).await
    }

    /// Count filed reports. Used by the admin dashboard.
    pub async fn count_reports(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM post_reports")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
