//! Repository for study groups, memberships, join requests, and chat.
//!
//! Capacity checks are folded into the member INSERT itself so two
//! concurrent joins can never overshoot `max_members`, and join-request
//! approval re-checks capacity in the same transaction as the insert.

use sqlx::PgPool;

use lingo_core::groups::{
    JOIN_STATUS_APPROVED, JOIN_STATUS_REJECTED, MEMBER_ROLE_MEMBER, MEMBER_ROLE_OWNER,
};
use lingo_core::types::DbId;

use crate::models::group::{
    CreateGroup, GroupMemberInfo, GroupMessageInfo, GroupSummary, JoinRequest, JoinRequestInfo,
    StudyGroup,
};

const GROUP_COLUMNS: &str = "id, name, description, created_by, max_members, \
                              requires_approval, is_active, created_at";
const REQUEST_COLUMNS: &str = "id, group_id, user_id, status, created_at, resolved_at";

/// Summary projection shared by the list and detail queries. `$1` is the
/// viewing user.
const SUMMARY_SELECT: &str = "SELECT g.id, g.name, g.description, g.created_by,
            u.name AS creator_name,
            g.max_members, g.requires_approval,
            (SELECT COUNT(*) FROM group_members m WHERE m.group_id = g.id) AS member_count,
            EXISTS(SELECT 1 FROM group_members m
                   WHERE m.group_id = g.id AND m.user_id = $1) AS is_member,
            (g.created_by = $1) AS is_owner,
            g.created_at
     FROM study_groups g
     JOIN users u ON u.id = g.created_by
     WHERE g.is_active = true";

/// Member INSERT guarded by the group's capacity. Inserts nothing when the
/// group is missing, inactive, or full.
const GUARDED_MEMBER_INSERT: &str = "INSERT INTO group_members (group_id, user_id, role)
     SELECT g.id, $2, $3
     FROM study_groups g
     WHERE g.id = $1
       AND g.is_active = true
       AND (SELECT COUNT(*) FROM group_members m WHERE m.group_id = g.id) < g.max_members";

/// Result of a join-request approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// Request approved and the member row inserted.
    Approved { group_id: DbId, user_id: DbId },
    /// The request was not pending anymore.
    AlreadyResolved,
    /// The group filled up since the request was made. The request is left
    /// pending.
    GroupFull { group_id: DbId, user_id: DbId },
}

/// Provides study-group operations.
pub struct GroupRepo;

impl GroupRepo {
    /// Create a group and enroll the creator as its owner in one
    /// transaction.
    pub async fn create_with_owner(
        pool: &PgPool,
        creator_id: DbId,
        input: &CreateGroup,
        max_members: i32,
    ) -> Result<StudyGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO study_groups (name, description, created_by, max_members, requires_approval)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {GROUP_COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let group = sqlx::query_as::<_, StudyGroup>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(creator_id)
            .bind(max_members)
            .bind(input.requires_approval.unwrap_or(false))
            .fetch_one(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO group_members (group_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(group.id)
            .bind(creator_id)
            .bind(MEMBER_ROLE_OWNER)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(group)
    }

    /// Active groups, newest first, with membership facts for the viewer.
    pub async fn list_active(
        pool: &PgPool,
        viewer_id: DbId,
    ) -> Result<Vec<GroupSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} ORDER BY g.created_at DESC");
        sqlx::query_as::<_, GroupSummary>(&query)
            .bind(viewer_id)
            .fetch_all(pool)
            .await
    }

    /// One active group's summary for the viewer.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
        viewer_id: DbId,
    ) -> Result<Option<GroupSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} AND g.id = $2");
        sqlx::query_as::<_, GroupSummary>(&query)
            .bind(viewer_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active group row.
    pub async fn find_active(pool: &PgPool, id: DbId) -> Result<Option<StudyGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {GROUP_COLUMNS} FROM study_groups WHERE id = $1 AND is_active = true"
        );
        sqlx::query_as::<_, StudyGroup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The caller's role in a group, if a member.
    pub async fn member_role(
        pool: &PgPool,
        group_id: DbId,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT role FROM group_members WHERE group_id = $1 AND user_id = $2")
                .bind(group_id)
                .bind(user_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(role,)| role))
    }

    /// Join an open group. The capacity check and the insert are one
    /// statement; `false` means the group was full (or gone). Joining a
    /// group twice violates `uq_group_members_group_user`.
    pub async fn join_group(
        pool: &PgPool,
        group_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(GUARDED_MEMBER_INSERT)
            .bind(group_id)
            .bind(user_id)
            .bind(MEMBER_ROLE_MEMBER)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a membership. Returns `true` if a row was deleted.
    pub async fn remove_member(
        pool: &PgPool,
        group_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM group_members WHERE group_id = $1 AND user_id = $2")
                .bind(group_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Member list with display names, in join order.
    pub async fn members_with_names(
        pool: &PgPool,
        group_id: DbId,
    ) -> Result<Vec<GroupMemberInfo>, sqlx::Error> {
        sqlx::query_as::<_, GroupMemberInfo>(
            "SELECT m.user_id, u.name, m.role, m.joined_at
             FROM group_members m
             JOIN users u ON u.id = m.user_id
             WHERE m.group_id = $1
             ORDER BY m.joined_at ASC",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }

    /// Soft-delete a group. Returns `true` if the row was updated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE study_groups SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count active groups. Used by the admin dashboard.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM study_groups WHERE is_active = true")
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    // -----------------------------------------------------------------------
    // Join requests
    // -----------------------------------------------------------------------

    /// File a join request. A second pending request violates the partial
    /// unique index `uq_group_join_requests_pending`.
    pub async fn create_join_request(
        pool: &PgPool,
        group_id: DbId,
        user_id: DbId,
    ) -> Result<JoinRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO group_join_requests (group_id, user_id)
             VALUES ($1, $2)
             RETURNING {REQUEST_COLUMNS}"
        );
        sqlx::query_as::<_, JoinRequest>(&query)
            .bind(group_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Pending requests for a group with requester names, oldest first.
    pub async fn pending_requests(
        pool: &PgPool,
        group_id: DbId,
    ) -> Result<Vec<JoinRequestInfo>, sqlx::Error> {
        sqlx::query_as::<_, JoinRequestInfo>(
            "SELECT r.id, r.user_id, u.name AS requester_name, r.created_at
             FROM group_join_requests r
             JOIN users u ON u.id = r.user_id
             WHERE r.group_id = $1 AND r.status = 'pending'
             ORDER BY r.created_at ASC",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }

    /// Find a request by ID.
    pub async fn find_request(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<JoinRequest>, sqlx::Error> {
        let query = format!("SELECT {REQUEST_COLUMNS} FROM group_join_requests WHERE id = $1");
        sqlx::query_as::<_, JoinRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approve a pending request and insert the member row in one
    /// transaction, re-checking capacity at insert time.
    ///
    /// If the group has filled up, the transaction rolls back so the
    /// request stays pending for a later retry.
    pub async fn approve_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<ApprovalOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let flipped: Option<(DbId, DbId)> = sqlx::query_as(
            "UPDATE group_join_requests
             SET status = $2, resolved_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING group_id, user_id",
        )
        .bind(request_id)
        .bind(JOIN_STATUS_APPROVED)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((group_id, user_id)) = flipped else {
            tx.rollback().await?;
            return Ok(ApprovalOutcome::AlreadyResolved);
        };

        let inserted = sqlx::query(GUARDED_MEMBER_INSERT)
            .bind(group_id)
            .bind(user_id)
            .bind(MEMBER_ROLE_MEMBER)
            .execute(&mut *tx)
            .await?;

        if inserted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(ApprovalOutcome::GroupFull { group_id, user_id });
        }

        tx.commit().await?;
        Ok(ApprovalOutcome::Approved { group_id, user_id })
    }

    /// Reject a pending request. Returns the requester ids, or `None` when
    /// the request was already resolved.
    pub async fn reject_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Option<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as(
            "UPDATE group_join_requests
             SET status = $2, resolved_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING group_id, user_id",
        )
        .bind(request_id)
        .bind(JOIN_STATUS_REJECTED)
        .fetch_optional(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------------

    /// Post a chat message, returning it with the sender's name resolved.
    pub async fn insert_message(
        pool: &PgPool,
        group_id: DbId,
        user_id: DbId,
        content: &str,
    ) -> Result<GroupMessageInfo, sqlx::Error> {
        sqlx::query_as::<_, GroupMessageInfo>(
            "WITH inserted AS (
                 INSERT INTO group_messages (group_id, user_id, content)
                 VALUES ($1, $2, $3)
                 RETURNING id, group_id, user_id, content, created_at
             )
             SELECT i.id, i.group_id, i.user_id, u.name AS sender_name,
                    i.content, i.created_at
             FROM inserted i
             JOIN users u ON u.id = i.user_id",
        )
        .bind(group_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// Chat history with sender names, oldest first.
    pub async fn messages_with_names(
        pool: &PgPool,
        group_id: DbId,
    ) -> Result<Vec<GroupMessageInfo>, sqlx::Error> {
        sqlx::query_as::<_, GroupMessageInfo>(
            "SELECT m.id, m.group_id, m.user_id, u.name AS sender_name,
                    m.content, m.created_at
             FROM group_messages m
             JOIN users u ON u.id = m.user_id
             WHERE m.group_id = $1
             ORDER BY m.created_at ASC",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }
}
