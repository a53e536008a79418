//! Handlers for the `/study-groups` resource.
//!
//! Covers the group lifecycle, membership, join-request approval, and the
//! group chat. Capacity-sensitive writes (open joins, approvals) go through
//! [`GroupRepo`] operations that fold the capacity check into the insert, so
//! these handlers only translate outcomes into HTTP statuses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lingo_core::error::CoreError;
use lingo_core::groups::{
    validate_group_fields, validate_message_content, DEFAULT_GROUP_MEMBERS, JOIN_STATUS_PENDING,
};
use lingo_core::notifications::{join_resolved_content, KIND_GROUP};
use lingo_core::types::DbId;
use lingo_db::models::group::{
    CreateGroup, GroupMemberInfo, GroupMessageInfo, GroupSummary, JoinRequestInfo, StudyGroup,
};
use lingo_db::repositories::group_repo::ApprovalOutcome;
use lingo_db::repositories::{GroupRepo, NotificationRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /study-groups/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

/// Response for `POST /study-groups/{id}/join`.
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub status: &'static str,
}

/// Response for approving or rejecting a join request.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// Group lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/study-groups
///
/// Creates the group and enrolls the creator as owner atomically.
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateGroup>,
) -> AppResult<(StatusCode, Json<GroupSummary>)> {
    let max_members = input.max_members.unwrap_or(DEFAULT_GROUP_MEMBERS);
    validate_group_fields(&input.name, input.description.as_deref(), max_members)?;

    let group = GroupRepo::create_with_owner(&state.pool, auth.user_id, &input, max_members).await?;

    tracing::info!(group_id = group.id, owner_id = auth.user_id, "Study group created");

    let summary = GroupRepo::find_summary(&state.pool, group.id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created group not visible".into()))?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /api/v1/study-groups
pub async fn list_groups(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<GroupSummary>>> {
    let groups = GroupRepo::list_active(&state.pool, auth.user_id).await?;
    Ok(Json(groups))
}

/// GET /api/v1/study-groups/{id}
pub async fn get_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<GroupSummary>> {
    let summary = GroupRepo::find_summary(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Study group",
            id,
        }))?;
    Ok(Json(summary))
}

/// DELETE /api/v1/study-groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let group = require_group(&state, id).await?;
    require_owner(&group, &auth, "Only the group owner can delete the group")?;

    GroupRepo::soft_delete(&state.pool, id).await?;

    tracing::info!(group_id = id, owner_id = auth.user_id, "Study group deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// POST /api/v1/study-groups/{id}/join
///
/// Approval-gated groups get a pending request; open groups admit the
/// caller immediately if capacity allows.
pub async fn join_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<JoinResponse>> {
    let group = require_group(&state, id).await?;

    if GroupRepo::member_role(&state.pool, group.id, auth.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Already a member of this study group".into(),
        )));
    }

    if group.requires_approval {
        match GroupRepo::create_join_request(&state.pool, group.id, auth.user_id).await {
            Ok(request) => {
                tracing::info!(
                    group_id = group.id,
                    request_id = request.id,
                    user_id = auth.user_id,
                    "Join request filed"
                );
                Ok(Json(JoinResponse {
                    status: JOIN_STATUS_PENDING,
                }))
            }
            Err(sqlx::Error::Database(e))
                if e.constraint() == Some("uq_group_join_requests_pending") =>
            {
                Err(AppError::Core(CoreError::Conflict(
                    "A join request for this group is already pending".into(),
                )))
            }
            Err(e) => Err(e.into()),
        }
    } else {
        match GroupRepo::join_group(&state.pool, group.id, auth.user_id).await {
            Ok(true) => {
                tracing::info!(group_id = group.id, user_id = auth.user_id, "Member joined");
                Ok(Json(JoinResponse { status: "joined" }))
            }
            Ok(false) => Err(AppError::Core(CoreError::Conflict(
                "Study group is full".into(),
            ))),
            Err(sqlx::Error::Database(e))
                if e.constraint() == Some("uq_group_members_group_user") =>
            {
                Err(AppError::Core(CoreError::Conflict(
                    "Already a member of this study group".into(),
                )))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// DELETE /api/v1/study-groups/{id}/leave
pub async fn leave_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let group = require_group(&state, id).await?;

    if group.created_by == auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "The group owner cannot leave the group".into(),
        )));
    }

    let removed = GroupRepo::remove_member(&state.pool, group.id, auth.user_id).await?;
    if !removed {
        return Err(AppError::NotFound(
            "You are not a member of this study group".into(),
        ));
    }

    tracing::info!(group_id = group.id, user_id = auth.user_id, "Member left");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/study-groups/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<GroupMemberInfo>>> {
    let group = require_group(&state, id).await?;
    require_member(&state, &group, &auth, "Only group members can view the member list").await?;

    let members = GroupRepo::members_with_names(&state.pool, group.id).await?;
    Ok(Json(members))
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// GET /api/v1/study-groups/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<GroupMessageInfo>>> {
    let group = require_group(&state, id).await?;
    require_member(&state, &group, &auth, "Only group members can view messages").await?;

    let messages = GroupRepo::messages_with_names(&state.pool, group.id).await?;
    Ok(Json(messages))
}

/// POST /api/v1/study-groups/{id}/messages
pub async fn post_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<MessageRequest>,
) -> AppResult<(StatusCode, Json<GroupMessageInfo>)> {
    validate_message_content(&input.content)?;

    let group = require_group(&state, id).await?;
    require_member(&state, &group, &auth, "Only group members can send messages").await?;

    let message =
        GroupRepo::insert_message(&state.pool, group.id, auth.user_id, input.content.trim())
            .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

// ---------------------------------------------------------------------------
// Join requests
// ---------------------------------------------------------------------------

/// GET /api/v1/study-groups/{id}/requests
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<JoinRequestInfo>>> {
    let group = require_group(&state, id).await?;
    require_owner(&group, &auth, "Only the group owner can view join requests")?;

    let requests = GroupRepo::pending_requests(&state.pool, group.id).await?;
    Ok(Json(requests))
}

/// POST /api/v1/study-groups/{id}/requests/{request_id}/approve
///
/// Approval flips the request and inserts the member row in one
/// transaction; if the group filled up in the meantime the request stays
/// pending and the caller gets a 409.
pub async fn approve_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, request_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ResolveResponse>> {
    let group = require_group(&state, id).await?;
    require_owner(&group, &auth, "Only the group owner can resolve join requests")?;
    require_request_in_group(&state, request_id, group.id).await?;

    match GroupRepo::approve_request(&state.pool, request_id).await? {
        ApprovalOutcome::Approved { user_id, .. } => {
            NotificationRepo::insert(
                &state.pool,
                user_id,
                KIND_GROUP,
                &join_resolved_content(&group.name, true),
            )
            .await?;

            tracing::info!(
                group_id = group.id,
                request_id,
                user_id,
                "Join request approved"
            );
            Ok(Json(ResolveResponse { status: "approved" }))
        }
        ApprovalOutcome::AlreadyResolved => Err(AppError::Core(CoreError::Conflict(
            "Join request has already been resolved".into(),
        ))),
        ApprovalOutcome::GroupFull { .. } => Err(AppError::Core(CoreError::Conflict(
            "Study group is full".into(),
        ))),
    }
}

/// POST /api/v1/study-groups/{id}/requests/{request_id}/reject
pub async fn reject_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, request_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ResolveResponse>> {
    let group = require_group(&state, id).await?;
    require_owner(&group, &auth, "Only the group owner can resolve join requests")?;
    require_request_in_group(&state, request_id, group.id).await?;

    let Some((_, requester_id)) = GroupRepo::reject_request(&state.pool, request_id).await? else {
        return Err(AppError::Core(CoreError::Conflict(
            "Join request has already been resolved".into(),
        )));
    };

    NotificationRepo::insert(
        &state.pool,
        requester_id,
        KIND_GROUP,
        &join_resolved_content(&group.name, false),
    )
    .await?;

    tracing::info!(
        group_id = group.id,
        request_id,
        user_id = requester_id,
        "Join request rejected"
    );
    Ok(Json(ResolveResponse { status: "rejected" }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(super) async fn require_group(state: &AppState, id: DbId) -> AppResult<StudyGroup> {
    GroupRepo::find_active(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Study group",
            id,
        }))
}

pub(super) fn require_owner(group: &StudyGroup, auth: &AuthUser, message: &str) -> AppResult<()> {
    if group.created_by != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(())
}

pub(super) async fn require_member(
    state: &AppState,
    group: &StudyGroup,
    auth: &AuthUser,
    message: &str,
) -> AppResult<()> {
    if GroupRepo::member_role(&state.pool, group.id, auth.user_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(())
}

async fn require_request_in_group(
    state: &AppState,
    request_id: DbId,
    group_id: DbId,
) -> AppResult<()> {
    GroupRepo::find_request(&state.pool, request_id)
        .await?
        .filter(|r| r.group_id == group_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Join request",
            id: request_id,
        }))?;
    Ok(())
}
