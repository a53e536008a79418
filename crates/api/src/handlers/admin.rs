//! Handlers for the `/admin` resource.

use axum::extract::State;
use axum::Json;
use lingo_db::repositories::{CommunityRepo, GroupRepo, UserRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardCounts {
    pub users: i64,
    pub active_study_groups: i64,
    pub community_posts: i64,
    pub open_reports: i64,
}

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardCounts>> {
    let users = UserRepo::count(&state.pool).await?;
    let active_study_groups = GroupRepo::count_active(&state.pool).await?;
    let community_posts = CommunityRepo::count_posts(&state.pool).await?;
    let open_reports = CommunityRepo::count_reports(&state.pool).await?;

    Ok(Json(DashboardCounts {
        users,
        active_study_groups,
        community_posts,
        open_reports,
    }))
}
