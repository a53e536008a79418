pub mod admin;
pub mod attendance;
pub mod auth;
pub mod challenges;
pub mod community;
pub mod faqs;
pub mod grammar;
pub mod health;
pub mod level_tests;
pub mod notices;
pub mod notifications;
pub mod plans;
pub mod points;
pub mod pronunciation;
pub mod statistics;
pub mod study_groups;
pub mod users;
pub mod vocabulary;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /users/me                                        profile get, update
/// /users/me/password                               change password (PATCH)
/// /users/me/delete                                 deactivate account (POST)
/// /users/me/settings                               update settings (PATCH)
///
/// /admin/dashboard                                 service counters (admin only)
///
/// /level-tests/questions                           random question sample
/// /level-tests/submit                              grade answers (POST)
/// /level-tests/results                             own result history
///
/// /plans                                           create direct plan (POST)
/// /plans/templates                                 template catalog
/// /plans/select-template                           plan from template (POST)
/// /plans/latest                                    latest plan
/// /plans/{plan_id}                                 edit latest plan (PUT)
///
/// /statistics/logs                                 record learning log (POST)
/// /statistics/{user_id}                            totals + goal progress
///
/// /attendance/check-in                             daily check-in (POST)
/// /attendance/history                              check-in dates
/// /attendance/stats                                totals + longest streak
///
/// /vocabulary/wordbooks                            list, create
/// /vocabulary/wordbooks/{id}                       get (with words), delete
/// /vocabulary/wordbooks/{id}/words                 add word (POST)
/// /vocabulary/wordbooks/{id}/words/batch           add words (POST)
/// /vocabulary/words/{id}                           update, memorize, delete
/// /vocabulary/words/{id}/favorite                  toggle favorite (PATCH)
/// /vocabulary/words                                filter by status
/// /vocabulary/favorites                            favorite words
/// /vocabulary/stats                                memorization counters
///
/// /community/posts                                 list, create
/// /community/posts/{id}                            get, update, delete
/// /community/posts/{id}/comments                   list, create
/// /community/comments/{id}                         update, delete
/// /community/reports                               file (POST), list (admin)
///
/// /study-groups                                    list, create
/// /study-groups/{id}                               get, delete (owner)
/// /study-groups/{id}/join                          join or request (POST)
/// /study-groups/{id}/leave                         leave (DELETE)
/// /study-groups/{id}/members                       member list (members)
/// /study-groups/{id}/messages                      chat read, send (members)
/// /study-groups/{id}/requests                      pending requests (owner)
/// /study-groups/{id}/requests/{rid}/approve        approve (owner, POST)
/// /study-groups/{id}/requests/{rid}/reject         reject (owner, POST)
/// /study-groups/{id}/challenges                    list (members), create (owner)
///
/// /challenges/{id}                                 detail, update, delete
/// /challenges/log-progress                         credit progress (POST)
/// /challenges/{id}/submissions                     list, submit proof
/// /challenges/submissions/{id}                     edit, withdraw
/// /challenges/submissions/{id}/process             approve/reject (owner, POST)
///
/// /notices                                         list, create (admin)
/// /notices/{id}                                    get, update, delete (admin)
///
/// /faqs                                            list, create (admin)
/// /faqs/{id}                                       get, update, delete (admin)
///
/// /notifications                                   own list
/// /notifications/{id}/read                         mark read (PATCH)
///
/// /points/transaction                              balance change (POST)
/// /points/history                                  own ledger
///
/// /grammar/history                                 list, record
/// /grammar/statistics                              accuracy aggregates
/// /grammar/history/{id}/favorite                   toggle favorite (PATCH)
/// /grammar/favorites                               favorite sessions
///
/// /pronunciation/history                           summaries
/// /pronunciation/history/{id}                      detail, delete
/// /pronunciation/statistics                        score averages
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Account and session routes.
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/admin", admin::router())
        // Assessment and planning.
        .nest("/level-tests", level_tests::router())
        .nest("/plans", plans::router())
        .nest("/statistics", statistics::router())
        .nest("/attendance", attendance::router())
        .nest("/vocabulary", vocabulary::router())
        // Social features.
        .nest("/community", community::router())
        .nest("/study-groups", study_groups::router())
        .nest("/challenges", challenges::router())
        // Content and engagement.
        .nest("/notices", notices::router())
        .nest("/faqs", faqs::router())
        .nest("/notifications", notifications::router())
        .nest("/points", points::router())
        // Practice history.
        .nest("/grammar", grammar::router())
        .nest("/pronunciation", pronunciation::router())
}
