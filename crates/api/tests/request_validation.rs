//! Routed input-validation tests across API resources.
//!
//! Each request here is rejected by handler-level validation before any
//! repository call, so the tests run through the full router without a
//! database. Together they pin down the status code and error body a client
//! sees for bad input on every major resource.

mod common;

use axum::http::StatusCode;
use common::{auth_token, body_json, post_json_auth};
use serde_json::json;

// ---------------------------------------------------------------------------
// Community
// ---------------------------------------------------------------------------

/// An empty post title is rejected with 400.
#[tokio::test]
async fn post_with_empty_title_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "category": "free", "title": "   ", "content": "hello" });
    let response = post_json_auth(app, "/api/v1/community/posts", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Post title must be between 1 and 200 characters");
}

/// An over-long post title is rejected with the same message.
#[tokio::test]
async fn post_with_over_long_title_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "category": "free", "title": "x".repeat(201), "content": "hello" });
    let response = post_json_auth(app, "/api/v1/community/posts", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Post title must be between 1 and 200 characters");
}

/// An empty comment is rejected with 400.
#[tokio::test]
async fn empty_comment_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "content": "" });
    let response =
        post_json_auth(app, "/api/v1/community/posts/1/comments", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Comment content must be between 1 and 1000 characters"
    );
}

// ---------------------------------------------------------------------------
// Study groups
// ---------------------------------------------------------------------------

/// A one-character group name fails validation.
#[tokio::test]
async fn group_with_short_name_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "name": "x" });
    let response = post_json_auth(app, "/api/v1/study-groups", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "Group name must be between 2 and 100 characters"
    );
}

/// A group capacity above the cap fails validation.
#[tokio::test]
async fn group_with_excessive_capacity_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "name": "Evening TOPIK study", "max_members": 500 });
    let response = post_json_auth(app, "/api/v1/study-groups", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Group capacity must be between 2 and 50 members"
    );
}

// ---------------------------------------------------------------------------
// Challenges
// ---------------------------------------------------------------------------

/// Logging progress with an unknown activity type is rejected.
#[tokio::test]
async fn progress_log_with_unknown_type_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "log_type": "meditation", "value": 5 });
    let response = post_json_auth(app, "/api/v1/challenges/log-progress", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "Invalid log type 'meditation'. Must be one of: conversation, grammar, pronunciation"
    );
}

/// Logging a non-positive progress value is rejected.
#[tokio::test]
async fn progress_log_with_zero_value_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "log_type": "grammar", "value": 0 });
    let response = post_json_auth(app, "/api/v1/challenges/log-progress", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Progress value must be greater than zero");
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

/// A zero-amount point transaction is rejected.
#[tokio::test]
async fn zero_point_transaction_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "amount": 0, "reason": "typo" });
    let response = post_json_auth(app, "/api/v1/points/transaction", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Point amount must not be zero");
}

/// A point transaction without a reason is rejected.
#[tokio::test]
async fn point_transaction_without_reason_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "amount": 50, "reason": "  " });
    let response = post_json_auth(app, "/api/v1/points/transaction", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "A reason is required for point transactions");
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// A wordbook with a blank name is rejected.
#[tokio::test]
async fn blank_wordbook_name_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "name": "   " });
    let response = post_json_auth(app, "/api/v1/vocabulary/wordbooks", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Wordbook name must not be empty");
}

// ---------------------------------------------------------------------------
// Learning logs
// ---------------------------------------------------------------------------

/// A learning log with an unknown type is rejected.
#[tokio::test]
async fn learning_log_with_unknown_type_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "log_type": "osmosis", "item_count": 3 });
    let response = post_json_auth(app, "/api/v1/statistics/logs", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Invalid log type 'osmosis'. Must be one of: conversation, grammar, pronunciation"
    );
}

/// A conversation log without a duration is rejected.
#[tokio::test]
async fn conversation_log_without_duration_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "log_type": "conversation" });
    let response = post_json_auth(app, "/api/v1/statistics/logs", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "A duration or item count is required for this log type"
    );
}

// ---------------------------------------------------------------------------
// Grammar history
// ---------------------------------------------------------------------------

/// A grammar session with empty transcribed text is rejected.
#[tokio::test]
async fn grammar_session_with_empty_text_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "transcribed_text": " ", "corrected_text": "" });
    let response = post_json_auth(app, "/api/v1/grammar/history", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Transcribed text must not be empty");
}

// ---------------------------------------------------------------------------
// Level tests and plans
// ---------------------------------------------------------------------------

/// Submitting a level test with no answers is rejected.
#[tokio::test]
async fn empty_level_test_submission_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "answers": [] });
    let response = post_json_auth(app, "/api/v1/level-tests/submit", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "At least one answer is required");
}

/// The template catalog is served from a static list; it needs a valid
/// token but no database.
#[tokio::test]
async fn plan_templates_are_listed() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let response = common::get_auth(app, "/api/v1/plans/templates", &token).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let templates = json.as_array().expect("response should be an array");
    assert_eq!(templates.len(), 3);
    assert!(templates.iter().any(|t| t["id"] == "toeic_master"));
    // Internal generation parameters stay out of the payload.
    assert!(templates[0].get("goal_level").is_none());
}

/// Selecting a plan template that does not exist returns 404.
#[tokio::test]
async fn unknown_plan_template_returns_404() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = json!({ "template_id": "polyglot-crash-course" });
    let response = post_json_auth(app, "/api/v1/plans/select-template", &token, body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(
        json["error"],
        "Unknown plan template 'polyglot-crash-course'"
    );
}

// ---------------------------------------------------------------------------
// Notices (admin)
// ---------------------------------------------------------------------------

/// Validation runs after RBAC: an admin posting an empty notice gets 400,
/// not 403.
#[tokio::test]
async fn admin_notice_with_empty_title_is_rejected() {
    let app = common::build_test_app();
    let token = auth_token(1, "admin");
    let body = json!({ "title": "", "content": "scheduled maintenance" });
    let response = post_json_auth(app, "/api/v1/notices", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
