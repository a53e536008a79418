//! HTTP-level tests for authentication and role enforcement.
//!
//! Token validation and RBAC run entirely in the auth extractor, before any
//! database access, so these tests go through the real router with no
//! database behind it.

mod common;

use axum::http::StatusCode;
use common::{auth_token, body_json, expired_token, get, get_auth, post_json};
use lingo_api::auth::jwt::{generate_access_token, JwtConfig};

// ---------------------------------------------------------------------------
// Token validation
// ---------------------------------------------------------------------------

/// A protected route without an Authorization header returns 401.
#[tokio::test]
async fn missing_auth_header_returns_401() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/users/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

/// An Authorization header without the Bearer scheme returns 401.
#[tokio::test]
async fn non_bearer_auth_header_returns_401() {
    // `get_auth` always sends a Bearer scheme; build the malformed header
    // manually.
    let app = common::build_test_app();
    let request = axum::http::Request::builder()
        .uri("/api/v1/users/me")
        .header("authorization", "Token abc123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(
        json["error"],
        "Invalid Authorization format. Expected: Bearer <token>"
    );
}

/// A syntactically invalid token returns 401.
#[tokio::test]
async fn garbage_token_returns_401() {
    let app = common::build_test_app();
    let response = get_auth(app, "/api/v1/users/me", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid or expired token");
}

/// An expired token returns 401.
#[tokio::test]
async fn expired_token_returns_401() {
    let app = common::build_test_app();
    let token = expired_token(1, "user");
    let response = get_auth(app, "/api/v1/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

/// A token signed with a different secret returns 401.
#[tokio::test]
async fn wrong_secret_token_returns_401() {
    let foreign = JwtConfig {
        secret: "a-completely-different-secret".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    };
    let token = generate_access_token(1, "user", &foreign).expect("token should generate");

    let app = common::build_test_app();
    let response = get_auth(app, "/api/v1/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Role enforcement
// ---------------------------------------------------------------------------

/// A regular user hitting an admin-only route returns 403.
#[tokio::test]
async fn user_role_on_admin_route_returns_403() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let response = get_auth(app, "/api/v1/admin/dashboard", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Admin role required");
}

/// An admin token clears RBAC: the same route then fails at the (absent)
/// database with a sanitized 500 rather than 401/403.
#[tokio::test]
async fn admin_role_clears_rbac_check() {
    let app = common::build_test_app();
    let token = auth_token(1, "admin");
    let response = get_auth(app, "/api/v1/admin/dashboard", &token).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

/// Admin-only mutation routes reject regular users as well.
#[tokio::test]
async fn user_role_cannot_create_notices() {
    let app = common::build_test_app();
    let token = auth_token(1, "user");
    let body = serde_json::json!({ "title": "Maintenance", "content": "Tonight 10pm" });
    let response = common::post_json_auth(app, "/api/v1/notices", &token, body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Registration input validation
// ---------------------------------------------------------------------------

/// Registering with a malformed username fails validation before any
/// database access.
#[tokio::test]
async fn register_rejects_invalid_username() {
    let app = common::build_test_app();
    let body = serde_json::json!({ "username": "ab", "password": "longenough1" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "Username must be 3-32 characters of letters, digits, or underscores"
    );
}

/// Registering with a too-short password fails validation.
#[tokio::test]
async fn register_rejects_short_password() {
    let app = common::build_test_app();
    let body = serde_json::json!({ "username": "new_user", "password": "short" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Password must be at least 8 characters");
}
