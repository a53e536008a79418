//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub name: Option<String>,
    pub native_language: Option<String>,
    pub learning_language: Option<String>,
    pub level: String,
    pub beginner_mode: bool,
    pub points: i32,
    pub learning_goals: Option<serde_json::Value>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub name: Option<String>,
    pub native_language: Option<String>,
    pub learning_language: Option<String>,
    pub level: String,
    pub beginner_mode: bool,
    pub points: i32,
    pub learning_goals: Option<serde_json::Value>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            name: user.name,
            native_language: user.native_language,
            learning_language: user.learning_language,
            level: user.level,
            beginner_mode: user.beginner_mode,
            points: user.points,
            learning_goals: user.learning_goals,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}

/// DTO for profile updates. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub native_language: Option<String>,
    pub learning_language: Option<String>,
}
