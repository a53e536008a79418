//! Refresh-session model.

use sqlx::FromRow;

use lingo_core::types::{DbId, Timestamp};

/// Row of `user_sessions`. Holds the SHA-256 digest of a refresh token,
/// never the token itself; a session stops being usable once `is_revoked`
/// flips or `expires_at` passes.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// Insert payload for a fresh session (login or rotation).
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
