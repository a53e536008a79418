//! Domain error type shared across the workspace.

use crate::types::DbId;

/// Core domain error. The API layer maps each variant onto an HTTP status
/// in `lingo_api::error`.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id came back empty.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with current state (duplicate pending
    /// request, capacity full, already resolved, already checked in).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed to perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure. The message is logged, never surfaced.
    #[error("Internal error: {0}")]
    Internal(String),
}
