//! Request extractors that gate handlers on identity and role.
//!
//! [`auth::AuthUser`] decodes the Bearer token; [`rbac::RequireAdmin`] and
//! [`rbac::RequireAuth`] layer role checks on top of it.

pub mod auth;
pub mod rbac;
