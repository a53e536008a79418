//! Primitive aliases shared by every crate in the workspace.

/// Primary-key type; every table uses a BIGSERIAL id.
pub type DbId = i64;

/// Timestamps are always UTC (`TIMESTAMPTZ` in the schema).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
