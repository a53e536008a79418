//! Query-string parameter types shared across handler modules.

use serde::Deserialize;

/// `?limit=&offset=` pair accepted by list endpoints.
///
/// Raw values pass through `lingo_core::pagination::{clamp_limit,
/// clamp_offset}` in the handler, so negative or oversized inputs never
/// reach SQL.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
