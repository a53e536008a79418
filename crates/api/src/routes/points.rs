//! Route definitions for the `/points` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::points;
use crate::state::AppState;

/// Routes mounted at `/points`.
///
/// ```text
/// POST /transaction -> create_transaction (atomic balance change)
/// GET  /history     -> history (own ledger)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transaction", post(points::create_transaction))
        .route("/history", get(points::history))
}
