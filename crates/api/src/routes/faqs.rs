//! Route definitions for the `/faqs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::faqs;
use crate::state::AppState;

/// Routes mounted at `/faqs`. Writes require the admin role.
///
/// ```text
/// GET    /      -> list_faqs (?limit=&offset=)
/// POST   /      -> create_faq (admin)
/// GET    /{id}  -> get_faq
/// PUT    /{id}  -> update_faq (admin)
/// DELETE /{id}  -> delete_faq (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(faqs::list_faqs).post(faqs::create_faq))
        .route(
            "/{id}",
            get(faqs::get_faq).put(faqs::update_faq).delete(faqs::delete_faq),
        )
}
