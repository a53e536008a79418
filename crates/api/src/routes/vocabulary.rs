//! Route definitions for the `/vocabulary` resource.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::vocabulary;
use crate::state::AppState;

/// Routes mounted at `/vocabulary`.
///
/// ```text
/// POST   /wordbooks                  -> create_wordbook
/// GET    /wordbooks                  -> list_wordbooks (with word counts)
/// GET    /wordbooks/{id}             -> get_wordbook (with words)
/// DELETE /wordbooks/{id}             -> delete_wordbook
/// POST   /wordbooks/{id}/words       -> create_word
/// POST   /wordbooks/{id}/words/batch -> create_words_batch
///
/// PUT    /words/{id}                 -> update_word
/// PATCH  /words/{id}                 -> set_memorized
/// PATCH  /words/{id}/favorite        -> set_favorite (?favorite=bool)
/// DELETE /words/{id}                 -> delete_word
/// GET    /words                      -> list_words (?status=)
///
/// GET    /favorites                  -> favorites
/// GET    /stats                      -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/wordbooks",
            get(vocabulary::list_wordbooks).post(vocabulary::create_wordbook),
        )
        .route(
            "/wordbooks/{id}",
            get(vocabulary::get_wordbook).delete(vocabulary::delete_wordbook),
        )
        .route("/wordbooks/{id}/words", post(vocabulary::create_word))
        .route(
            "/wordbooks/{id}/words/batch",
            post(vocabulary::create_words_batch),
        )
        .route(
            "/words/{id}",
            put(vocabulary::update_word)
                .patch(vocabulary::set_memorized)
                .delete(vocabulary::delete_word),
        )
        .route("/words/{id}/favorite", patch(vocabulary::set_favorite))
        .route("/words", get(vocabulary::list_words))
        .route("/favorites", get(vocabulary::favorites))
        .route("/stats", get(vocabulary::stats))
}
