//! Handlers for the `/vocabulary` resource.
//!
//! Wordbooks and the words inside them are strictly owner-scoped; foreign
//! ids behave as if they do not exist.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lingo_core::error::CoreError;
use lingo_core::types::DbId;
use lingo_db::models::vocabulary::{
    CreateWord, UpdateWord, VocabularyStats, Word, Wordbook, WordbookWithCount,
};
use lingo_db::repositories::VocabularyRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /vocabulary/wordbooks`.
#[derive(Debug, Deserialize)]
pub struct CreateWordbookRequest {
    pub name: String,
}

/// Request body for `POST /vocabulary/wordbooks/{id}/words/batch`.
#[derive(Debug, Deserialize)]
pub struct BatchWordsRequest {
    pub words: Vec<CreateWord>,
}

/// Request body for `PATCH /vocabulary/words/{id}`.
#[derive(Debug, Deserialize)]
pub struct MemorizedRequest {
    pub is_memorized: bool,
}

/// Query parameters for `PATCH /vocabulary/words/{id}/favorite`.
#[derive(Debug, Deserialize)]
pub struct FavoriteParams {
    pub favorite: bool,
}

/// Query parameters for `GET /vocabulary/words`.
#[derive(Debug, Deserialize)]
pub struct WordFilterParams {
    pub status: Option<String>,
}

/// Wordbook detail including its words.
#[derive(Debug, Serialize)]
pub struct WordbookDetail {
    #[serde(flatten)]
    pub wordbook: Wordbook,
    pub words: Vec<Word>,
}

// ---------------------------------------------------------------------------
// Wordbooks
// ---------------------------------------------------------------------------

/// POST /api/v1/vocabulary/wordbooks
pub async fn create_wordbook(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateWordbookRequest>,
) -> AppResult<(StatusCode, Json<Wordbook>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Wordbook name must not be empty".into(),
        )));
    }

    let wordbook = VocabularyRepo::create_wordbook(&state.pool, auth.user_id, name).await?;
    Ok((StatusCode::CREATED, Json(wordbook)))
}

/// GET /api/v1/vocabulary/wordbooks
pub async fn list_wordbooks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<WordbookWithCount>>> {
    let wordbooks = VocabularyRepo::list_wordbooks(&state.pool, auth.user_id).await?;
    Ok(Json(wordbooks))
}

/// GET /api/v1/vocabulary/wordbooks/{id}
pub async fn get_wordbook(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WordbookDetail>> {
    let wordbook = require_wordbook(&state, id, auth.user_id).await?;
    let words = VocabularyRepo::words_in_book(&state.pool, wordbook.id).await?;

    Ok(Json(WordbookDetail { wordbook, words }))
}

/// DELETE /api/v1/vocabulary/wordbooks/{id}
///
/// Deletes the book and its words (cascade).
pub async fn delete_wordbook(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = VocabularyRepo::delete_wordbook(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Wordbook",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Words
// ---------------------------------------------------------------------------

/// POST /api/v1/vocabulary/wordbooks/{id}/words
pub async fn create_word(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(wordbook_id): Path<DbId>,
    Json(input): Json<CreateWord>,
) -> AppResult<(StatusCode, Json<Word>)> {
    let wordbook = require_wordbook(&state, wordbook_id, auth.user_id).await?;
    let word = VocabularyRepo::insert_word(&state.pool, wordbook.id, &input).await?;
    Ok((StatusCode::CREATED, Json(word)))
}

/// POST /api/v1/vocabulary/wordbooks/{id}/words/batch
pub async fn create_words_batch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(wordbook_id): Path<DbId>,
    Json(input): Json<BatchWordsRequest>,
) -> AppResult<(StatusCode, Json<Vec<Word>>)> {
    if input.words.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one word is required".into(),
        )));
    }

    let wordbook = require_wordbook(&state, wordbook_id, auth.user_id).await?;
    let words = VocabularyRepo::insert_words_batch(&state.pool, wordbook.id, &input.words).await?;
    Ok((StatusCode::CREATED, Json(words)))
}

/// PUT /api/v1/vocabulary/words/{id}
pub async fn update_word(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWord>,
) -> AppResult<Json<Word>> {
    let word = VocabularyRepo::update_word(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Word", id }))?;
    Ok(Json(word))
}

/// PATCH /api/v1/vocabulary/words/{id}
pub async fn set_memorized(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<MemorizedRequest>,
) -> AppResult<Json<Word>> {
    let word = VocabularyRepo::set_memorized(&state.pool, id, auth.user_id, input.is_memorized)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Word", id }))?;
    Ok(Json(word))
}

/// PATCH /api/v1/vocabulary/words/{id}/favorite?favorite=bool
pub async fn set_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<FavoriteParams>,
) -> AppResult<Json<Word>> {
    let word = VocabularyRepo::set_favorite(&state.pool, id, auth.user_id, params.favorite)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Word", id }))?;
    Ok(Json(word))
}

/// DELETE /api/v1/vocabulary/words/{id}
pub async fn delete_word(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = VocabularyRepo::delete_word(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Word", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/vocabulary/words?status=memorized|not_memorized
pub async fn list_words(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<WordFilterParams>,
) -> AppResult<Json<Vec<Word>>> {
    let memorized = match params.status.as_deref() {
        Some("memorized") => Some(true),
        Some("not_memorized") => Some(false),
        None => None,
        Some(other) => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid status filter '{other}'. Use memorized or not_memorized"
            ))));
        }
    };

    let words = VocabularyRepo::words_by_status(&state.pool, auth.user_id, memorized).await?;
    Ok(Json(words))
}

/// GET /api/v1/vocabulary/favorites
pub async fn favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Word>>> {
    let words = VocabularyRepo::favorites(&state.pool, auth.user_id).await?;
    Ok(Json(words))
}

/// GET /api/v1/vocabulary/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<VocabularyStats>> {
    let stats = VocabularyRepo::stats(&state.pool, auth.user_id).await?;
    Ok(Json(stats))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn require_wordbook(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Wordbook> {
    VocabularyRepo::find_wordbook(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Wordbook",
            id,
        }))
}
