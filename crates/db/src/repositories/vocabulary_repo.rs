//! Repository for wordbooks and words.
//!
//! Word operations are owner-scoped through the parent wordbook, so a
//! foreign word id behaves exactly like a missing one.

use sqlx::PgPool;

use lingo_core::types::DbId;

use crate::models::vocabulary::{
    CreateWord, UpdateWord, VocabularyStats, Word, Wordbook, WordbookWithCount,
};

const BOOK_COLUMNS: &str = "id, user_id, name, created_at";
const WORD_COLUMNS: &str = "id, wordbook_id, word, definition, pronunciation, \
                             english_example, is_memorized, is_favorite, created_at";

/// Word columns qualified for joined queries.
const WORD_COLUMNS_QUALIFIED: &str =
    "w.id, w.wordbook_id, w.word, w.definition, w.pronunciation, \
     w.english_example, w.is_memorized, w.is_favorite, w.created_at";

/// Provides wordbook and word operations.
pub struct VocabularyRepo;

impl VocabularyRepo {
    /// Insert a new wordbook, returning the created row.
    pub async fn create_wordbook(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<Wordbook, sqlx::Error> {
        let query = format!(
            "INSERT INTO wordbooks (user_id, name)
             VALUES ($1, $2)
             RETURNING {BOOK_COLUMNS}"
        );
        sqlx::query_as::<_, Wordbook>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// All of a user's wordbooks with their word counts, newest first.
    pub async fn list_wordbooks(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<WordbookWithCount>, sqlx::Error> {
        sqlx::query_as::<_, WordbookWithCount>(
            "SELECT b.id, b.user_id, b.name, b.created_at,
                    COUNT(w.id) AS word_count
             FROM wordbooks b
             LEFT JOIN words w ON w.wordbook_id = b.id
             WHERE b.user_id = $1
             GROUP BY b.id
             ORDER BY b.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Find a wordbook owned by the given user.
    pub async fn find_wordbook(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Wordbook>, sqlx::Error> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM wordbooks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Wordbook>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned wordbook and its words. Returns `true` if deleted.
    pub async fn delete_wordbook(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wordbooks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert one word, returning the created row.
    pub async fn insert_word(
        pool: &PgPool,
        wordbook_id: DbId,
        input: &CreateWord,
    ) -> Result<Word, sqlx::Error> {
        let query = format!(
            "INSERT INTO words (wordbook_id, word, definition, pronunciation, english_example)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {WORD_COLUMNS}"
        );
        sqlx::query_as::<_, Word>(&query)
            .bind(wordbook_id)
            .bind(&input.word)
            .bind(&input.definition)
            .bind(&input.pronunciation)
            .bind(&input.english_example)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of words in one transaction, returning the rows in
    /// input order.
    pub async fn insert_words_batch(
        pool: &PgPool,
        wordbook_id: DbId,
        inputs: &[CreateWord],
    ) -> Result<Vec<Word>, sqlx::Error> {
        let query = format!(
            "INSERT INTO words (wordbook_id, word, definition, pronunciation, english_example)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {WORD_COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let word = sqlx::query_as::<_, Word>(&query)
                .bind(wordbook_id)
                .bind(&input.word)
                .bind(&input.definition)
                .bind(&input.pronunciation)
                .bind(&input.english_example)
                .fetch_one(&mut *tx)
                .await?;
            created.push(word);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// Words in one owned wordbook, oldest first.
    pub async fn words_in_book(
        pool: &PgPool,
        wordbook_id: DbId,
    ) -> Result<Vec<Word>, sqlx::Error> {
        let query = format!(
            "SELECT {WORD_COLUMNS} FROM words
             WHERE wordbook_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Word>(&query)
            .bind(wordbook_id)
            .fetch_all(pool)
            .await
    }

    /// Find a word the given user owns (via the parent wordbook).
    pub async fn find_word(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Word>, sqlx::Error> {
        let query = format!(
            "SELECT {WORD_COLUMNS_QUALIFIED} FROM words w
             JOIN wordbooks b ON b.id = w.wordbook_id
             WHERE w.id = $1 AND b.user_id = $2"
        );
        sqlx::query_as::<_, Word>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Edit a word's content fields. Only non-`None` fields are applied.
    pub async fn update_word(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateWord,
    ) -> Result<Option<Word>, sqlx::Error> {
        let query = format!(
            "UPDATE words w SET
                word = COALESCE($3, w.word),
                definition = COALESCE($4, w.definition),
                pronunciation = COALESCE($5, w.pronunciation),
                english_example = COALESCE($6, w.english_example)
             FROM wordbooks b
             WHERE w.id = $1 AND b.id = w.wordbook_id AND b.user_id = $2
             RETURNING {WORD_COLUMNS_QUALIFIED}"
        );
        sqlx::query_as::<_, Word>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.word)
            .bind(&input.definition)
            .bind(&input.pronunciation)
            .bind(&input.english_example)
            .fetch_optional(pool)
            .await
    }

    /// Set the memorized flag.
    pub async fn set_memorized(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        is_memorized: bool,
    ) -> Result<Option<Word>, sqlx::Error> {
        let query = format!(
            "UPDATE words w SET is_memorized = $3
             FROM wordbooks b
             WHERE w.id = $1 AND b.id = w.wordbook_id AND b.user_id = $2
             RETURNING {WORD_COLUMNS_QUALIFIED}"
        );
        sqlx::query_as::<_, Word>(&query)
            .bind(id)
            .bind(user_id)
            .bind(is_memorized)
            .fetch_optional(pool)
            .await
    }

    /// Set the favorite flag.
    pub async fn set_favorite(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        is_favorite: bool,
    ) -> Result<Option<Word>, sqlx::Error> {
        let query = format!(
            "UPDATE words w SET is_favorite = $3
             FROM wordbooks b
             WHERE w.id = $1 AND b.id = w.wordbook_id AND b.user_id = $2
             RETURNING {WORD_COLUMNS_QUALIFIED}"
        );
        sqlx::query_as::<_, Word>(&query)
            .bind(id)
            .bind(user_id)
            .bind(is_favorite)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned word. Returns `true` if deleted.
    pub async fn delete_word(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM words w
             USING wordbooks b
             WHERE w.id = $1 AND b.id = w.wordbook_id AND b.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All of a user's words filtered by memorization status.
    pub async fn words_by_status(
        pool: &PgPool,
        user_id: DbId,
        memorized: Option<bool>,
    ) -> Result<Vec<Word>, sqlx::Error> {
        let query = format!(
            "SELECT {WORD_COLUMNS_QUALIFIED} FROM words w
             JOIN wordbooks b ON b.id = w.wordbook_id
             WHERE b.user_id = $1 AND ($2::bool IS NULL OR w.is_memorized = $2)
             ORDER BY w.created_at ASC"
        );
        sqlx::query_as::<_, Word>(&query)
            .bind(user_id)
            .bind(memorized)
            .fetch_all(pool)
            .await
    }

    /// All of a user's favorite words.
    pub async fn favorites(pool: &PgPool, user_id: DbId) -> Result<Vec<Word>, sqlx::Error> {
        let query = format!(
            "SELECT {WORD_COLUMNS_QUALIFIED} FROM words w
             JOIN wordbooks b ON b.id = w.wordbook_id
             WHERE b.user_id = $1 AND w.is_favorite = true
             ORDER BY w.created_at ASC"
        );
        sqlx::query_as::<_, Word>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Word counts across all of a user's wordbooks.
    pub async fn stats(pool: &PgPool, user_id: DbId) -> Result<VocabularyStats, sqlx::Error> {
        let row: (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE w.is_memorized)
             FROM words w
             JOIN wordbooks b ON b.id = w.wordbook_id
             WHERE b.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(VocabularyStats {
            total_count: row.0,
            memorized_count: row.1,
            not_memorized_count: row.0 - row.1,
        })
    }
}
