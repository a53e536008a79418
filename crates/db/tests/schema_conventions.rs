//! Conventions lint over the migration sources.
//!
//! The error classifier in the API maps Postgres 23505 violations to 409
//! only when the constraint name starts with `uq_`, so constraint naming is
//! load-bearing. These tests parse the SQL files directly and need no
//! database.

use std::fs;
use std::path::PathBuf;

/// Load every migration file as `(file_name, sql)`, sorted by name.
fn migrations() -> Vec<(String, String)> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../db/migrations");
    let mut files: Vec<(String, String)> = fs::read_dir(&dir)
        .expect("migrations directory should exist")
        .map(|entry| {
            let path = entry.expect("directory entry should read").path();
            let name = path
                .file_name()
                .expect("migration should have a file name")
                .to_string_lossy()
                .into_owned();
            let sql = fs::read_to_string(&path).expect("migration should be readable");
            (name, sql)
        })
        .collect();
    files.sort();
    assert!(!files.is_empty(), "no migrations found in {}", dir.display());
    files
}

/// Split a migration into its `CREATE TABLE` bodies as `(table_name, body)`.
fn create_table_blocks(sql: &str) -> Vec<(String, String)> {
    let mut blocks = Vec::new();
    for chunk in sql.split("CREATE TABLE ").skip(1) {
        let table = chunk
            .split_whitespace()
            .next()
            .expect("CREATE TABLE should name a table")
            .to_string();
        let body = chunk
            .split(");")
            .next()
            .expect("CREATE TABLE should be terminated")
            .to_string();
        blocks.push((table, body));
    }
    blocks
}

// ---------------------------------------------------------------------------
// Test: migration files follow the <timestamp>_<description>.sql pattern
// ---------------------------------------------------------------------------

#[test]
fn migration_files_are_named_conventionally() {
    for (name, _) in migrations() {
        assert!(name.ends_with(".sql"), "{name} is not a .sql file");
        let (prefix, _) = name.split_once('_').expect("migration name needs a version prefix");
        assert_eq!(prefix.len(), 14, "{name} should start with a 14-digit version");
        assert!(
            prefix.chars().all(|c| c.is_ascii_digit()),
            "{name} version prefix should be numeric"
        );
    }
}

// ---------------------------------------------------------------------------
// Test: every table uses a BIGSERIAL surrogate key and records event time
// ---------------------------------------------------------------------------

#[test]
fn tables_have_bigserial_pk_and_a_defaulted_timestamp() {
    for (name, sql) in migrations() {
        for (table, body) in create_table_blocks(&sql) {
            assert!(
                body.contains("id BIGSERIAL PRIMARY KEY"),
                "{name}: table {table} should use `id BIGSERIAL PRIMARY KEY`"
            );
            // created_at, joined_at, submitted_at, ... naming varies with the
            // domain; what matters is that the row timestamps itself.
            assert!(
                body.contains("TIMESTAMPTZ NOT NULL DEFAULT now()"),
                "{name}: table {table} should have a defaulted TIMESTAMPTZ column"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Test: TEXT over VARCHAR, TIMESTAMPTZ over TIMESTAMP
// ---------------------------------------------------------------------------

#[test]
fn no_varchar_columns() {
    for (name, sql) in migrations() {
        assert!(
            !sql.to_uppercase().contains("VARCHAR"),
            "{name}: use TEXT instead of VARCHAR"
        );
    }
}

#[test]
fn timestamps_are_timestamptz() {
    for (name, sql) in migrations() {
        for token in sql.split_whitespace() {
            assert_ne!(
                token.trim_end_matches(','),
                "TIMESTAMP",
                "{name}: use TIMESTAMPTZ instead of TIMESTAMP"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Test: constraint and index names carry their kind prefix
// ---------------------------------------------------------------------------

#[test]
fn constraint_names_use_kind_prefixes() {
    for (name, sql) in migrations() {
        let tokens: Vec<&str> = sql.split_whitespace().collect();

        for w in tokens.windows(3) {
            if w[0] != "CONSTRAINT" {
                continue;
            }
            let constraint = w[1];
            if w[2].starts_with("UNIQUE") {
                assert!(
                    constraint.starts_with("uq_"),
                    "{name}: unique constraint {constraint} must be named uq_*"
                );
            } else if w[2].starts_with("CHECK") {
                assert!(
                    constraint.starts_with("ck_"),
                    "{name}: check constraint {constraint} must be named ck_*"
                );
            }
        }

        for w in tokens.windows(4) {
            if w[0] == "CREATE" && w[1] == "UNIQUE" && w[2] == "INDEX" {
                assert!(
                    w[3].starts_with("uq_"),
                    "{name}: unique index {} must be named uq_*",
                    w[3]
                );
            }
            if w[0] == "CREATE" && w[1] == "INDEX" {
                assert!(
                    w[2].starts_with("idx_"),
                    "{name}: index {} must be named idx_*",
                    w[2]
                );
            }
        }
    }
}
