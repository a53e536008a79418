//! Request handlers, one submodule per API resource.
//!
//! Handlers authenticate via the extractors in `crate::middleware`,
//! validate input with `lingo_core` rules, delegate persistence to the
//! repositories in `lingo_db`, and map errors via [`crate::error::AppError`].

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod challenges;
pub mod community;
pub mod faqs;
pub mod grammar;
pub mod level_tests;
pub mod notices;
pub mod notifications;
pub mod plans;
pub mod points;
pub mod pronunciation;
pub mod statistics;
pub mod study_groups;
pub mod users;
pub mod vocabulary;
