//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Response shapes for rows that must not be serialized whole

pub mod attendance;
pub mod challenge;
pub mod community;
pub mod faq;
pub mod grammar;
pub mod group;
pub mod learning_log;
pub mod notice;
pub mod notification;
pub mod plan;
pub mod point;
pub mod pronunciation;
pub mod session;
pub mod user;
pub mod vocabulary;
