//! Domain logic for the Lingo backend.
//!
//! Pure types, validation, and closed-form calculations shared by the `db`
//! and `api` crates. Nothing in here touches the network or the database.

pub mod attendance;
pub mod challenges;
pub mod community;
pub mod error;
pub mod grammar;
pub mod groups;
pub mod levels;
pub mod notifications;
pub mod pagination;
pub mod planning;
pub mod pronunciation;
pub mod statistics;
pub mod types;
pub mod users;
