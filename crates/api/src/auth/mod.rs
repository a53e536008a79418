//! Credential and token primitives used by the auth handlers.
//!
//! [`password`] covers Argon2id hashing; [`jwt`] covers access-token
//! signing/validation and refresh-token digests.

pub mod jwt;
pub mod password;
