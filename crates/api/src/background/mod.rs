//! Background tasks.
//!
//! Submodules expose long-running async functions meant to be spawned via
//! `tokio::spawn`; each takes a [`CancellationToken`] so `main` can stop it
//! during graceful shutdown.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod session_cleanup;
