//! Server configuration, read from the environment once at startup.

use crate::auth::jwt::JwtConfig;

/// Runtime settings for the HTTP server.
///
/// Every field has a local-development default; deployments override them
/// through environment variables (loaded from `.env` by `dotenvy` in main).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address. `HOST`, default `0.0.0.0`.
    pub host: String,
    /// Bind port. `PORT`, default `3000`.
    pub port: u16,
    /// Allowed CORS origins. `CORS_ORIGINS`, comma-separated.
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds. `REQUEST_TIMEOUT_SECS`, default 30.
    pub request_timeout_secs: u64,
    /// Grace period for background tasks during shutdown.
    /// `SHUTDOWN_TIMEOUT_SECS`, default 30.
    pub shutdown_timeout_secs: u64,
    /// Token signing settings (see [`JwtConfig::from_env`]).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Assemble the configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric overrides or a missing `JWT_SECRET`;
    /// runs only during startup, before the server accepts traffic.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "3000")
                .parse()
                .expect("PORT must be a valid u16"),
            cors_origins: env_or("CORS_ORIGINS", "http://localhost:5173")
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a valid u64"),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", "30")
                .parse()
                .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64"),
            jwt: JwtConfig::from_env(),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
