// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration loading from environment variables.

use std::net::{IpAddr, SocketAddr};

/// Storage backend selected from the database URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    /// `postgres://` or `postgresql://`
    Postgres,
    /// `sqlite:`
    Sqlite,
}

impl DatabaseBackend {
    /// Detect the backend from a connection URL.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }
}

/// Setbook configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL or SQLite connection URL
    pub database_url: String,
    /// Backend derived from `database_url`
    pub backend: DatabaseBackend,
    /// HTTP server address
    pub http_addr: SocketAddr,
    /// Maximum pooled database connections
    pub max_db_connections: u32,
    /// Seed the default exercise catalog on startup when it is empty
    pub seed_exercises: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `SETBOOK_DATABASE_URL`: PostgreSQL or SQLite connection string
    ///
    /// Optional (with defaults):
    /// - `SETBOOK_HTTP_HOST`: bind address (default: 0.0.0.0)
    /// - `SETBOOK_HTTP_PORT`: HTTP port (default: 3000)
    /// - `SETBOOK_MAX_DB_CONNECTIONS`: pool size (default: 10)
    /// - `SETBOOK_SEED_EXERCISES`: `true`/`1` to seed the catalog (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("SETBOOK_DATABASE_URL")
            .map_err(|_| ConfigError::Missing("SETBOOK_DATABASE_URL"))?;

        let backend = DatabaseBackend::from_url(&database_url).ok_or(ConfigError::Invalid(
            "SETBOOK_DATABASE_URL",
            "must start with postgres://, postgresql:// or sqlite:",
        ))?;

        let host: IpAddr = std::env::var("SETBOOK_HTTP_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("SETBOOK_HTTP_HOST", "must be an IP address"))?;

        let port: u16 = std::env::var("SETBOOK_HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("SETBOOK_HTTP_PORT", "must be a valid port number"))?;

        let max_db_connections: u32 = std::env::var("SETBOOK_MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::Invalid(
                "SETBOOK_MAX_DB_CONNECTIONS",
                "must be a positive integer",
            ))?;

        let seed_exercises = std::env::var("SETBOOK_SEED_EXERCISES")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            backend,
            http_addr: SocketAddr::new(host, port),
            max_db_connections,
            seed_exercises,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// An environment variable has an invalid value.
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
