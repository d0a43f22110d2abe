// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Setbook Server
//!
//! HTTP API for the exercise catalog, workout templates and workout logs,
//! backed by PostgreSQL or SQLite depending on `SETBOOK_DATABASE_URL`.

use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, warn};

use setbook_core::catalog_handlers::seed_default_exercises;
use setbook_core::config::{Config, DatabaseBackend};
use setbook_core::migrations;
use setbook_core::{HandlerState, Persistence, PostgresPersistence, SqlitePersistence};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the filter reads RUST_LOG
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "setbook_server=info,setbook_core=info,tower_http=info".into()
            }),
        )
        .init();

    if let Err(e) = dotenv {
        warn!("No .env file loaded: {}", e);
    }

    let config = Config::from_env()?;

    info!(
        http_addr = %config.http_addr,
        backend = ?config.backend,
        max_db_connections = config.max_db_connections,
        "Starting Setbook Server"
    );

    let persistence: Arc<dyn Persistence> = match config.backend {
        DatabaseBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_db_connections)
                .connect(&config.database_url)
                .await?;
            migrations::run_postgres(&pool).await?;
            Arc::new(PostgresPersistence::new(pool))
        }
        DatabaseBackend::Sqlite => {
            let options =
                SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(config.max_db_connections)
                .connect_with(options)
                .await?;
            migrations::run_sqlite(&pool).await?;
            Arc::new(SqlitePersistence::new(pool))
        }
    };

    info!("Database migrations applied");

    let state = HandlerState::new(persistence);

    if config.seed_exercises {
        let inserted = seed_default_exercises(&state).await?;
        info!(inserted, "Exercise catalog seeded");
    }

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!(addr = %config.http_addr, "Setbook Server ready");

    axum::serve(listener, setbook_server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Setbook Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
