//! # TaskHub API Server
//!
//! HTTP server for TaskHub: owner-scoped task management, a public book
//! catalog, and AI-backed task generation.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskhub-api
//! ```
//!
//! Configuration comes from environment variables (see `config.rs`); a
//! `.env` file is loaded in development. The process exits with an error
//! if the database is unreachable or a required variable is missing.

use std::sync::Arc;

use taskhub_api::{
    ai::{GeminiClient, TaskGenerator},
    app::{build_router, AppState},
    config::Config,
};
use taskhub_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskhub_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskHub API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    // Database connectivity is fatal at startup: better to crash than to
    // serve requests that can only fail.
    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let client = GeminiClient::new(&config.ai)
        .map_err(|e| anyhow::anyhow!("Failed to build AI client: {}", e))?;
    let generator = TaskGenerator::new(Arc::new(client));

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config, generator);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
