mod caller;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod options;
mod review;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{ChatCompletionClient, TextGenerator};
use crate::options::catalog::load_reference_data;
use crate::options::store::PgOptionStore;
use crate::review::quote_usage::PrefixQuoteMatcher;
use crate::review::repository::PgReviewStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Remarks API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Reference data is immutable for the life of the process
    let reference = load_reference_data(&db)
        .await
        .context("Failed to load option catalogs and quotation pool")?;

    // Initialize the completion client
    let llm = ChatCompletionClient::new(
        config.llm_api_url.clone(),
        config.llm_api_key.clone(),
        config.llm_model.clone(),
        config.llm_timeout,
        config.llm_retry,
    )
    .context("Failed to build completion client")?;
    info!(
        "Completion client initialized (model: {}, max retries: {})",
        llm.model(),
        config.llm_retry.max_retries
    );

    let state = AppState {
        reviews: Arc::new(PgReviewStore::new(db.clone())),
        custom_options: Arc::new(PgOptionStore::new(db)),
        llm: Arc::new(llm),
        quote_matcher: Arc::new(PrefixQuoteMatcher::default()),
        reference: Arc::new(reference),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
