mod collectors;
mod config;
mod errors;
mod models;
mod report;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::collectors::build_collectors;
use crate::config::Config;
use crate::routes::build_router;
use crate::search::scoring::ScoringTables;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobscout API v{}", env!("CARGO_PKG_VERSION"));

    // Scoring term tables: built-in defaults, or an override file.
    // A malformed override is fatal — it would silently zero every score.
    let tables = match &config.scoring_tables_path {
        Some(path) => {
            let tables = ScoringTables::from_file(path)?;
            info!("Loaded {} scoring term tables from {}", tables.0.len(), path.display());
            tables
        }
        None => ScoringTables::builtin(),
    };

    let collectors = build_collectors(&config);
    if collectors.is_empty() {
        anyhow::bail!("No valid job sources enabled; check ENABLED_SOURCES");
    }
    info!(
        "Enabled job sources: {}",
        collectors
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let state = AppState {
        config: config.clone(),
        collectors: Arc::new(collectors),
        tables: Arc::new(tables),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
