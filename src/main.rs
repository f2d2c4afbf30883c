use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod db;
mod predictor;

use api::AppState;
use config::{Config, StrategyKind};
use db::Database;
use predictor::{HeuristicStrategy, NoiseProvider, PredictionStrategy, StaticData, TrainedModelStrategy};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // Open database
    let db = Database::open(&config.database_path)
        .with_context(|| format!("Failed to open database {}", config.database_path))?;
    info!("Database opened: {}", config.database_path);

    if config.seed_sample_data {
        db::seed::seed_sample_data(&db)?;
        info!("Sample data ready");
    }

    let strategy = match config.strategy {
        StrategyKind::Heuristic => {
            let data = match &config.tables_path {
                Some(path) => StaticData::load(path)
                    .with_context(|| format!("Failed to load tables from {}", path.display()))?,
                None => StaticData::builtin(),
            };
            info!(
                "Heuristic tables: {} team ratings, {} venues, {} weather, {} pitch entries",
                data.team_ratings.len(),
                data.venue_deltas.len(),
                data.weather_deltas.len(),
                data.pitch_deltas.len()
            );
            PredictionStrategy::Heuristic(HeuristicStrategy::new(Arc::new(data)))
        }
        StrategyKind::Trained => PredictionStrategy::TrainedModel(TrainedModelStrategy::load(
            &config.score_model_path,
            &config.win_model_path,
        )?),
    };
    info!("Prediction strategy: {}", strategy.name());

    let noise = NoiseProvider::from_seed(config.noise_seed);
    if let Some(seed) = config.noise_seed {
        info!("Score jitter seeded with {}", seed);
    }

    let state = AppState {
        db,
        strategy: Arc::new(strategy),
        noise,
    };
    let app = api::router(state);
    let addr: SocketAddr = config.api_addr.parse()?;
    info!("API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
