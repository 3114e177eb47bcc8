//! stylecraft HTTP server binary.
//!
//! # Environment Variables
//!
//! - `PORT` - HTTP port (default: 5001)
//! - `STYLECRAFT_CONFIG` - Optional YAML configuration file
//! - `STYLECRAFT_DATA_DIR`, `STYLECRAFT_MODEL`, `STYLECRAFT_TIMEOUT_SECS`,
//!   `STYLECRAFT_POLISH`, `GEMINI_API_KEY` / `GOOGLE_API_KEY` - see
//!   [`stylecraft::SynthConfig`]
//! - `RUST_LOG` - Tracing filter (default: "info,stylecraft=debug")
//!
//! A `.env` file in the working directory is loaded first.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use anyhow::Context;
use stylecraft::server::{app_router, AppState};
use stylecraft::SynthConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stylecraft=debug".into()),
        )
        .init();

    let config = match std::env::var("STYLECRAFT_CONFIG") {
        Ok(path) => SynthConfig::from_yaml_file(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        Err(_) => SynthConfig::from_env().context("reading configuration from environment")?,
    };

    let port = std::env::var("PORT").unwrap_or_else(|_| "5001".to_string());
    let bind_addr = format!("0.0.0.0:{}", port);

    let state = AppState::from_config(&config);
    let datasets = state.loader.list().unwrap_or_default();
    let generator_available = state.synthesizer.generator_available();
    let app = app_router(state);

    tracing::info!("stylecraft server starting on {}", bind_addr);
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("Datasets: {:?}", datasets);
    tracing::info!(
        "External generator: {}",
        if generator_available { config.model.as_str() } else { "none (templates only)" }
    );
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST /api/generate-post");
    tracing::info!("  POST /api/extract-patterns");
    tracing::info!("  GET  /api/datasets");
    tracing::info!("  GET  /api/patterns/:style");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
