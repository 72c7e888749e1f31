//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the HTTP surface
//! (with OpenAPI/Swagger UI). The workspace's main `founderbrief-run` binary
//! is the production entry point.

use api_rest::{build_router, AppState};
use brief_core::CoreConfig;
use narrative_ai::{OpenAiConfig, OpenAiGenerator};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("BRIEF_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting FounderBrief REST API on {}", addr);

    let data_dir =
        std::env::var("BRIEF_DATA_DIR").unwrap_or_else(|_| brief_core::constants::DEFAULT_DATA_DIR.into());
    let data_path = Path::new(&data_dir);
    if !data_path.exists() {
        anyhow::bail!("Data directory does not exist: {}", data_path.display());
    }

    let cfg = Arc::new(CoreConfig::new(data_path.to_path_buf())?);

    let openai = OpenAiConfig::from_env_values(
        std::env::var("OPENAI_API_KEY").ok(),
        std::env::var("OPENAI_BASE_URL").ok(),
        std::env::var("OPENAI_MODEL").ok(),
    );
    let generator = Arc::new(OpenAiGenerator::new(openai)?);

    let app = build_router(AppState::new(cfg, generator));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
