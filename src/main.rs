//! Main entry point for the FounderBrief server.
//!
//! Resolves all configuration from the environment once at startup, builds
//! the REST router from `api-rest`, and serves it.
//!
//! # Environment Variables
//! - `BRIEF_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
//! - `BRIEF_DATA_DIR`: Directory for update record storage (default: "./brief_data")
//! - `OPENAI_API_KEY`: Bearer token for the narrative generation service
//! - `OPENAI_BASE_URL`: OpenAI-compatible base URL (default: "https://api.openai.com/v1")
//! - `OPENAI_MODEL`: Model name (default: "gpt-3.5-turbo")

use api_rest::{build_router, AppState};
use brief_core::CoreConfig;
use narrative_ai::{OpenAiConfig, OpenAiGenerator};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("founderbrief_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("brief_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("BRIEF_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting FounderBrief REST on {}", rest_addr);

    let data_dir = std::env::var("BRIEF_DATA_DIR")
        .unwrap_or_else(|_| brief_core::constants::DEFAULT_DATA_DIR.into());
    let data_path = Path::new(&data_dir);
    if !data_path.exists() {
        anyhow::bail!("Data directory does not exist: {}", data_path.display());
    }

    let cfg = Arc::new(CoreConfig::new(data_path.to_path_buf())?);

    let api_key = std::env::var("OPENAI_API_KEY").ok();
    if api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; narrative generation will fail upstream");
    }
    let openai = OpenAiConfig::from_env_values(
        api_key,
        std::env::var("OPENAI_BASE_URL").ok(),
        std::env::var("OPENAI_MODEL").ok(),
    );
    let generator = Arc::new(OpenAiGenerator::new(openai)?);

    let app = build_router(AppState::new(cfg, generator));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
