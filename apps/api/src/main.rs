mod analysis;
mod builder;
mod config;
mod cover_letter;
mod errors;
mod llm_client;
mod models;
mod pdf;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Udyat API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generation gateway; without a key the model-backed routes answer 500.
    let generator: Option<Arc<dyn TextGenerator>> = match &config.google_ai_key {
        Some(key) => {
            let llm = LlmClient::new(
                key.clone(),
                config.llm_model.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )?;
            info!("LLM client initialized (model: {})", llm.model());
            Some(Arc::new(llm) as Arc<dyn TextGenerator>)
        }
        None => {
            warn!("GOOGLE_AI_KEY is not set; generation, upload and cover letter routes are disabled");
            None
        }
    };

    let state = AppState::new(config.clone(), generator);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
