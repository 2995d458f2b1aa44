mod chronicle;
mod config;
mod errors;
mod llm_client;
mod routes;
mod solar_wind;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::solar_wind::SolarWindFeed;
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

    info!("Starting Space Chronicle API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client. A missing key is not fatal: generated content
    // falls back to local data and article/chat report NOT_CONFIGURED.
    let llm = OpenAiClient::new(&config.openai)?;
    info!("LLM client initialized (model: {})", llm.model());
    if !config.openai.credential.is_valid() {
        warn!(
            "OpenAI API key {} is missing or invalid, serving fallback content",
            config.openai.credential.masked()
        );
    }

    let solar_wind = SolarWindFeed::new(config.solar_wind_url.clone())?;
    info!("Solar wind feed: {}", config.solar_wind_url);

    let state = AppState {
        llm: Arc::new(llm),
        solar_wind,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
