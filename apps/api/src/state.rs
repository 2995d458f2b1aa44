use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;
use crate::solar_wind::SolarWindFeed;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion provider. Default: OpenAiClient.
    pub llm: Arc<dyn CompletionClient>,
    pub solar_wind: SolarWindFeed,
    pub config: Config,
}
