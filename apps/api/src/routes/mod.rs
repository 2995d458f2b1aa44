pub mod config_status;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chronicle::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/config-status",
            get(config_status::config_status_handler),
        )
        // Generated content (falls back locally)
        .route(
            "/api/generate-events",
            post(handlers::handle_generate_events),
        )
        .route(
            "/api/enhanced-events",
            post(handlers::handle_generate_events),
        )
        .route(
            "/api/generate-insights",
            post(handlers::handle_generate_insights),
        )
        .route("/api/space-weather", get(handlers::handle_space_weather))
        // Provider-only (errors surface)
        .route(
            "/api/generate-article",
            post(handlers::handle_generate_article),
        )
        .route("/api/chat", post(handlers::handle_chat))
        // Seed history
        .route("/api/history", get(handlers::handle_history))
        .route(
            "/api/history/search",
            get(handlers::handle_history_search),
        )
        .with_state(state)
}
