//! Axum route handlers for the Space Chronicle API.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chronicle::calendar::parse_request_date;
use crate::chronicle::history::{
    daily_summary, detailed_analysis, events_for_date, search_events, SeedEvent,
};
use crate::chronicle::models::{ArticleSubject, ContentSource, Event, WeatherSnapshot};
use crate::chronicle::pipeline::{generate, ContentKind, EventsSchema, InsightsSchema, WeatherSchema};
use crate::chronicle::prompts::{build_prompt, PromptInput};
use crate::errors::AppError;
use crate::llm_client::prompts::{CHAT_MAX_TOKENS, CHAT_SYSTEM};
use crate::llm_client::{ChatMessage, CompletionOptions, CompletionRequest};
use crate::solar_wind::merge_observed_speed;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DateRequest {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
    pub source: ContentSource,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: String,
    pub source: ContentSource,
}

#[derive(Debug, Deserialize)]
pub struct ArticleRequest {
    pub event: ArticleSubject,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: String,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    #[serde(flatten)]
    pub snapshot: WeatherSnapshot,
    pub source: ContentSource,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub seed: SeedEvent,
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub date: NaiveDate,
    pub events: Vec<HistoryEntry>,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub events: Vec<SeedEvent>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    parse_request_date(raw)
        .ok_or_else(|| AppError::Validation(format!("'{raw}' is not a valid ISO-8601 date")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-events
///
/// Events that happened on the requested month/day. Always answers with a
/// complete list: provider or parsing failures are served from the fallback.
pub async fn handle_generate_events(
    State(state): State<AppState>,
    Json(request): Json<DateRequest>,
) -> Result<Json<EventsResponse>, AppError> {
    let date = parse_date(&request.date)?;

    let generated = generate(state.llm.as_ref(), &EventsSchema { date }).await;
    info!(
        "Serving {} events for {date} ({})",
        generated.payload.len(),
        generated.source.label()
    );

    Ok(Json(EventsResponse {
        events: generated.payload,
        source: generated.source,
    }))
}

/// POST /api/generate-insights
pub async fn handle_generate_insights(
    State(state): State<AppState>,
    Json(request): Json<DateRequest>,
) -> Result<Json<InsightsResponse>, AppError> {
    let date = parse_date(&request.date)?;

    let generated = generate(state.llm.as_ref(), &InsightsSchema { date }).await;

    Ok(Json(InsightsResponse {
        insights: generated.payload,
        source: generated.source,
    }))
}

/// POST /api/generate-article
///
/// No local article text exists, so provider failures are returned as errors.
pub async fn handle_generate_article(
    State(state): State<AppState>,
    Json(request): Json<ArticleRequest>,
) -> Result<Json<ArticleResponse>, AppError> {
    if request.event.title.trim().is_empty() {
        return Err(AppError::Validation("event.title cannot be empty".to_string()));
    }

    let prompt = build_prompt(&PromptInput::Article(&request.event));
    let options = CompletionOptions {
        max_tokens: state.config.openai.max_tokens,
        ..ContentKind::Article.options()
    };

    let article = state
        .llm
        .complete(&CompletionRequest::from_prompt(prompt, options))
        .await
        .map_err(AppError::llm("Failed to generate article"))?;

    Ok(Json(ArticleResponse {
        article: article.trim().to_string(),
    }))
}

/// GET /api/space-weather
///
/// Generated snapshot, with the observed solar-wind speed merged in when the
/// public feed answers. Both calls run concurrently.
pub async fn handle_space_weather(State(state): State<AppState>) -> Json<WeatherResponse> {
    let schema = WeatherSchema {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };

    let (generated, observed) = tokio::join!(
        generate(state.llm.as_ref(), &schema),
        state.solar_wind.latest_speed()
    );

    let mut snapshot = generated.payload;
    merge_observed_speed(&mut snapshot, observed);

    Json(WeatherResponse {
        snapshot,
        source: generated.source,
    })
}

/// POST /api/chat
///
/// One assistant reply for the conversation so far. Client-supplied system
/// messages are dropped; the assistant persona is fixed server-side.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let messages: Vec<ChatMessage> = request
        .messages
        .into_iter()
        .filter(|m| matches!(m.role.as_str(), "user" | "assistant"))
        .filter(|m| !m.content.trim().is_empty())
        .collect();

    if messages.is_empty() {
        return Err(AppError::Validation("messages cannot be empty".to_string()));
    }

    let request = CompletionRequest {
        system: Some(CHAT_SYSTEM.to_string()),
        messages,
        options: CompletionOptions::new(CHAT_MAX_TOKENS, Some(0.7)),
    };

    let reply = state
        .llm
        .complete(&request)
        .await
        .map_err(AppError::llm("Failed to process chat request"))?;

    Ok(Json(ChatResponse { reply }))
}

/// GET /api/history?date=
///
/// Seed events for the day with a locally written summary. No provider call.
pub async fn handle_history(
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let date = parse_date(&query.date)?;

    let events = events_for_date(date)
        .into_iter()
        .map(|seed| HistoryEntry {
            analysis: detailed_analysis(&seed.event),
            seed,
        })
        .collect();

    Ok(Json(HistoryResponse {
        date,
        events,
        summary: daily_summary(date),
    }))
}

/// GET /api/history/search?q=
pub async fn handle_history_search(Query(query): Query<SearchQuery>) -> Json<SearchResponse> {
    Json(SearchResponse {
        events: search_events(&query.q),
    })
}
