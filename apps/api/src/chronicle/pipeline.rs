//! Generation pipeline: one code path for every generated content kind.
//!
//! Flow: build prompt → call provider → extract → normalize → DONE(real).
//! Any failure along the way ends in DONE(fallback). `attempt` owns the first
//! path and returns a `Result`; `generate` maps every `Err` onto the schema's
//! fallback, which returns a plain value and cannot fail.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::chronicle::extractor::{extract_json, JsonShape};
use crate::chronicle::fallback::{fallback_events, fallback_insights, fallback_weather};
use crate::chronicle::models::{ContentSource, Event, WeatherSnapshot};
use crate::chronicle::normalizer::{normalize_events, normalize_weather};
use crate::chronicle::prompts::{build_prompt, PromptInput};
use crate::llm_client::{CompletionClient, CompletionOptions, CompletionRequest, LlmError};

/// Longest completion prefix written to the debug log.
const LOG_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Events,
    Insights,
    Weather,
    Article,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Events => "events",
            ContentKind::Insights => "insights",
            ContentKind::Weather => "weather",
            ContentKind::Article => "article",
        }
    }

    /// Token budget and sampling temperature per kind. Articles take their
    /// budget from configuration instead.
    pub fn options(&self) -> CompletionOptions {
        match self {
            ContentKind::Events => CompletionOptions::new(2000, Some(0.7)),
            ContentKind::Insights => CompletionOptions::new(1000, Some(0.7)),
            ContentKind::Weather => CompletionOptions::new(600, Some(0.5)),
            ContentKind::Article => CompletionOptions::new(1500, None),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("provider error: {0}")]
    Provider(#[from] LlmError),

    #[error("no JSON payload found in completion")]
    ExtractionFailed,

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected shape: {0}")]
    Shape(String),
}

impl PipelineError {
    /// State-machine stage that failed, for logs.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Provider(_) => "provider",
            PipelineError::ExtractionFailed => "extract",
            PipelineError::Parse(_) | PipelineError::Shape(_) => "normalize",
        }
    }
}

/// Describes one content kind to the pipeline: how to ask for it, how to
/// validate the answer, and what to serve when that fails.
pub trait ContentSchema: Send + Sync {
    type Output: Send;

    fn kind(&self) -> ContentKind;

    fn prompt(&self) -> String;

    /// Expected top-level JSON kind; `None` for free text.
    fn shape(&self) -> Option<JsonShape>;

    fn normalize(&self, extracted: &str) -> Result<Self::Output, PipelineError>;

    fn fallback(&self) -> Self::Output;
}

/// A payload plus the display-only flag saying where it came from.
#[derive(Debug, Clone)]
pub struct Generated<T> {
    pub payload: T,
    pub source: ContentSource,
}

/// Runs the pipeline for `schema`. Never fails.
pub async fn generate<S: ContentSchema>(
    llm: &dyn CompletionClient,
    schema: &S,
) -> Generated<S::Output> {
    let kind = schema.kind().as_str();

    match attempt(llm, schema).await {
        Ok(payload) => {
            info!("Generated {kind} content from provider");
            Generated {
                payload,
                source: ContentSource::AiEnhanced,
            }
        }
        Err(e) => {
            warn!(
                "{kind} generation failed at {} stage, serving fallback: {e}",
                e.stage()
            );
            Generated {
                payload: schema.fallback(),
                source: ContentSource::HistoricalDatabase,
            }
        }
    }
}

/// The real-content path only. Every early return is a fallback transition.
pub async fn attempt<S: ContentSchema>(
    llm: &dyn CompletionClient,
    schema: &S,
) -> Result<S::Output, PipelineError> {
    let request = CompletionRequest::from_prompt(schema.prompt(), schema.kind().options());
    let raw = llm.complete(&request).await?;

    debug!(
        "{} completion: {}...",
        schema.kind().as_str(),
        raw.chars().take(LOG_PREVIEW_CHARS).collect::<String>()
    );

    match schema.shape() {
        Some(shape) => {
            let extracted = extract_json(&raw, shape).ok_or(PipelineError::ExtractionFailed)?;
            schema.normalize(&extracted)
        }
        None => schema.normalize(&raw),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Schemas
// ────────────────────────────────────────────────────────────────────────────

/// Events that happened on the month/day of `date`.
#[derive(Debug, Clone)]
pub struct EventsSchema {
    pub date: NaiveDate,
}

impl ContentSchema for EventsSchema {
    type Output = Vec<Event>;

    fn kind(&self) -> ContentKind {
        ContentKind::Events
    }

    fn prompt(&self) -> String {
        build_prompt(&PromptInput::Events(self.date))
    }

    fn shape(&self) -> Option<JsonShape> {
        Some(JsonShape::Array)
    }

    fn normalize(&self, extracted: &str) -> Result<Vec<Event>, PipelineError> {
        normalize_events(extracted)
    }

    fn fallback(&self) -> Vec<Event> {
        fallback_events(self.date)
    }
}

#[derive(Debug, Clone)]
pub struct InsightsSchema {
    pub date: NaiveDate,
}

impl ContentSchema for InsightsSchema {
    type Output = String;

    fn kind(&self) -> ContentKind {
        ContentKind::Insights
    }

    fn prompt(&self) -> String {
        build_prompt(&PromptInput::Insights(self.date))
    }

    fn shape(&self) -> Option<JsonShape> {
        None
    }

    fn normalize(&self, extracted: &str) -> Result<String, PipelineError> {
        let text = extracted.trim();
        if text.is_empty() {
            return Err(PipelineError::ExtractionFailed);
        }
        Ok(text.to_string())
    }

    fn fallback(&self) -> String {
        fallback_insights(self.date)
    }
}

/// Current conditions; `generated_at` is echoed into the prompt and used when
/// the completion has no timestamp of its own.
#[derive(Debug, Clone)]
pub struct WeatherSchema {
    pub generated_at: String,
}

impl ContentSchema for WeatherSchema {
    type Output = WeatherSnapshot;

    fn kind(&self) -> ContentKind {
        ContentKind::Weather
    }

    fn prompt(&self) -> String {
        build_prompt(&PromptInput::Weather {
            generated_at: &self.generated_at,
        })
    }

    fn shape(&self) -> Option<JsonShape> {
        Some(JsonShape::Object)
    }

    fn normalize(&self, extracted: &str) -> Result<WeatherSnapshot, PipelineError> {
        normalize_weather(extracted, &mut rand::rng(), &self.generated_at)
    }

    fn fallback(&self) -> WeatherSnapshot {
        fallback_weather(&mut rand::rng(), &self.generated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronicle::models::{EventCategory, StatusColor};
    use crate::chronicle::normalizer::{K_INDEX, SOLAR_WIND_DENSITY, SOLAR_WIND_SPEED};
    use crate::llm_client::testing::{FailingClient, ScriptedClient};

    fn moon_landing_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(1969, 7, 20).unwrap()
    }

    #[tokio::test]
    async fn test_failing_provider_yields_fallback_events() {
        let schema = EventsSchema {
            date: moon_landing_day(),
        };
        let generated = generate(&FailingClient, &schema).await;

        assert_eq!(generated.source, ContentSource::HistoricalDatabase);
        let titles: Vec<_> = generated.payload.iter().map(|e| e.title.clone()).collect();
        let expected: Vec<_> = fallback_events(moon_landing_day())
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, expected);
    }

    #[tokio::test]
    async fn test_fenced_completion_is_real_content() {
        let raw = "```json\n[{\"title\":\"Apollo 11 Launch\",\"year\":1969,\"description\":\"...\",\"category\":\"Launch\"}]\n```";
        let client = ScriptedClient::new(raw);
        let generated = generate(
            &client,
            &EventsSchema {
                date: moon_landing_day(),
            },
        )
        .await;

        assert_eq!(generated.source, ContentSource::AiEnhanced);
        assert_eq!(generated.payload.len(), 1);
        let event = &generated.payload[0];
        assert_eq!(event.title, "Apollo 11 Launch");
        assert_eq!(event.year, 1969);
        assert_eq!(event.description, "...");
        assert_eq!(event.category, EventCategory::Launch);
        assert!(event.location.is_none());
        assert!(event.agency.is_none());
    }

    #[tokio::test]
    async fn test_refusal_text_falls_back_without_error() {
        let client = ScriptedClient::new("I cannot help with that.");
        let schema = EventsSchema {
            date: moon_landing_day(),
        };

        let err = attempt(&client, &schema).await.unwrap_err();
        assert!(matches!(err, PipelineError::ExtractionFailed));
        assert_eq!(err.stage(), "extract");

        let generated = generate(&client, &schema).await;
        assert_eq!(generated.source, ContentSource::HistoricalDatabase);
        assert_eq!(generated.payload, fallback_events(moon_landing_day()));
    }

    #[tokio::test]
    async fn test_object_instead_of_array_falls_back() {
        let client = ScriptedClient::new(r#"{"title": "Not a list"}"#);
        let schema = EventsSchema {
            date: moon_landing_day(),
        };
        assert!(matches!(
            attempt(&client, &schema).await.unwrap_err(),
            PipelineError::ExtractionFailed
        ));
    }

    #[tokio::test]
    async fn test_events_prompt_and_options_reach_provider() {
        let client = ScriptedClient::new("[]");
        let _ = generate(
            &client,
            &EventsSchema {
                date: moon_landing_day(),
            },
        )
        .await;

        let request = client.last_request().unwrap();
        assert_eq!(request.options.max_tokens, 2000);
        assert_eq!(request.options.temperature, Some(0.7));
        assert!(request.messages[0].content.contains("July 20"));
    }

    #[tokio::test]
    async fn test_every_date_yields_complete_events() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        while date <= end {
            let generated = generate(&FailingClient, &EventsSchema { date }).await;
            assert!(!generated.payload.is_empty());
            for event in &generated.payload {
                assert!(!event.title.is_empty());
                assert!(!event.description.is_empty());
                assert!(EventCategory::ALL.contains(&event.category));
            }
            date = date.succ_opt().unwrap();
        }
    }

    #[tokio::test]
    async fn test_insights_text_is_trimmed() {
        let client = ScriptedClient::new("\n\n  On July 20th in space history, ...  \n");
        let generated = generate(
            &client,
            &InsightsSchema {
                date: moon_landing_day(),
            },
        )
        .await;
        assert_eq!(generated.source, ContentSource::AiEnhanced);
        assert_eq!(generated.payload, "On July 20th in space history, ...");
    }

    #[tokio::test]
    async fn test_blank_insights_fall_back() {
        let client = ScriptedClient::new("   ");
        let generated = generate(
            &client,
            &InsightsSchema {
                date: moon_landing_day(),
            },
        )
        .await;
        assert_eq!(generated.source, ContentSource::HistoricalDatabase);
        assert_eq!(generated.payload, fallback_insights(moon_landing_day()));
    }

    #[tokio::test]
    async fn test_weather_k_index_14_is_regenerated() {
        let raw = r#"Here you go: {"solarActivity":{"level":"High","description":"Flares","color":"orange"},
            "solarWind":{"speed":500,"density":6,"temperature":90000},
            "geomagneticActivity":{"kIndex":14,"level":"Storm","color":"red"},
            "visibility":{"condition":"Fair","description":"Haze","color":"yellow"},
            "forecast":"Elevated activity.","lastUpdated":"now"}"#;
        let client = ScriptedClient::new(raw);
        let schema = WeatherSchema {
            generated_at: "2024-07-20T12:00:00Z".to_string(),
        };

        let generated = generate(&client, &schema).await;
        assert_eq!(generated.source, ContentSource::AiEnhanced);
        let k = generated.payload.geomagnetic_activity.k_index;
        assert!(K_INDEX.contains(&k));
        assert_ne!(k, 14);
        assert_eq!(generated.payload.solar_wind.speed, 500.0);
    }

    #[tokio::test]
    async fn test_failing_weather_is_in_range() {
        let schema = WeatherSchema {
            generated_at: "2024-07-20T12:00:00Z".to_string(),
        };
        for _ in 0..20 {
            let snapshot = generate(&FailingClient, &schema).await.payload;
            assert!(SOLAR_WIND_SPEED.contains(&snapshot.solar_wind.speed));
            assert!(SOLAR_WIND_DENSITY.contains(&snapshot.solar_wind.density));
            assert!(K_INDEX.contains(&snapshot.geomagnetic_activity.k_index));
            for color in [
                snapshot.solar_activity.color,
                snapshot.geomagnetic_activity.color,
                snapshot.visibility.color,
            ] {
                assert!(matches!(
                    color,
                    StatusColor::Green | StatusColor::Yellow | StatusColor::Orange | StatusColor::Red
                ));
            }
        }
    }

    #[test]
    fn test_kind_options() {
        assert_eq!(ContentKind::Weather.options().max_tokens, 600);
        assert_eq!(ContentKind::Weather.options().temperature, Some(0.5));
        assert_eq!(ContentKind::Insights.options().max_tokens, 1000);
        assert_eq!(ContentKind::Article.options().temperature, None);
    }
}
