// Prompt Builder: instruction strings for every generated content kind.
// Templates carry `{placeholders}` that `build_prompt` fills in.

use chrono::{Datelike, NaiveDate};

use crate::chronicle::calendar::{long_date, month_name};
use crate::chronicle::models::{ArticleSubject, EventCategory};
use crate::chronicle::normalizer::{FORECAST_MAX_CHARS, SOLAR_ACTIVITY_LEVELS};

/// What to build a prompt for. Pure input; building never fails.
#[derive(Debug, Clone)]
pub enum PromptInput<'a> {
    Events(NaiveDate),
    Insights(NaiveDate),
    Weather { generated_at: &'a str },
    Article(&'a ArticleSubject),
}

/// Events prompt. Replace: {month}, {day}, {categories}
pub const EVENTS_PROMPT_TEMPLATE: &str = r#"You are a space history researcher. Generate exactly 4 significant space events that happened on {month} {day} throughout history.

IMPORTANT: Respond with ONLY valid JSON, no additional text or formatting.

Generate realistic space events with this exact JSON structure:

[
  {
    "title": "Event Title Here",
    "year": 1969,
    "description": "Detailed description of what happened, including context and significance.",
    "category": "Launch",
    "location": "Specific location",
    "agency": "NASA",
    "mission": "Mission Name",
    "crew": ["Name 1", "Name 2"],
    "significance": "Why this event was historically important.",
    "details": "Technical details and interesting facts.",
    "impact": "Long-term consequences for space exploration."
  },
  {
    "title": "Second Event Title",
    "year": 1998,
    "description": "Another space event description with full context.",
    "category": "Discovery",
    "location": "Another location",
    "agency": "ESA",
    "significance": "Historical importance of this event.",
    "details": "Technical specifications and facts.",
    "impact": "How it influenced future space exploration."
  }
]

Rules:
- "title", "year", "description" and "category" are required for every event.
- "year" must be an integer.
- "crew" is optional and must be an array of names when present.
- "category" must be one of: {categories}

Focus on real space exploration events like launches, discoveries, mission milestones, and achievements."#;

/// Insights prompt. Replace: {month}, {day}, {long_date}
pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"Generate comprehensive space history insights for {month} {day}. Write in a clear, engaging style suitable for space enthusiasts.

Structure your response as follows:

1. Start with: "On {long_date} in space history," followed by a description of a significant space event that occurred on this date.

2. Provide historical context explaining why this event was important for space exploration.

3. Include a section titled "Key events on {long_date} in space history:" followed by a bulleted list of 3-4 space events that occurred on this date, formatted as:
• Year: Brief description of the event
• Year: Brief description of the event
• Year: Brief description of the event

Focus on real space exploration history including launches, discoveries, missions, and achievements. Make the content informative and engaging.

If no major documented events occurred on this specific date, focus on ongoing space activities, current missions, or the broader context of space exploration during this time period."#;

/// Weather prompt. Replace: {generated_at}, {levels}, {forecast_max}
pub const WEATHER_PROMPT_TEMPLATE: &str = r#"Generate current realistic space weather conditions. Respond with ONLY valid JSON, no additional text.

{
  "solarActivity": {
    "level": "Moderate",
    "description": "Current solar activity with minor flares possible",
    "color": "yellow"
  },
  "solarWind": {
    "speed": 425,
    "density": 8.2,
    "temperature": 95000
  },
  "geomagneticActivity": {
    "kIndex": 3,
    "level": "Unsettled",
    "color": "yellow"
  },
  "visibility": {
    "condition": "Good",
    "description": "Clear skies for astronomical observations",
    "color": "green"
  },
  "forecast": "Space weather conditions are stable with minor geomagnetic activity possible. Aurora visibility may occur at high latitudes.",
  "lastUpdated": "{generated_at}"
}

Requirements:
- Solar activity: {levels}
- Solar wind speed: 300-800 km/s, density: 1-20 p/cm³
- K-index: integer 0-9 (0-2=Quiet, 3-4=Unsettled, 5-6=Active, 7-9=Storm)
- Colors: green (good), yellow (moderate), orange (elevated), red (high)
- Descriptions must be concise and professional (max 50 characters)
- Forecast should be informative but brief (max {forecast_max} characters)
Make all text professional and suitable for a space weather dashboard."#;

/// Article prompt. Replace: {title}, {year}, {category}, {location}, {description}, {significance}
pub const ARTICLE_PROMPT_TEMPLATE: &str = r#"Write a detailed newspaper article about this space event:

Title: {title}
Year: {year}
Category: {category}
Location: {location}
Description: {description}
Significance: {significance}

Write this as a professional newspaper article with:
1. An engaging lead paragraph
2. Historical context and background
3. Technical details explained for general readers
4. Impact on space exploration
5. Quotes from key figures (you can create realistic quotes based on historical records)
6. Connection to broader space exploration themes

Keep the tone informative but engaging, suitable for a space history newspaper. Aim for 400-600 words."#;

pub fn build_prompt(input: &PromptInput<'_>) -> String {
    match input {
        PromptInput::Events(date) => {
            let categories = EventCategory::ALL
                .iter()
                .map(EventCategory::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            EVENTS_PROMPT_TEMPLATE
                .replace("{month}", &month_name(*date))
                .replace("{day}", &date.day().to_string())
                .replace("{categories}", &categories)
        }
        PromptInput::Insights(date) => INSIGHTS_PROMPT_TEMPLATE
            .replace("{month}", &month_name(*date))
            .replace("{day}", &date.day().to_string())
            .replace("{long_date}", &long_date(*date)),
        PromptInput::Weather { generated_at } => WEATHER_PROMPT_TEMPLATE
            .replace("{generated_at}", generated_at)
            .replace("{levels}", &SOLAR_ACTIVITY_LEVELS.join("/"))
            .replace("{forecast_max}", &FORECAST_MAX_CHARS.to_string()),
        // Fields come from the client, so they must not be rescanned for
        // placeholders.
        PromptInput::Article(subject) => {
            let year = subject.year.to_string();
            fill_once(
                ARTICLE_PROMPT_TEMPLATE,
                &[
                    ("title", subject.title.as_str()),
                    ("year", year.as_str()),
                    ("category", subject.category.as_str()),
                    ("location", subject.location.as_deref().unwrap_or("Unknown")),
                    ("description", subject.description.as_str()),
                    ("significance", subject.significance.as_deref().unwrap_or("")),
                ],
            )
        }
    }
}

/// Replaces each `{key}` in `template` in a single left-to-right pass.
/// Unknown braces are copied through untouched.
fn fill_once(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];

        let matched = values.iter().find(|(key, _)| {
            tail.strip_prefix(*key)
                .is_some_and(|after| after.starts_with('}'))
        });

        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
