use serde::{Deserialize, Serialize, Serializer};

/// Category of a space history event. Serialized with its PascalCase name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Launch,
    Discovery,
    #[default]
    Mission,
    Achievement,
    Landing,
    Flyby,
    Observatory,
    Docking,
    Anniversary,
}

impl EventCategory {
    pub const ALL: [EventCategory; 9] = [
        EventCategory::Launch,
        EventCategory::Discovery,
        EventCategory::Mission,
        EventCategory::Achievement,
        EventCategory::Landing,
        EventCategory::Flyby,
        EventCategory::Observatory,
        EventCategory::Docking,
        EventCategory::Anniversary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Launch => "Launch",
            EventCategory::Discovery => "Discovery",
            EventCategory::Mission => "Mission",
            EventCategory::Achievement => "Achievement",
            EventCategory::Landing => "Landing",
            EventCategory::Flyby => "Flyby",
            EventCategory::Observatory => "Observatory",
            EventCategory::Docking => "Docking",
            EventCategory::Anniversary => "Anniversary",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

/// One historical space-related occurrence, as rendered by the front end.
///
/// `title`, `year`, `description` and `category` are always present after
/// normalization. Everything else is omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

/// The event an article is written about, as posted by the front end.
/// `category` stays free text here: it is only echoed into the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSubject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub year: i32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub significance: Option<String>,
}

/// Traffic-light colour shared by every weather section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl StatusColor {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "green" => Some(StatusColor::Green),
            "yellow" => Some(StatusColor::Yellow),
            "orange" => Some(StatusColor::Orange),
            "red" => Some(StatusColor::Red),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarActivity {
    pub level: String,
    pub description: String,
    pub color: StatusColor,
}

/// Whole-number readings serialize as JSON integers (`425`, not `425.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarWind {
    /// km/s, 300–800
    #[serde(serialize_with = "whole_number")]
    pub speed: f64,
    /// protons/cm³, 1–20
    #[serde(serialize_with = "whole_number")]
    pub density: f64,
    /// Kelvin
    #[serde(serialize_with = "whole_number")]
    pub temperature: f64,
}

fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // 2^53: beyond this an f64 no longer holds every integer exactly
    if value.fract() == 0.0 && value.abs() <= 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeomagneticActivity {
    /// Planetary K-index, 0–9
    pub k_index: u8,
    pub level: String,
    pub color: StatusColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    pub condition: String,
    pub description: String,
    pub color: StatusColor,
}

/// Synthetic space-weather metrics for the dashboard widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub solar_activity: SolarActivity,
    pub solar_wind: SolarWind,
    pub geomagnetic_activity: GeomagneticActivity,
    pub visibility: Visibility,
    pub forecast: String,
    pub last_updated: String,
}

/// Where a payload came from. Display-only: nothing branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentSource {
    AiEnhanced,
    HistoricalDatabase,
}

impl ContentSource {
    pub fn label(&self) -> &'static str {
        match self {
            ContentSource::AiEnhanced => "AI-Enhanced",
            ContentSource::HistoricalDatabase => "Historical Database",
        }
    }
}
