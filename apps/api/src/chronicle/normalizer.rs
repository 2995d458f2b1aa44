//! Schema Normalizer: parses extracted completions and repairs them into
//! UI-safe values.
//!
//! Nothing here trusts the prompt: every field is checked for presence, type
//! and range. Required event fields get positional defaults; optional ones are
//! kept only when well-shaped. Out-of-range weather numbers are regenerated
//! inside their range rather than clamped.

use std::ops::RangeInclusive;

use rand::Rng;
use serde_json::{Map, Value};

use crate::chronicle::models::{
    Event, EventCategory, GeomagneticActivity, SolarActivity, SolarWind, StatusColor, Visibility,
    WeatherSnapshot,
};
use crate::chronicle::pipeline::PipelineError;

pub const SOLAR_WIND_SPEED: RangeInclusive<f64> = 300.0..=800.0;
pub const SOLAR_WIND_DENSITY: RangeInclusive<f64> = 1.0..=20.0;
pub const K_INDEX: RangeInclusive<u8> = 0..=9;
/// Used only when regenerating an invalid temperature.
pub const SOLAR_WIND_TEMPERATURE: RangeInclusive<f64> = 80_000.0..=120_000.0;
pub const FORECAST_MAX_CHARS: usize = 200;

pub const SOLAR_ACTIVITY_LEVELS: [&str; 5] = ["Quiet", "Low", "Moderate", "High", "Extreme"];

const DEFAULT_YEAR: i32 = 2000;
const DEFAULT_DESCRIPTION: &str = "A significant space exploration event.";

// ────────────────────────────────────────────────────────────────────────────
// Events
// ────────────────────────────────────────────────────────────────────────────

/// Parses an event list. Fails on invalid JSON, a non-array top level, or an
/// empty array.
pub fn normalize_events(extracted: &str) -> Result<Vec<Event>, PipelineError> {
    let value: Value = serde_json::from_str(extracted)?;

    let items = value.as_array().ok_or_else(|| {
        PipelineError::Shape(format!("expected an event array, got {}", kind_of(&value)))
    })?;

    if items.is_empty() {
        return Err(PipelineError::Shape("event array is empty".to_string()));
    }

    Ok(items
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_event(item, index))
        .collect())
}

/// Repairs one event. Non-object elements are treated as an empty object.
pub fn normalize_event(value: &Value, index: usize) -> Event {
    let empty = Map::new();
    let fields = value.as_object().unwrap_or(&empty);

    Event {
        title: text_field(fields, "title").unwrap_or_else(|| format!("Space Event {}", index + 1)),
        year: fields
            .get("year")
            .and_then(integral)
            .and_then(|y| i32::try_from(y).ok())
            .unwrap_or(DEFAULT_YEAR),
        description: text_field(fields, "description")
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        category: fields
            .get("category")
            .and_then(Value::as_str)
            .and_then(EventCategory::parse)
            .unwrap_or_default(),
        location: text_field(fields, "location"),
        agency: text_field(fields, "agency"),
        mission: text_field(fields, "mission"),
        crew: fields.get("crew").and_then(string_list),
        significance: text_field(fields, "significance"),
        details: text_field(fields, "details"),
        impact: text_field(fields, "impact"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Weather
// ────────────────────────────────────────────────────────────────────────────

/// Parses a weather object. Only JSON syntax and a non-object top level are
/// errors; every field problem is repaired in place.
pub fn normalize_weather<R: Rng>(
    extracted: &str,
    rng: &mut R,
    generated_at: &str,
) -> Result<WeatherSnapshot, PipelineError> {
    let value: Value = serde_json::from_str(extracted)?;

    let root = value.as_object().ok_or_else(|| {
        PipelineError::Shape(format!("expected a weather object, got {}", kind_of(&value)))
    })?;

    let empty = Map::new();
    let section = |key: &str| root.get(key).and_then(Value::as_object).unwrap_or(&empty);

    Ok(WeatherSnapshot {
        solar_activity: normalize_solar_activity(section("solarActivity")),
        solar_wind: normalize_solar_wind(section("solarWind"), rng),
        geomagnetic_activity: normalize_geomagnetic(section("geomagneticActivity"), rng),
        visibility: normalize_visibility(section("visibility")),
        forecast: text_field(root, "forecast")
            .map(|f| truncate_chars(&f, FORECAST_MAX_CHARS))
            .unwrap_or_else(|| crate::chronicle::fallback::FALLBACK_FORECAST.to_string()),
        last_updated: text_field(root, "lastUpdated").unwrap_or_else(|| generated_at.to_string()),
    })
}

fn normalize_solar_activity(fields: &Map<String, Value>) -> SolarActivity {
    let level = text_field(fields, "level")
        .and_then(|l| {
            SOLAR_ACTIVITY_LEVELS
                .iter()
                .find(|known| known.eq_ignore_ascii_case(l.trim()))
                .map(|known| known.to_string())
        })
        .unwrap_or_else(|| "Moderate".to_string());

    let color = color_field(fields).unwrap_or_else(|| solar_activity_color(&level));

    SolarActivity {
        description: text_field(fields, "description")
            .unwrap_or_else(|| "Solar activity monitoring in progress".to_string()),
        level,
        color,
    }
}

fn normalize_solar_wind<R: Rng>(fields: &Map<String, Value>, rng: &mut R) -> SolarWind {
    SolarWind {
        speed: number_in(fields.get("speed"), &SOLAR_WIND_SPEED)
            .unwrap_or_else(|| random_speed(rng)),
        density: number_in(fields.get("density"), &SOLAR_WIND_DENSITY)
            .unwrap_or_else(|| random_density(rng)),
        temperature: fields
            .get("temperature")
            .and_then(Value::as_f64)
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or_else(|| random_temperature(rng)),
    }
}

fn normalize_geomagnetic<R: Rng>(
    fields: &Map<String, Value>,
    rng: &mut R,
) -> GeomagneticActivity {
    let k_index = fields
        .get("kIndex")
        .and_then(integral)
        .and_then(|k| u8::try_from(k).ok())
        .filter(|k| K_INDEX.contains(k))
        .unwrap_or_else(|| rng.random_range(K_INDEX));

    // Level and colour always follow the reading; reported ones are ignored.
    let (level, color) = geomagnetic_band(k_index);
    GeomagneticActivity {
        k_index,
        level: level.to_string(),
        color,
    }
}

fn normalize_visibility(fields: &Map<String, Value>) -> Visibility {
    Visibility {
        condition: text_field(fields, "condition").unwrap_or_else(|| "Good".to_string()),
        description: text_field(fields, "description")
            .unwrap_or_else(|| "Clear conditions for observations".to_string()),
        color: color_field(fields).unwrap_or(StatusColor::Green),
    }
}

/// Level and colour for a K-index: 0–2 Quiet, 3–4 Unsettled, 5–6 Active, 7–9 Storm.
pub fn geomagnetic_band(k_index: u8) -> (&'static str, StatusColor) {
    match k_index {
        0..=2 => ("Quiet", StatusColor::Green),
        3..=4 => ("Unsettled", StatusColor::Yellow),
        5..=6 => ("Active", StatusColor::Orange),
        _ => ("Storm", StatusColor::Red),
    }
}

fn solar_activity_color(level: &str) -> StatusColor {
    match level {
        "Quiet" | "Low" => StatusColor::Green,
        "High" => StatusColor::Orange,
        "Extreme" => StatusColor::Red,
        _ => StatusColor::Yellow,
    }
}

pub fn random_speed<R: Rng>(rng: &mut R) -> f64 {
    f64::from(rng.random_range(300u32..=800))
}

pub fn random_density<R: Rng>(rng: &mut R) -> f64 {
    // one decimal place
    f64::from(rng.random_range(10u32..=200)) / 10.0
}

pub fn random_temperature<R: Rng>(rng: &mut R) -> f64 {
    f64::from(rng.random_range(80_000u32..=120_000))
}

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

/// A non-blank string field, trimmed.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn color_field(fields: &Map<String, Value>) -> Option<StatusColor> {
    fields
        .get("color")
        .and_then(Value::as_str)
        .and_then(StatusColor::parse)
}

/// Integers, and floats with no fractional part.
fn integral(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

fn number_in(value: Option<&Value>, range: &RangeInclusive<f64>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && range.contains(n))
}

/// `Some` only when every element is a string.
fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    const NOW: &str = "2024-07-20T12:00:00Z";

    fn well_formed_weather() -> Value {
        json!({
            "solarActivity": {
                "level": "Moderate",
                "description": "Minor flares possible",
                "color": "yellow"
            },
            "solarWind": { "speed": 425, "density": 8.2, "temperature": 95000 },
            "geomagneticActivity": { "kIndex": 3, "level": "Unsettled", "color": "yellow" },
            "visibility": {
                "condition": "Good",
                "description": "Clear skies for observations",
                "color": "green"
            },
            "forecast": "Stable conditions with minor geomagnetic activity possible.",
            "lastUpdated": "7/20/2024, 12:00:00 PM"
        })
    }

    fn weather_with(path: &[&str], replacement: Value) -> String {
        let mut value = well_formed_weather();
        let mut cursor = &mut value;
        for key in &path[..path.len() - 1] {
            cursor = cursor.get_mut(*key).unwrap();
        }
        cursor[path[path.len() - 1]] = replacement;
        value.to_string()
    }

    #[test]
    fn test_events_preserve_required_fields_and_omit_missing_optionals() {
        let extracted = r#"[{"title":"Apollo 11 Launch","year":1969,"description":"...","category":"Launch"}]"#;
        let events = normalize_events(extracted).unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.title, "Apollo 11 Launch");
        assert_eq!(event.year, 1969);
        assert_eq!(event.description, "...");
        assert_eq!(event.category, EventCategory::Launch);
        assert!(event.location.is_none());
        assert!(event.agency.is_none());
        assert!(event.mission.is_none());
        assert!(event.crew.is_none());
        assert!(event.significance.is_none());
    }

    #[test]
    fn test_well_formed_event_round_trips_field_for_field() {
        let well_formed = json!({
            "title": "Voyager 1 Launch",
            "year": 1977,
            "description": "Voyager 1 lifts off from Cape Canaveral.",
            "category": "Launch",
            "location": "Cape Canaveral, Florida",
            "agency": "NASA",
            "mission": "Voyager",
            "crew": ["Uncrewed"],
            "significance": "First spacecraft to reach interstellar space.",
            "details": "Titan IIIE-Centaur launch vehicle.",
            "impact": "Redefined outer planet science."
        });
        let events = normalize_events(&json!([well_formed.clone()]).to_string()).unwrap();

        assert_eq!(serde_json::to_value(&events[0]).unwrap(), well_formed);
    }

    #[test]
    fn test_missing_required_fields_get_positional_defaults() {
        let extracted = r#"[{"title":"Real"},{"year":"1969","category":"Spacewalk"},{"title":"","description":null}]"#;
        let events = normalize_events(extracted).unwrap();

        assert_eq!(events[0].title, "Real");
        assert_eq!(events[0].year, 2000);
        assert_eq!(events[0].description, DEFAULT_DESCRIPTION);
        assert_eq!(events[0].category, EventCategory::Mission);

        assert_eq!(events[1].title, "Space Event 2");
        assert_eq!(events[1].year, 2000, "string years are not the expected type");
        assert_eq!(events[1].category, EventCategory::Mission);

        assert_eq!(events[2].title, "Space Event 3");
        assert_eq!(events[2].description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_non_object_element_is_fully_defaulted() {
        let events = normalize_events(r#"[42]"#).unwrap();
        assert_eq!(events[0].title, "Space Event 1");
        assert_eq!(events[0].year, 2000);
    }

    #[test]
    fn test_integral_float_year_is_accepted() {
        let events = normalize_events(r#"[{"year": 1957.0}, {"year": 1957.5}]"#).unwrap();
        assert_eq!(events[0].year, 1957);
        assert_eq!(events[1].year, 2000);
    }

    #[test]
    fn test_category_is_matched_case_insensitively() {
        let events = normalize_events(r#"[{"category": "docking"}]"#).unwrap();
        assert_eq!(events[0].category, EventCategory::Docking);
    }

    #[test]
    fn test_malformed_crew_is_omitted() {
        let events = normalize_events(
            r#"[{"crew": ["Armstrong", 2]}, {"crew": "Aldrin"}, {"crew": ["Collins"]}]"#,
        )
        .unwrap();
        assert!(events[0].crew.is_none());
        assert!(events[1].crew.is_none());
        assert_eq!(events[2].crew, Some(vec!["Collins".to_string()]));
    }

    #[test]
    fn test_wrong_typed_optional_is_omitted_not_defaulted() {
        let events = normalize_events(r#"[{"location": 12, "agency": "  ", "mission": null}]"#)
            .unwrap();
        assert!(events[0].location.is_none());
        assert!(events[0].agency.is_none());
        assert!(events[0].mission.is_none());
    }

    #[test]
    fn test_events_object_is_shape_error() {
        let err = normalize_events(r#"{"events": []}"#).unwrap_err();
        assert!(matches!(err, PipelineError::Shape(_)));
    }

    #[test]
    fn test_empty_event_array_is_shape_error() {
        assert!(matches!(
            normalize_events("[]").unwrap_err(),
            PipelineError::Shape(_)
        ));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            normalize_events(r#"[{"title": "unterminated}]"#).unwrap_err(),
            PipelineError::Parse(_)
        ));
    }

    #[test]
    fn test_well_formed_weather_round_trips() {
        let mut rng = StdRng::seed_from_u64(7);
        let well_formed = well_formed_weather();
        let snapshot = normalize_weather(&well_formed.to_string(), &mut rng, NOW).unwrap();
        assert_eq!(serde_json::to_value(&snapshot).unwrap(), well_formed);
    }

    #[test]
    fn test_k_index_out_of_range_is_regenerated_not_clamped() {
        let extracted = weather_with(&["geomagneticActivity", "kIndex"], json!(14));
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let snapshot = normalize_weather(&extracted, &mut rng, NOW).unwrap();
            let k = snapshot.geomagnetic_activity.k_index;
            assert!(K_INDEX.contains(&k));
            let (level, color) = geomagnetic_band(k);
            assert_eq!(snapshot.geomagnetic_activity.level, level);
            assert_eq!(snapshot.geomagnetic_activity.color, color);
        }
        // Clamping would pin every result to 9.
        let distinct: std::collections::HashSet<u8> = (0..64)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                normalize_weather(&extracted, &mut rng, NOW)
                    .unwrap()
                    .geomagnetic_activity
                    .k_index
            })
            .collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn test_fractional_k_index_is_regenerated() {
        let extracted = weather_with(&["geomagneticActivity", "kIndex"], json!(3.5));
        let mut rng = StdRng::seed_from_u64(1);
        let k = normalize_weather(&extracted, &mut rng, NOW)
            .unwrap()
            .geomagnetic_activity
            .k_index;
        assert!(K_INDEX.contains(&k));
    }

    #[test]
    fn test_solar_wind_out_of_range_values_are_regenerated() {
        let mut value = well_formed_weather();
        value["solarWind"] = json!({ "speed": 1200, "density": "dense", "temperature": -5 });
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let wind = normalize_weather(&value.to_string(), &mut rng, NOW)
                .unwrap()
                .solar_wind;
            assert!(SOLAR_WIND_SPEED.contains(&wind.speed));
            assert!(SOLAR_WIND_DENSITY.contains(&wind.density));
            assert!(SOLAR_WIND_TEMPERATURE.contains(&wind.temperature));
        }
    }

    #[test]
    fn test_missing_sections_are_filled() {
        let mut rng = StdRng::seed_from_u64(3);
        let snapshot = normalize_weather("{}", &mut rng, NOW).unwrap();
        assert_eq!(snapshot.solar_activity.level, "Moderate");
        assert_eq!(snapshot.solar_activity.color, StatusColor::Yellow);
        assert_eq!(snapshot.visibility.condition, "Good");
        assert!(!snapshot.forecast.is_empty());
        assert_eq!(snapshot.last_updated, NOW);
        assert!(SOLAR_WIND_SPEED.contains(&snapshot.solar_wind.speed));
    }

    #[test]
    fn test_invalid_colors_are_derived() {
        let mut value = well_formed_weather();
        value["solarActivity"] = json!({ "level": "extreme", "description": "X-class", "color": "purple" });
        value["geomagneticActivity"] = json!({ "kIndex": 7, "level": "Storm", "color": 3 });
        let mut rng = StdRng::seed_from_u64(0);
        let snapshot = normalize_weather(&value.to_string(), &mut rng, NOW).unwrap();

        assert_eq!(snapshot.solar_activity.level, "Extreme");
        assert_eq!(snapshot.solar_activity.color, StatusColor::Red);
        assert_eq!(snapshot.geomagnetic_activity.k_index, 7);
        assert_eq!(snapshot.geomagnetic_activity.color, StatusColor::Red);
    }

    #[test]
    fn test_geomagnetic_level_and_color_follow_k_index() {
        let extracted = weather_with(
            &["geomagneticActivity"],
            json!({ "kIndex": 2, "level": "Severe Storm", "color": "red" }),
        );
        let mut rng = StdRng::seed_from_u64(0);
        let snapshot = normalize_weather(&extracted, &mut rng, NOW).unwrap();

        assert_eq!(snapshot.geomagnetic_activity.k_index, 2);
        assert_eq!(snapshot.geomagnetic_activity.level, "Quiet");
        assert_eq!(snapshot.geomagnetic_activity.color, StatusColor::Green);
    }

    #[test]
    fn test_forecast_is_truncated() {
        let extracted = weather_with(&["forecast"], json!("a".repeat(500)));
        let mut rng = StdRng::seed_from_u64(0);
        let snapshot = normalize_weather(&extracted, &mut rng, NOW).unwrap();
        assert_eq!(snapshot.forecast.chars().count(), FORECAST_MAX_CHARS);
    }

    #[test]
    fn test_weather_array_is_shape_error() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            normalize_weather("[1, 2]", &mut rng, NOW).unwrap_err(),
            PipelineError::Shape(_)
        ));
    }

    #[test]
    fn test_geomagnetic_bands() {
        assert_eq!(geomagnetic_band(0), ("Quiet", StatusColor::Green));
        assert_eq!(geomagnetic_band(2), ("Quiet", StatusColor::Green));
        assert_eq!(geomagnetic_band(3), ("Unsettled", StatusColor::Yellow));
        assert_eq!(geomagnetic_band(6), ("Active", StatusColor::Orange));
        assert_eq!(geomagnetic_band(9), ("Storm", StatusColor::Red));
    }
}
