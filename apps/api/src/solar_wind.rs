//! Best-effort reader for the public NOAA SWPC solar-wind summary feed.
//!
//! A missing or odd-looking feed is never an error for callers: `latest_speed`
//! returns `None` and the generated snapshot is served unchanged.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::chronicle::models::WeatherSnapshot;
use crate::chronicle::normalizer::SOLAR_WIND_SPEED;

#[derive(Clone)]
pub struct SolarWindFeed {
    client: Client,
    url: String,
}

impl SolarWindFeed {
    pub fn new(url: String) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("space-chronicle/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, url })
    }

    /// Latest solar-wind speed in km/s, if the feed answers with one.
    pub async fn latest_speed(&self) -> Option<f64> {
        let response = match self.client.get(&self.url).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                warn!("Solar wind feed returned {}", r.status());
                return None;
            }
            Err(e) => {
                warn!("Solar wind feed unavailable: {e}");
                return None;
            }
        };

        match response.json::<Value>().await {
            Ok(body) => parse_wind_speed(&body),
            Err(e) => {
                warn!("Solar wind feed returned invalid JSON: {e}");
                None
            }
        }
    }
}

/// Understands both feed layouts:
/// - summary object: `{"WindSpeed": "420", "TimeStamp": "…"}`
/// - row table: `[["time_tag", "speed"], ["2024-07-20 12:00", "420"]]`,
///   where the last row is the latest reading.
pub fn parse_wind_speed(body: &Value) -> Option<f64> {
    let reading = match body {
        Value::Object(fields) => fields
            .get("WindSpeed")
            .or_else(|| fields.get("proton_speed"))?,
        Value::Array(rows) => rows.last()?.as_array()?.get(1)?,
        _ => return None,
    };

    let speed = match reading {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    speed.is_finite().then_some(speed)
}

/// Replaces the generated wind speed with the observed one (rounded), unless
/// the observation falls outside the dashboard's documented range.
pub fn merge_observed_speed(snapshot: &mut WeatherSnapshot, observed: Option<f64>) {
    let Some(speed) = observed else {
        return;
    };

    let rounded = speed.round();
    if SOLAR_WIND_SPEED.contains(&rounded) {
        debug!("Merging observed solar wind speed {rounded} km/s");
        snapshot.solar_wind.speed = rounded;
    } else {
        warn!("Ignoring observed solar wind speed {speed} km/s outside dashboard range");
    }
}
