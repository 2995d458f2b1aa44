//! Fallback Generator: hand-authored content built from the date alone.
//!
//! Every function here returns a complete value, never a `Result`: this is
//! what the pipeline serves when anything upstream fails.

use chrono::{Datelike, NaiveDate};
use rand::Rng;

use crate::chronicle::calendar::{long_date, month_name};
use crate::chronicle::history::events_for_date;
use crate::chronicle::models::{
    Event, EventCategory, GeomagneticActivity, SolarActivity, SolarWind, StatusColor, Visibility,
    WeatherSnapshot,
};
use crate::chronicle::normalizer::geomagnetic_band;

pub const FALLBACK_FORECAST: &str = "Space weather conditions are currently stable with minor geomagnetic disturbances possible. \
Aurora activity may be visible at high latitudes tonight.";

/// Seed events for the day, then four generic date-parameterized entries.
pub fn fallback_events(date: NaiveDate) -> Vec<Event> {
    let month = month_name(date);
    let day = date.day();
    let year = date.year();

    let mut events: Vec<Event> = events_for_date(date)
        .into_iter()
        .map(|seed| seed.event)
        .collect();

    events.extend([
        Event {
            title: format!("Space History Research: {month} {day}"),
            year,
            description: format!(
                "Comprehensive analysis of space exploration events that occurred on {month} {day} throughout history. \
This research examines mission archives, crew logs, and technical documentation from space agencies worldwide \
to uncover significant milestones in humanity's journey to the stars."
            ),
            category: EventCategory::Discovery,
            location: Some("Global Space Archives".to_string()),
            agency: Some("International Space Community".to_string()),
            mission: None,
            crew: None,
            significance: Some(
                "Ongoing documentation of space exploration history helps preserve achievements and inspire future missions."
                    .to_string(),
            ),
            details: Some(
                "Research involves analyzing mission logs, technical documentation, crew reports, and scientific publications from major space agencies."
                    .to_string(),
            ),
            impact: Some(
                "Preserving space history provides valuable lessons for future exploration and maintains public interest in space science."
                    .to_string(),
            ),
        },
        Event {
            title: format!("International Space Station Operations: {month} {day}"),
            year,
            description: format!(
                "Daily operations aboard the International Space Station continue on {month} {day}, with crew members \
conducting scientific experiments, maintaining station systems, and preparing for upcoming missions. The ISS orbits \
Earth every 90 minutes, serving as humanity's permanent outpost in space."
            ),
            category: EventCategory::Mission,
            location: Some("International Space Station".to_string()),
            agency: Some("NASA/Roscosmos/ESA/JAXA".to_string()),
            mission: None,
            crew: None,
            significance: Some(
                "Represents continuous human presence in space and ongoing international cooperation in space exploration."
                    .to_string(),
            ),
            details: Some(
                "ISS operations include scientific research, technology demonstrations, Earth observation, and crew health monitoring in microgravity."
                    .to_string(),
            ),
            impact: Some(
                "ISS research advances our understanding of space medicine, materials science, and Earth systems while preparing for future deep space missions."
                    .to_string(),
            ),
        },
        Event {
            title: format!("Robotic Space Missions: {month} {day}"),
            year,
            description: format!(
                "Various robotic spacecraft continue their exploration missions throughout the solar system on {month} {day}. \
These automated explorers study planets, moons, asteroids, and comets, sending valuable scientific data back to Earth \
and expanding our understanding of the cosmos."
            ),
            category: EventCategory::Mission,
            location: Some("Solar System".to_string()),
            agency: Some("Multiple International Agencies".to_string()),
            mission: None,
            crew: None,
            significance: Some(
                "Robotic missions extend human reach throughout the solar system, exploring environments too dangerous or distant for crewed missions."
                    .to_string(),
            ),
            details: Some(
                "Current robotic missions include planetary rovers, orbital spacecraft, deep space probes, and asteroid sample return missions."
                    .to_string(),
            ),
            impact: Some(
                "Robotic exploration provides crucial data for future human missions and advances our scientific understanding of planetary formation and evolution."
                    .to_string(),
            ),
        },
        Event {
            title: format!("Space Technology Development: {month} {day}"),
            year,
            description: format!(
                "Ongoing development of next-generation space technologies continues on {month} {day}, including advanced \
propulsion systems, life support technologies, and spacecraft designs. These innovations will enable future missions \
to the Moon, Mars, and beyond."
            ),
            category: EventCategory::Achievement,
            location: Some("Global Research Facilities".to_string()),
            agency: Some("International Space Industry".to_string()),
            mission: None,
            crew: None,
            significance: Some(
                "Technological advancement is essential for expanding human presence in space and enabling sustainable exploration."
                    .to_string(),
            ),
            details: Some(
                "Current developments include reusable launch vehicles, closed-loop life support systems, in-situ resource utilization, and advanced materials."
                    .to_string(),
            ),
            impact: Some(
                "New technologies reduce mission costs, increase safety, and enable more ambitious exploration goals including permanent space settlements."
                    .to_string(),
            ),
        },
    ]);

    events
}

pub fn fallback_insights(date: NaiveDate) -> String {
    let day = long_date(date);
    format!(
        "On {day} in space history, space exploration continues with ongoing missions and research activities around the world. \
The International Space Station orbits Earth every 90 minutes, conducting vital scientific research, while robotic missions \
throughout the solar system continue their exploration of distant worlds.

Space agencies worldwide maintain continuous operations, monitoring spacecraft, analyzing data from deep space missions, \
and preparing for future exploration endeavors. This includes mission planning, astronaut training, technology development, \
and international cooperation efforts.

Key ongoing space activities:
• International Space Station operations and scientific research
• Robotic planetary exploration missions throughout the solar system
• Space telescope observations expanding our understanding of the universe
• Development of next-generation spacecraft and exploration technologies

Our space history database continues to grow as we research and document the remarkable achievements that have occurred \
on this date throughout the history of space exploration."
    )
}

/// Unseeded callers get a different snapshot every time; all numbers stay
/// inside the same ranges the normalizer enforces.
pub fn fallback_weather<R: Rng>(rng: &mut R, generated_at: &str) -> WeatherSnapshot {
    let k_index = rng.random_range(1u8..=5);
    let (level, color) = geomagnetic_band(k_index);

    WeatherSnapshot {
        solar_activity: SolarActivity {
            level: "Moderate".to_string(),
            description: "Solar activity monitoring in progress".to_string(),
            color: StatusColor::Yellow,
        },
        solar_wind: SolarWind {
            speed: f64::from(rng.random_range(400u32..=600)),
            density: f64::from(rng.random_range(50u32..=150)) / 10.0,
            temperature: f64::from(rng.random_range(80_000u32..=120_000)),
        },
        geomagnetic_activity: GeomagneticActivity {
            k_index,
            level: level.to_string(),
            color,
        },
        visibility: Visibility {
            condition: "Good".to_string(),
            description: "Favorable conditions for astronomical observations".to_string(),
            color: StatusColor::Green,
        },
        forecast: FALLBACK_FORECAST.to_string(),
        last_updated: generated_at.to_string(),
    }
}
