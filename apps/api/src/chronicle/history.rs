//! Static seed history: a handful of well-known events keyed by calendar day.
//!
//! Read-only for the life of the process. Serves the `/api/history` routes and
//! leads the fallback event list for matching dates.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::chronicle::calendar::long_date;
use crate::chronicle::models::{Event, EventCategory};

struct SeedRecord {
    id: &'static str,
    month: u32,
    day: u32,
    year: i32,
    title: &'static str,
    description: &'static str,
    category: EventCategory,
    location: &'static str,
    agency: &'static str,
    mission: Option<&'static str>,
    crew: &'static [&'static str],
    significance: &'static str,
    details: &'static str,
    impact: &'static str,
}

const SEED_EVENTS: &[SeedRecord] = &[
    SeedRecord {
        id: "october-4-1957",
        month: 10,
        day: 4,
        year: 1957,
        title: "Sputnik 1 Becomes the First Artificial Satellite",
        description: "The Soviet Union launches Sputnik 1 from Baikonur, placing the first human-made object into Earth orbit and opening the Space Age.",
        category: EventCategory::Launch,
        location: "Baikonur Cosmodrome, Kazakh SSR",
        agency: "Soviet Space Program",
        mission: Some("Sputnik 1"),
        crew: &[],
        significance: "The beginning of the space age and the space race.",
        details: "A 58 cm polished sphere with four external antennas, broadcasting radio pulses for 21 days.",
        impact: "Prompted the creation of NASA and a surge in science and engineering education.",
    },
    SeedRecord {
        id: "april-12-1961",
        month: 4,
        day: 12,
        year: 1961,
        title: "Yuri Gagarin Becomes the First Human in Space",
        description: "Vostok 1 carries Yuri Gagarin on a single orbit of Earth lasting 108 minutes.",
        category: EventCategory::Mission,
        location: "Baikonur Cosmodrome, Kazakh SSR",
        agency: "Soviet Space Program",
        mission: Some("Vostok 1"),
        crew: &["Yuri Gagarin"],
        significance: "Proof that humans can survive launch, orbit and re-entry.",
        details: "Gagarin ejected at about 7 km altitude and landed by parachute near Engels.",
        impact: "Set the stage for every crewed spaceflight program that followed.",
    },
    SeedRecord {
        id: "july-20-1969",
        month: 7,
        day: 20,
        year: 1969,
        title: "Apollo 11 Lands on the Moon",
        description: "The lunar module Eagle touches down in the Sea of Tranquility and Neil Armstrong becomes the first person to walk on the Moon.",
        category: EventCategory::Landing,
        location: "Sea of Tranquility, Moon",
        agency: "NASA",
        mission: Some("Apollo 11"),
        crew: &["Neil Armstrong", "Buzz Aldrin", "Michael Collins"],
        significance: "The first crewed landing on another world.",
        details: "Armstrong and Aldrin spent about two and a half hours outside the lunar module and collected 21.5 kg of samples.",
        impact: "Fulfilled the national goal set in 1961 and remains a defining moment of exploration.",
    },
    SeedRecord {
        id: "september-5-1977",
        month: 9,
        day: 5,
        year: 1977,
        title: "Voyager 1 Launches Toward the Outer Planets",
        description: "Voyager 1 lifts off on a Titan IIIE-Centaur on a trajectory past Jupiter and Saturn.",
        category: EventCategory::Launch,
        location: "Cape Canaveral, Florida",
        agency: "NASA",
        mission: Some("Voyager 1"),
        crew: &[],
        significance: "The spacecraft later became the first to enter interstellar space.",
        details: "Powered by three radioisotope thermoelectric generators and carrying the Golden Record.",
        impact: "Transformed our understanding of the giant planets and the heliosphere.",
    },
    SeedRecord {
        id: "april-24-1990",
        month: 4,
        day: 24,
        year: 1990,
        title: "Space Shuttle Discovery Launches the Hubble Space Telescope",
        description: "STS-31 carries the Hubble Space Telescope to orbit; it is deployed the following day.",
        category: EventCategory::Observatory,
        location: "Kennedy Space Center, Florida",
        agency: "NASA/ESA",
        mission: Some("STS-31"),
        crew: &[
            "Loren Shriver",
            "Charles Bolden",
            "Steven Hawley",
            "Bruce McCandless II",
            "Kathryn Sullivan",
        ],
        significance: "The first large optical observatory placed in orbit.",
        details: "A 2.4 m primary mirror, later corrected by the 1993 servicing mission.",
        impact: "Refined the expansion rate of the universe and produced iconic deep-field images.",
    },
    SeedRecord {
        id: "november-20-1998",
        month: 11,
        day: 20,
        year: 1998,
        title: "Zarya, the First ISS Module, Reaches Orbit",
        description: "A Proton rocket launches the Zarya functional cargo block, the first component of the International Space Station.",
        category: EventCategory::Launch,
        location: "Baikonur Cosmodrome, Kazakhstan",
        agency: "Roscosmos/NASA",
        mission: Some("ISS Assembly Flight 1A/R"),
        crew: &[],
        significance: "The start of on-orbit assembly of the International Space Station.",
        details: "Zarya provided early power, storage and propulsion for the station.",
        impact: "Began more than two decades of continuous international cooperation in orbit.",
    },
    SeedRecord {
        id: "august-6-2012",
        month: 8,
        day: 6,
        year: 2012,
        title: "Curiosity Rover Lands in Gale Crater",
        description: "NASA's Mars Science Laboratory lands the Curiosity rover using the sky-crane system.",
        category: EventCategory::Landing,
        location: "Gale Crater, Mars",
        agency: "NASA",
        mission: Some("Mars Science Laboratory"),
        crew: &[],
        significance: "The heaviest rover landed on Mars at the time.",
        details: "The sky crane lowered the 899 kg rover on cables before flying away.",
        impact: "Found evidence that ancient Mars could have supported microbial life.",
    },
    SeedRecord {
        id: "december-25-2021",
        month: 12,
        day: 25,
        year: 2021,
        title: "James Webb Space Telescope Launches",
        description: "An Ariane 5 launches the James Webb Space Telescope toward the Sun-Earth L2 point.",
        category: EventCategory::Observatory,
        location: "Guiana Space Centre, Kourou",
        agency: "NASA/ESA/CSA",
        mission: Some("JWST"),
        crew: &[],
        significance: "The largest space telescope ever launched.",
        details: "A 6.5 m segmented mirror and a five-layer sunshield, unfolded after launch.",
        impact: "Opened the infrared universe, from early galaxies to exoplanet atmospheres.",
    },
    SeedRecord {
        id: "july-5-2025",
        month: 7,
        day: 5,
        year: 2025,
        title: "Russian Progress 92 Cargo Ship Docks with ISS",
        description: "The Russian Progress 92 cargo spacecraft successfully docks with the International Space Station, delivering essential supplies including food, fuel, scientific equipment, and crew provisions.",
        category: EventCategory::Docking,
        location: "International Space Station",
        agency: "Roscosmos",
        mission: Some("Progress 92 Resupply Mission"),
        crew: &[],
        significance: "Continues the vital supply chain to the ISS, ensuring crew sustainability and mission continuity.",
        details: "Progress spacecraft are unmanned cargo vehicles that have been reliably servicing space stations since 1978. This mission carries approximately 2.5 tons of supplies.",
        impact: "Maintains continuous operation of the ISS laboratory and supports ongoing scientific research in microgravity.",
    },
];

/// A seed event with its calendar key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedEvent {
    pub id: String,
    pub month: u32,
    pub day: u32,
    #[serde(flatten)]
    pub event: Event,
}

impl SeedRecord {
    fn to_seed_event(&self) -> SeedEvent {
        SeedEvent {
            id: self.id.to_string(),
            month: self.month,
            day: self.day,
            event: Event {
                title: self.title.to_string(),
                year: self.year,
                description: self.description.to_string(),
                category: self.category,
                location: Some(self.location.to_string()),
                agency: Some(self.agency.to_string()),
                mission: self.mission.map(str::to_string),
                crew: (!self.crew.is_empty())
                    .then(|| self.crew.iter().map(|c| c.to_string()).collect()),
                significance: Some(self.significance.to_string()),
                details: Some(self.details.to_string()),
                impact: Some(self.impact.to_string()),
            },
        }
    }
}

/// Seed events on the month/day of `date`, oldest first.
pub fn events_for_date(date: NaiveDate) -> Vec<SeedEvent> {
    let mut events: Vec<_> = SEED_EVENTS
        .iter()
        .filter(|r| r.month == date.month() && r.day == date.day())
        .map(SeedRecord::to_seed_event)
        .collect();
    events.sort_by_key(|e| e.event.year);
    events
}

/// Every seed event ordered by month, day, then year.
pub fn all_events() -> Vec<SeedEvent> {
    let mut events: Vec<_> = SEED_EVENTS.iter().map(SeedRecord::to_seed_event).collect();
    events.sort_by_key(|e| (e.month, e.day, e.event.year));
    events
}

/// Case-insensitive match on title, description, category, agency or mission.
pub fn search_events(query: &str) -> Vec<SeedEvent> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let matches = |text: &str| text.to_lowercase().contains(&query);

    all_events()
        .into_iter()
        .filter(|seed| {
            let e = &seed.event;
            matches(&e.title)
                || matches(&e.description)
                || matches(e.category.as_str())
                || e.agency.as_deref().is_some_and(matches)
                || e.mission.as_deref().is_some_and(matches)
        })
        .collect()
}

/// Locally composed insights text built from the seed events for `date`.
pub fn daily_summary(date: NaiveDate) -> String {
    let events = events_for_date(date);
    let day = long_date(date);

    let Some(featured) = events.last() else {
        return format!(
            "On {day} in space history, while no major recorded events are in our immediate database for this specific date, \
space exploration continues daily with ongoing missions, research, and discoveries. The International Space Station orbits \
Earth every 90 minutes, conducting vital scientific research, while robotic missions throughout the solar system continue \
their exploration of distant worlds."
        );
    };

    let mut summary = format!("On {day} in space history, {} ", featured.event.description);
    if let Some(agency) = &featured.event.agency {
        summary.push_str(&format!("This mission by {agency} "));
    }
    if let Some(significance) = &featured.event.significance {
        summary.push_str(&format!("represents {} ", significance.to_lowercase()));
    }

    summary.push_str(&format!("\n\nKey events on {day} in space history:\n"));
    for seed in &events {
        summary.push_str(&format!("• {}: {}\n", seed.event.year, seed.event.title));
    }

    summary.trim_end().to_string()
}

/// Markdown write-up of a single event.
pub fn detailed_analysis(event: &Event) -> String {
    let mut analysis = format!("**{} ({})**\n\n{}\n\n", event.title, event.year, event.description);

    if let Some(agency) = &event.agency {
        analysis.push_str(&format!("**Agency:** {agency}\n"));
    }
    if let Some(mission) = &event.mission {
        analysis.push_str(&format!("**Mission:** {mission}\n"));
    }
    if let Some(crew) = event.crew.as_ref().filter(|c| !c.is_empty()) {
        analysis.push_str(&format!("**Crew:** {}\n", crew.join(", ")));
    }
    if let Some(location) = &event.location {
        analysis.push_str(&format!("**Location:** {location}\n"));
    }
    if let Some(significance) = &event.significance {
        analysis.push_str(&format!("\n**Historical Significance:**\n{significance}\n"));
    }
    if let Some(details) = &event.details {
        analysis.push_str(&format!("\n**Technical Details:**\n{details}\n"));
    }
    if let Some(impact) = &event.impact {
        analysis.push_str(&format!("\n**Long-term Impact:**\n{impact}\n"));
    }

    analysis
}
