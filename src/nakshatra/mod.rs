//! Lunar mansion placement
//!
//! The ecliptic splits into 27 nakshatras of 13 degrees 20 minutes each,
//! every one ruled by a body from a fixed nine-lord cycle and subdivided
//! into four padas. Placement is a pure function of longitude.

use serde::Serialize;

use crate::angles::{normalize_degrees, round_reported};
use crate::bodies::Body;
use crate::constants::{NAKSHATRA_COUNT, NAKSHATRA_SPAN_DEG, PADA_SPAN_DEG};
use crate::positions::PositionSet;

/// The 27 mansion names, Ashwini through Revati.
pub const NAMES: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishta",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

/// Ruling lords; the cycle repeats three times across the 27 mansions.
const LORD_CYCLE: [Body; 9] = [
    Body::Ketu,
    Body::Venus,
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Rahu,
    Body::Jupiter,
    Body::Saturn,
    Body::Mercury,
];

/// One body's mansion placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraPlacement {
    /// Mansion number, 1 through 27.
    pub number: u32,
    pub name: &'static str,
    /// Ruling lord from the nine-body cycle.
    pub lord: Body,
    /// Quarter within the mansion, 1 through 4.
    pub pada: u32,
    /// Arc already covered within the mansion, rounded for reporting.
    pub degrees_traversed: f64,
    /// Full mansion span, rounded for reporting.
    pub segment_span: f64,
}

/// Mansion placement for one longitude.
pub fn calculate(longitude: f64) -> NakshatraPlacement {
    let longitude = normalize_degrees(longitude);

    // A longitude one ulp under 360 can divide out to the segment count
    // itself, so the index is clamped to the last mansion.
    let index = ((longitude / NAKSHATRA_SPAN_DEG) as usize).min(NAKSHATRA_COUNT as usize - 1);
    let within = longitude - index as f64 * NAKSHATRA_SPAN_DEG;
    let pada = ((within / PADA_SPAN_DEG) as u32 + 1).min(4);

    NakshatraPlacement {
        number: index as u32 + 1,
        name: NAMES[index],
        lord: LORD_CYCLE[index % LORD_CYCLE.len()],
        pada,
        degrees_traversed: round_reported(within),
        segment_span: round_reported(NAKSHATRA_SPAN_DEG),
    }
}

/// Mansion placements for every body in the set, preserving its order.
pub fn calculate_all(positions: &PositionSet) -> Vec<(Body, NakshatraPlacement)> {
    positions
        .iter()
        .map(|(body, position)| (*body, calculate(position.longitude)))
        .collect()
}
