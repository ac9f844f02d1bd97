//! Body position normalization
//!
//! Raw provider output becomes reporting-grade records here: coordinates
//! rounded into their precision classes, speeds annotated with retrograde
//! and relative-speed fields, and Ketu synthesized from Rahu rather than
//! queried. A failed per-body fetch is replaced by a documented zero
//! placeholder so one unavailable body never aborts a whole chart.

use serde::Serialize;

use crate::angles::{normalize_degrees, round_coordinate, round_distance};
use crate::bodies::Body;
use crate::provider::{EphemerisProvider, Frame, GeoLocation, RawPosition};

/// Speed annotations for one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedInfo {
    /// Signed longitudinal speed in degrees per day.
    pub degrees_per_day: f64,
    /// True when the longitudinal motion runs backward through the zodiac.
    pub is_retrograde: bool,
    /// Speed magnitude over the body's mean daily motion; near 1 is typical.
    pub relative_speed: f64,
}

/// One body's normalized position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees, within [0, 360).
    pub longitude: f64,
    /// Ecliptic latitude in degrees.
    pub latitude: f64,
    /// Distance from the observer in astronomical units.
    pub distance: f64,
    pub speed: SpeedInfo,
}

/// Normalized positions in insertion order.
///
/// Iteration order is exactly the request order, which downstream engines
/// rely on for pair enumeration and report layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct PositionSet {
    entries: Vec<(Body, BodyPosition)>,
}

impl PositionSet {
    pub fn new() -> Self {
        PositionSet::default()
    }

    /// Insert a position, replacing any earlier record for the same body
    /// in place.
    pub fn insert(&mut self, body: Body, position: BodyPosition) {
        if let Some(slot) = self.entries.iter_mut().find(|(b, _)| *b == body) {
            slot.1 = position;
        } else {
            self.entries.push((body, position));
        }
    }

    pub fn get(&self, body: Body) -> Option<&BodyPosition> {
        self.entries
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, position)| position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Body, BodyPosition)> {
        self.entries.iter()
    }

    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.entries.iter().map(|(body, _)| *body)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Body, BodyPosition)> for PositionSet {
    fn from_iter<I: IntoIterator<Item = (Body, BodyPosition)>>(iter: I) -> Self {
        let mut set = PositionSet::new();
        for (body, position) in iter {
            set.insert(body, position);
        }
        set
    }
}

impl<'a> IntoIterator for &'a PositionSet {
    type Item = &'a (Body, BodyPosition);
    type IntoIter = std::slice::Iter<'a, (Body, BodyPosition)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Normalize one raw provider record.
pub fn normalize(body: Body, raw: &RawPosition) -> BodyPosition {
    BodyPosition {
        longitude: round_coordinate(normalize_degrees(raw.longitude)),
        latitude: round_coordinate(raw.latitude),
        distance: round_distance(raw.distance),
        speed: speed_info(body, raw.speed),
    }
}

fn speed_info(body: Body, degrees_per_day: f64) -> SpeedInfo {
    let rounded = round_coordinate(degrees_per_day);
    SpeedInfo {
        degrees_per_day: rounded,
        is_retrograde: rounded < 0.0,
        relative_speed: rounded.abs() / body.mean_daily_motion(),
    }
}

/// Synthesize Ketu from an already-normalized Rahu record.
///
/// Ketu sits diametrically opposite Rahu with mirrored latitude and motion.
/// It is never queried from a provider.
pub fn ketu_from_rahu(rahu: &BodyPosition) -> BodyPosition {
    BodyPosition {
        longitude: round_coordinate(normalize_degrees(rahu.longitude + 180.0)),
        latitude: round_coordinate(-rahu.latitude),
        distance: rahu.distance,
        speed: speed_info(Body::Ketu, -rahu.speed.degrees_per_day),
    }
}

/// The documented stand-in for a body the provider could not place.
pub fn placeholder() -> BodyPosition {
    BodyPosition {
        longitude: 0.0,
        latitude: 0.0,
        distance: 0.0,
        speed: SpeedInfo {
            degrees_per_day: 0.0,
            is_retrograde: false,
            relative_speed: 0.0,
        },
    }
}

/// Fetch and normalize positions for a set of bodies at one instant.
///
/// Provider failures are recovered per body: the placeholder is substituted
/// with a warning and the batch continues. Ketu is derived from the batch's
/// Rahu record, fetching Rahu on the side when it was not requested; a Rahu
/// that fell back to the placeholder yields a Ketu at longitude 180.
pub fn fetch_positions<P: EphemerisProvider>(
    provider: &P,
    julian_day: f64,
    bodies: &[Body],
    frame: Frame,
    observer: Option<&GeoLocation>,
) -> PositionSet {
    let mut set = PositionSet::new();
    for &body in bodies {
        let position = if body == Body::Ketu {
            let rahu = match set.get(Body::Rahu) {
                Some(rahu) => *rahu,
                None => fetch_one(provider, julian_day, Body::Rahu, frame, observer),
            };
            ketu_from_rahu(&rahu)
        } else {
            fetch_one(provider, julian_day, body, frame, observer)
        };
        set.insert(body, position);
    }
    set
}

fn fetch_one<P: EphemerisProvider>(
    provider: &P,
    julian_day: f64,
    body: Body,
    frame: Frame,
    observer: Option<&GeoLocation>,
) -> BodyPosition {
    match provider.raw_position(julian_day, body, frame, observer) {
        Ok(raw) => normalize(body, &raw),
        Err(err) => {
            log::warn!("substituting zeros for {}: {}", body, err);
            placeholder()
        }
    }
}
