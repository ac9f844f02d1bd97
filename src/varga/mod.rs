//! Divisional charts
//!
//! A divisional chart maps a body's longitude into a finer harmonic of the
//! zodiac. Sixteen divisions are supported. Most follow one generic rule
//! that splits each 30 degree sign into `denominator` equal parts; four
//! classical divisions override it with their own forms. Dispatch goes
//! through a strategy map so a new special division only touches the map.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::angles::{normalize_degrees, round_coordinate};
use crate::constants::{NAKSHATRA_COUNT, NAKSHATRA_SPAN_DEG, SIGN_COUNT, SIGN_DEG};
use crate::{ChartError, Result};

/// A supported harmonic division of the zodiac.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Division {
    D1,
    D2,
    D3,
    D4,
    D7,
    D9,
    D10,
    D12,
    D16,
    D20,
    D24,
    D27,
    D30,
    D40,
    D45,
    D60,
}

impl Division {
    /// Full catalog, ascending harmonic order.
    pub const ALL: [Division; 16] = [
        Division::D1,
        Division::D2,
        Division::D3,
        Division::D4,
        Division::D7,
        Division::D9,
        Division::D10,
        Division::D12,
        Division::D16,
        Division::D20,
        Division::D24,
        Division::D27,
        Division::D30,
        Division::D40,
        Division::D45,
        Division::D60,
    ];

    /// Canonical id, `D` plus the denominator.
    pub fn id(&self) -> &'static str {
        match self {
            Division::D1 => "D1",
            Division::D2 => "D2",
            Division::D3 => "D3",
            Division::D4 => "D4",
            Division::D7 => "D7",
            Division::D9 => "D9",
            Division::D10 => "D10",
            Division::D12 => "D12",
            Division::D16 => "D16",
            Division::D20 => "D20",
            Division::D24 => "D24",
            Division::D27 => "D27",
            Division::D30 => "D30",
            Division::D40 => "D40",
            Division::D45 => "D45",
            Division::D60 => "D60",
        }
    }

    /// Traditional Sanskrit name.
    pub fn name(&self) -> &'static str {
        match self {
            Division::D1 => "Rashi",
            Division::D2 => "Hora",
            Division::D3 => "Drekkana",
            Division::D4 => "Chaturthamsa",
            Division::D7 => "Saptamsa",
            Division::D9 => "Navamsa",
            Division::D10 => "Dasamsa",
            Division::D12 => "Dwadasamsa",
            Division::D16 => "Shodasamsa",
            Division::D20 => "Vimshamsa",
            Division::D24 => "Chaturvimshamsa",
            Division::D27 => "Nakshatramsa",
            Division::D30 => "Trimsamsa",
            Division::D40 => "Khavedamsa",
            Division::D45 => "Akshavedamsa",
            Division::D60 => "Shashtyamsa",
        }
    }

    /// Parts each sign is split into under the generic rule.
    pub fn denominator(&self) -> u32 {
        match self {
            Division::D1 => 1,
            Division::D2 => 2,
            Division::D3 => 3,
            Division::D4 => 4,
            Division::D7 => 7,
            Division::D9 => 9,
            Division::D10 => 10,
            Division::D12 => 12,
            Division::D16 => 16,
            Division::D20 => 20,
            Division::D24 => 24,
            Division::D27 => 27,
            Division::D30 => 30,
            Division::D40 => 40,
            Division::D45 => 45,
            Division::D60 => 60,
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Division {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_uppercase();
        Division::ALL
            .iter()
            .copied()
            .find(|division| division.id() == key)
            .ok_or_else(|| ChartError::Validation(format!("unsupported division: {}", s)))
    }
}

/// Sign temperament driving the navamsa base offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignClass {
    Movable,
    Fixed,
    Dual,
}

impl SignClass {
    /// Classify a 0-based sign index; the pattern repeats every three signs.
    pub fn classify(sign_index: u32) -> SignClass {
        match sign_index % 3 {
            0 => SignClass::Movable,
            1 => SignClass::Fixed,
            _ => SignClass::Dual,
        }
    }
}

/// One division's longitude for a source longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DivisionalPosition {
    pub division: Division,
    pub longitude: f64,
}

lazy_static! {
    /// Divisions whose form departs from the generic rule.
    static ref OVERRIDES: HashMap<Division, fn(f64) -> f64> = {
        let mut map: HashMap<Division, fn(f64) -> f64> = HashMap::new();
        map.insert(Division::D9, navamsa);
        map.insert(Division::D12, dwadasamsa);
        map.insert(Division::D27, nakshatramsa);
        map.insert(Division::D30, trimsamsa);
        map
    };
}

/// Divisional longitude for one source longitude.
pub fn calculate(longitude: f64, division: Division) -> f64 {
    let longitude = normalize_degrees(longitude);
    let raw = match OVERRIDES.get(&division) {
        Some(transform) => transform(longitude),
        None => harmonic(longitude, division.denominator()),
    };
    round_coordinate(normalize_degrees(raw))
}

/// Parse a division id list, failing on the first unknown id.
///
/// `None` selects the full sixteen-division catalog.
pub fn parse_ids(ids: Option<&[&str]>) -> Result<Vec<Division>> {
    match ids {
        Some(ids) => ids.iter().map(|id| id.parse()).collect(),
        None => Ok(Division::ALL.to_vec()),
    }
}

/// Several divisions for one longitude, all-or-nothing.
///
/// Every id is parsed before anything is computed, so an unknown id fails
/// the whole batch with no partial result.
pub fn calculate_all(
    longitude: f64,
    ids: Option<&[&str]>,
) -> Result<Vec<DivisionalPosition>> {
    Ok(parse_ids(ids)?
        .into_iter()
        .map(|division| DivisionalPosition {
            division,
            longitude: calculate(longitude, division),
        })
        .collect())
}

/// Quarter of the navamsa grid a longitude occupies within its sign.
pub fn pada(longitude: f64) -> u32 {
    pada_quarter(normalize_degrees(longitude).rem_euclid(SIGN_DEG))
}

fn sign_index(longitude: f64) -> u32 {
    ((longitude / SIGN_DEG) as u32).min(SIGN_COUNT - 1)
}

/// Generic harmonic rule: sign counts forward `denominator` steps per part,
/// the remainder stretches back over the full sign.
fn harmonic(longitude: f64, denominator: u32) -> f64 {
    let n = f64::from(denominator);
    let part_size = SIGN_DEG / n;
    let sign = sign_index(longitude);
    let deg = longitude.rem_euclid(SIGN_DEG);
    let part = ((deg / part_size) as u32).min(denominator - 1);

    let result_sign = (sign * denominator + part) % SIGN_COUNT;
    f64::from(result_sign) * SIGN_DEG + deg.rem_euclid(part_size) * n
}

/// Ninth harmonic. The three sign classes keep separate arms even though
/// the pada arithmetic is currently identical in each.
fn navamsa(longitude: f64) -> f64 {
    let sign = sign_index(longitude);
    let deg = longitude.rem_euclid(SIGN_DEG);

    let (base, pada) = match SignClass::classify(sign) {
        SignClass::Movable => (0.0, pada_quarter(deg)),
        SignClass::Fixed => (120.0, pada_quarter(deg)),
        SignClass::Dual => (240.0, pada_quarter(deg)),
    };

    base + f64::from(pada - 1) * 2.25 + deg.rem_euclid(7.5) * (9.0 / SIGN_DEG)
}

/// Quarter bucket on the 7.5 degree grid, 1 through 4.
fn pada_quarter(deg_in_sign: f64) -> u32 {
    ((deg_in_sign / 7.5) as u32 + 1).min(4)
}

/// Twelfth harmonic: 2.5 degree bands compressed into the source sign.
fn dwadasamsa(longitude: f64) -> f64 {
    let sign = sign_index(longitude);
    let deg = longitude.rem_euclid(SIGN_DEG);
    f64::from(sign) * SIGN_DEG + deg / 2.5
}

/// Twenty-seventh harmonic, cut from the whole circle rather than per sign.
fn nakshatramsa(longitude: f64) -> f64 {
    let segment = ((longitude / NAKSHATRA_SPAN_DEG) as u32).min(NAKSHATRA_COUNT - 1);
    let remainder = longitude - f64::from(segment) * NAKSHATRA_SPAN_DEG;
    f64::from(segment % SIGN_COUNT) * SIGN_DEG + remainder * (SIGN_DEG / NAKSHATRA_SPAN_DEG)
}

/// Unequal trimsamsa bands as (start, end, ruler sign), keyed by sign
/// parity. A 0-based even index is an odd sign.
const ODD_SIGN_BANDS: [(f64, f64, u32); 5] = [
    (0.0, 5.0, 0),   // Aries
    (5.0, 10.0, 10), // Aquarius
    (10.0, 18.0, 8), // Sagittarius
    (18.0, 25.0, 2), // Gemini
    (25.0, 30.0, 6), // Libra
];

const EVEN_SIGN_BANDS: [(f64, f64, u32); 5] = [
    (0.0, 5.0, 1),    // Taurus
    (5.0, 12.0, 5),   // Virgo
    (12.0, 20.0, 11), // Pisces
    (20.0, 25.0, 9),  // Capricorn
    (25.0, 30.0, 7),  // Scorpio
];

/// Thirtieth harmonic, graded over unequal ruler bands instead of equal
/// parts.
fn trimsamsa(longitude: f64) -> f64 {
    let sign = sign_index(longitude);
    let deg = longitude.rem_euclid(SIGN_DEG);
    let bands = if sign % 2 == 0 {
        &ODD_SIGN_BANDS
    } else {
        &EVEN_SIGN_BANDS
    };

    let (start, end, ruler) = bands
        .iter()
        .copied()
        .find(|&(_, end, _)| deg < end)
        .unwrap_or(bands[bands.len() - 1]);

    f64::from(ruler) * SIGN_DEG + (deg - start) / (end - start) * SIGN_DEG
}
