//! Ayanamsa computation
//!
//! The ayanamsa is the angular offset between the tropical and sidereal
//! zodiacs for a named reference system and a date. The model here is a
//! per-system base value at J2000 plus a fixed calibration offset, a linear
//! general-precession term, a small era correction banded by calendar year,
//! and an optional nutation-in-longitude correction obtained from the
//! ephemeris provider.
//!
//! Values are deterministic in (system, date) and rounded to the coordinate
//! precision class.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::angles::{normalize_degrees, round_coordinate};
use crate::constants::{
    ASEC_PER_DEG, DAYS_PER_YEAR, ERA_1900_JD, ERA_2000_JD, ERA_DRIFT_1900_ASEC,
    ERA_DRIFT_2000_ASEC, ERA_DRIFT_PRE_1900_ASEC, PRECESSION_ASEC_PER_CENTURY,
};
use crate::positions::{BodyPosition, PositionSet};
use crate::provider::EphemerisProvider;
use crate::time;
use crate::{ChartError, Result};

/// A named sidereal reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AyanamsaSystem {
    Lahiri,
    Raman,
    Krishnamurti,
    Yukteshwar,
    JnBhasin,
    FaganBradley,
    Sassanian,
    Aldebaran,
    GalacticCenter,
}

impl AyanamsaSystem {
    /// All supported systems, catalog order.
    pub const ALL: [AyanamsaSystem; 9] = [
        AyanamsaSystem::Lahiri,
        AyanamsaSystem::Raman,
        AyanamsaSystem::Krishnamurti,
        AyanamsaSystem::Yukteshwar,
        AyanamsaSystem::JnBhasin,
        AyanamsaSystem::FaganBradley,
        AyanamsaSystem::Sassanian,
        AyanamsaSystem::Aldebaran,
        AyanamsaSystem::GalacticCenter,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            AyanamsaSystem::Lahiri => "Lahiri",
            AyanamsaSystem::Raman => "Raman",
            AyanamsaSystem::Krishnamurti => "Krishnamurti",
            AyanamsaSystem::Yukteshwar => "Yukteshwar",
            AyanamsaSystem::JnBhasin => "JN Bhasin",
            AyanamsaSystem::FaganBradley => "Fagan-Bradley",
            AyanamsaSystem::Sassanian => "Sassanian",
            AyanamsaSystem::Aldebaran => "Aldebaran",
            AyanamsaSystem::GalacticCenter => "Galactic Center",
        }
    }

    /// One-line provenance note.
    pub fn description(&self) -> &'static str {
        match self {
            AyanamsaSystem::Lahiri => "Chitrapaksha; official ayanamsa of the Indian government",
            AyanamsaSystem::Raman => "B.V. Raman's system, used by many Indian astrologers",
            AyanamsaSystem::Krishnamurti => "K.S. Krishnamurti's KP system",
            AyanamsaSystem::Yukteshwar => "Sri Yukteshwar's reckoning from The Holy Science",
            AyanamsaSystem::JnBhasin => "J.N. Bhasin's sidereal reckoning",
            AyanamsaSystem::FaganBradley => "Western sidereal astrology",
            AyanamsaSystem::Sassanian => "Persian astrology of the Sassanian era",
            AyanamsaSystem::Aldebaran => "True Aldebaran held at 15 degrees Taurus",
            AyanamsaSystem::GalacticCenter => "Galactic center held at 0 degrees Sagittarius",
        }
    }

    /// Base ayanamsa in degrees at the J2000 epoch.
    pub fn base_j2000_deg(&self) -> f64 {
        match self {
            AyanamsaSystem::Lahiri => 23.85,
            AyanamsaSystem::Raman => 22.50,
            AyanamsaSystem::Krishnamurti => 23.0,
            AyanamsaSystem::Yukteshwar => 22.0,
            AyanamsaSystem::JnBhasin => 22.376,
            AyanamsaSystem::FaganBradley => 24.0,
            AyanamsaSystem::Sassanian => 22.0,
            AyanamsaSystem::Aldebaran => 23.0,
            AyanamsaSystem::GalacticCenter => 23.0,
        }
    }

    /// Fixed per-system calibration offset in degrees.
    pub fn calibration_deg(&self) -> f64 {
        match self {
            AyanamsaSystem::Raman => 0.15,
            AyanamsaSystem::Krishnamurti => 0.25,
            AyanamsaSystem::Yukteshwar => -0.12,
            AyanamsaSystem::JnBhasin => 0.18,
            _ => 0.0,
        }
    }
}

impl fmt::Display for AyanamsaSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AyanamsaSystem {
    type Err = ChartError;

    /// Case-insensitive; `KP` is accepted for Krishnamurti.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match key.as_str() {
            "LAHIRI" => Ok(AyanamsaSystem::Lahiri),
            "RAMAN" => Ok(AyanamsaSystem::Raman),
            "KRISHNAMURTI" | "KP" => Ok(AyanamsaSystem::Krishnamurti),
            "YUKTESHWAR" => Ok(AyanamsaSystem::Yukteshwar),
            "JN_BHASIN" => Ok(AyanamsaSystem::JnBhasin),
            "FAGAN_BRADLEY" => Ok(AyanamsaSystem::FaganBradley),
            "SASSANIAN" => Ok(AyanamsaSystem::Sassanian),
            "ALDEBARAN" => Ok(AyanamsaSystem::Aldebaran),
            "GALACTIC" | "GALACTIC_CENTER" => Ok(AyanamsaSystem::GalacticCenter),
            _ => Err(ChartError::Validation(format!(
                "unsupported ayanamsa system: {}",
                s
            ))),
        }
    }
}

/// A computed ayanamsa: deterministic in (system, date).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AyanamsaValue {
    pub system: AyanamsaSystem,
    /// Julian date the value was computed for.
    pub julian_day: f64,
    /// Offset in degrees, rounded to the coordinate precision class.
    pub degrees: f64,
}

/// Computes ayanamsa values for dates and reference systems.
#[derive(Debug, Clone, Copy)]
pub struct AyanamsaEngine {
    include_nutation: bool,
}

impl Default for AyanamsaEngine {
    fn default() -> Self {
        AyanamsaEngine {
            include_nutation: true,
        }
    }
}

impl AyanamsaEngine {
    pub fn new() -> Self {
        AyanamsaEngine::default()
    }

    /// Toggle the nutation correction. Default is on.
    pub fn with_nutation(mut self, include: bool) -> Self {
        self.include_nutation = include;
        self
    }

    /// Ayanamsa for a date under a reference system.
    pub fn calculate<P: EphemerisProvider>(
        &self,
        provider: &P,
        datetime: &NaiveDateTime,
        system: AyanamsaSystem,
    ) -> AyanamsaValue {
        let jd = provider.to_julian_day(datetime);

        let mut degrees = system.base_j2000_deg() + system.calibration_deg();
        degrees +=
            PRECESSION_ASEC_PER_CENTURY * time::julian_centuries(jd) / ASEC_PER_DEG;
        degrees += era_correction(datetime.year(), jd);

        if self.include_nutation {
            degrees += provider.nutation(jd).longitude_arcsec / ASEC_PER_DEG;
        }

        log::debug!("ayanamsa {} at JD {}: {}", system, jd, degrees);
        AyanamsaValue {
            system,
            julian_day: jd,
            degrees: round_coordinate(degrees),
        }
    }

    /// Ayanamsa for a system given by name. Unknown names fail with a
    /// validation error.
    pub fn calculate_named<P: EphemerisProvider>(
        &self,
        provider: &P,
        datetime: &NaiveDateTime,
        system: &str,
    ) -> Result<AyanamsaValue> {
        Ok(self.calculate(provider, datetime, system.parse()?))
    }

    /// Ayanamsa under every supported system, catalog order.
    pub fn compare_systems<P: EphemerisProvider>(
        &self,
        provider: &P,
        datetime: &NaiveDateTime,
    ) -> Vec<(AyanamsaSystem, f64)> {
        AyanamsaSystem::ALL
            .iter()
            .map(|&system| (system, self.calculate(provider, datetime, system).degrees))
            .collect()
    }
}

/// Era correction in degrees, banded by calendar year.
///
/// Each band is linear in fractional years from its own boundary date, so
/// the term is exactly zero on 1900-01-01 and 2000-01-01.
fn era_correction(year: i32, jd: f64) -> f64 {
    let (drift_asec_per_year, boundary_jd) = if year < 1900 {
        (ERA_DRIFT_PRE_1900_ASEC, ERA_1900_JD)
    } else if year < 2000 {
        (ERA_DRIFT_1900_ASEC, ERA_1900_JD)
    } else {
        (ERA_DRIFT_2000_ASEC, ERA_2000_JD)
    };

    let years_from_boundary = (jd - boundary_jd) / DAYS_PER_YEAR;
    drift_asec_per_year * years_from_boundary / ASEC_PER_DEG
}

/// Convert a tropical longitude to sidereal by subtracting the ayanamsa.
pub fn apply_ayanamsa(tropical_longitude: f64, ayanamsa_degrees: f64) -> f64 {
    normalize_degrees(tropical_longitude - ayanamsa_degrees)
}

/// Convert a whole position set from tropical to sidereal longitudes.
///
/// Latitudes, distances, and speeds are frame-independent here and carry
/// over unchanged; longitudes are re-rounded to the coordinate class.
pub fn to_sidereal(positions: &PositionSet, ayanamsa_degrees: f64) -> PositionSet {
    positions
        .iter()
        .map(|(body, position)| {
            let sidereal = BodyPosition {
                longitude: round_coordinate(apply_ayanamsa(
                    position.longitude,
                    ayanamsa_degrees,
                )),
                ..*position
            };
            (*body, sidereal)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SyntheticEphemeris;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_century_of_precession() {
        let eph = SyntheticEphemeris::new();
        let engine = AyanamsaEngine::new().with_nutation(false);

        let recent = engine.calculate(&eph, &midnight(2000, 1, 1), AyanamsaSystem::Lahiri);
        let old = engine.calculate(&eph, &midnight(1900, 1, 1), AyanamsaSystem::Lahiri);

        assert_abs_diff_eq!(
            recent.degrees - old.degrees,
            PRECESSION_ASEC_PER_CENTURY / ASEC_PER_DEG,
            epsilon = 0.001
        );
    }

    #[test]
    fn test_era_term_vanishes_on_boundaries() {
        // On each band's own boundary the correction is exactly the base,
        // calibration, and precession terms.
        let eph = SyntheticEphemeris::new();
        let engine = AyanamsaEngine::new().with_nutation(false);

        for (date, boundary_jd) in [
            (midnight(1900, 1, 1), ERA_1900_JD),
            (midnight(2000, 1, 1), ERA_2000_JD),
        ] {
            let value = engine.calculate(&eph, &date, AyanamsaSystem::Lahiri);
            let precession = PRECESSION_ASEC_PER_CENTURY
                * time::julian_centuries(boundary_jd)
                / ASEC_PER_DEG;
            assert_relative_eq!(
                value.degrees,
                round_coordinate(23.85 + precession),
                epsilon = 1.0e-9
            );
        }
    }

    #[test]
    fn test_value_grows_across_eras() {
        let eph = SyntheticEphemeris::new();
        let engine = AyanamsaEngine::new().with_nutation(false);

        let years = [1800, 1900, 1999, 2000, 2100];
        let values: Vec<f64> = years
            .iter()
            .map(|&y| {
                engine
                    .calculate(&eph, &midnight(y, 1, 1), AyanamsaSystem::Lahiri)
                    .degrees
            })
            .collect();
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1], "{:?}", values);
        }
    }

    #[test]
    fn test_nutation_toggle_stays_small() {
        let eph = SyntheticEphemeris::new();
        let date = midnight(2024, 6, 15);

        let with = AyanamsaEngine::new().calculate(&eph, &date, AyanamsaSystem::Lahiri);
        let without = AyanamsaEngine::new()
            .with_nutation(false)
            .calculate(&eph, &date, AyanamsaSystem::Lahiri);

        let effect = (with.degrees - without.degrees).abs();
        assert!(effect > 0.0);
        assert!(effect < 0.02, "nutation effect {} too large", effect);
    }

    #[rstest]
    #[case("LAHIRI", AyanamsaSystem::Lahiri)]
    #[case("lahiri", AyanamsaSystem::Lahiri)]
    #[case("KP", AyanamsaSystem::Krishnamurti)]
    #[case("Krishnamurti", AyanamsaSystem::Krishnamurti)]
    #[case("FAGAN_BRADLEY", AyanamsaSystem::FaganBradley)]
    #[case("Fagan-Bradley", AyanamsaSystem::FaganBradley)]
    #[case("galactic center", AyanamsaSystem::GalacticCenter)]
    fn test_system_parsing(#[case] input: &str, #[case] expected: AyanamsaSystem) {
        assert_eq!(input.parse::<AyanamsaSystem>().unwrap(), expected);
    }

    #[test]
    fn test_unsupported_system_fails_validation() {
        let eph = SyntheticEphemeris::new();
        let engine = AyanamsaEngine::new();
        let err = engine
            .calculate_named(&eph, &midnight(2024, 1, 1), "TROPICAL_PLUS")
            .unwrap_err();
        assert!(matches!(err, ChartError::Validation(_)));
    }

    #[test]
    fn test_base_value_at_epoch() {
        let eph = SyntheticEphemeris::new();
        let noon_j2000 = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let value = AyanamsaEngine::new()
            .with_nutation(false)
            .calculate(&eph, &noon_j2000, AyanamsaSystem::Lahiri);
        assert_abs_diff_eq!(value.degrees, 23.85, epsilon = 1.0e-6);
    }

    #[test]
    fn test_compare_systems_catalog_order() {
        let eph = SyntheticEphemeris::new();
        let comparison = AyanamsaEngine::new().compare_systems(&eph, &midnight(2024, 1, 1));

        assert_eq!(comparison.len(), AyanamsaSystem::ALL.len());
        assert_eq!(comparison[0].0, AyanamsaSystem::Lahiri);
        // Raman sits 1.2 degrees below Lahiri (base + calibration).
        assert_abs_diff_eq!(comparison[0].1 - comparison[1].1, 1.2, epsilon = 1.0e-6);
    }

    #[test]
    fn test_apply_ayanamsa_wraps() {
        assert_relative_eq!(apply_ayanamsa(10.0, 23.85), 346.15);
        assert_relative_eq!(apply_ayanamsa(200.0, 23.85), 176.15);
    }
}
