//! Ephemeris provider boundary
//!
//! Raw astronomical positions come from outside this crate. The
//! [`EphemerisProvider`] trait is the whole of that boundary: calendar to
//! Julian date conversion, per-body raw positions, and nutation components.
//!
//! The reference frame is an explicit parameter on every position call.
//! Providers wrapping libraries with a process-global sidereal mode must
//! resolve the frame inside `raw_position` itself, so concurrent requests
//! with different reference systems cannot interleave against the wrong
//! frame.
//!
//! [`SyntheticEphemeris`] is a deterministic in-crate implementation (linear
//! mean-element model) that backs tests, benches, and the CLI without any
//! I/O or data files.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::angles::normalize_degrees;
use crate::ayanamsa::AyanamsaSystem;
use crate::bodies::Body;
use crate::constants::J2000;
use crate::time;

/// Errors raised at the provider boundary.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Raw position lookup failed for one body. The position normalizer
    /// recovers from this per body; it never aborts a batch.
    #[error("position unavailable for {body} at JD {julian_day}: {reason}")]
    PositionUnavailable {
        body: Body,
        julian_day: f64,
        reason: String,
    },

    /// The provider cannot serve the requested frame or option at all.
    #[error("unsupported ephemeris request: {0}")]
    Unsupported(String),
}

/// Reference frame for a raw position request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Tropical (equinox-of-date) ecliptic longitudes.
    Tropical,
    /// Sidereal longitudes under the given reference system, for providers
    /// that compute the offset themselves.
    Sidereal(AyanamsaSystem),
}

/// Geographic observer for topocentric positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
    /// Altitude above sea level in meters.
    pub altitude: f64,
}

/// One raw body record as the provider returns it, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPosition {
    /// Ecliptic longitude in degrees.
    pub longitude: f64,
    /// Ecliptic latitude in degrees.
    pub latitude: f64,
    /// Distance in astronomical units.
    pub distance: f64,
    /// Daily motion in degrees per day, negative when retrograde.
    pub speed: f64,
}

/// Nutation components at a Julian date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Nutation in longitude, arcseconds.
    pub longitude_arcsec: f64,
    /// Nutation in obliquity, arcseconds.
    pub obliquity_arcsec: f64,
}

/// External source of raw astronomical data.
pub trait EphemerisProvider {
    /// Convert a calendar datetime (UTC) to a Julian date.
    fn to_julian_day(&self, datetime: &NaiveDateTime) -> f64;

    /// Raw position of one body. May fail per body; callers decide whether
    /// to recover or propagate.
    fn raw_position(
        &self,
        julian_day: f64,
        body: Body,
        frame: Frame,
        observer: Option<&GeoLocation>,
    ) -> Result<RawPosition, ProviderError>;

    /// Nutation components at the given Julian date.
    fn nutation(&self, julian_day: f64) -> Nutation;
}

/// Mean orbital elements anchored at J2000 for the linear model.
#[derive(Debug, Clone, Copy)]
struct MeanElements {
    epoch_longitude: f64,
    daily_motion: f64,
    latitude: f64,
    distance: f64,
}

const fn mean_elements(body: Body) -> Option<MeanElements> {
    // J2000 mean longitudes; latitudes and distances are epoch snapshots.
    let elements = match body {
        Body::Sun => MeanElements {
            epoch_longitude: 280.459_86,
            daily_motion: 0.985_647_4,
            latitude: 0.000_02,
            distance: 0.983_327_59,
        },
        Body::Moon => MeanElements {
            epoch_longitude: 218.316_54,
            daily_motion: 13.176_396_5,
            latitude: 5.128_43,
            distance: 0.002_603_26,
        },
        Body::Mercury => MeanElements {
            epoch_longitude: 252.250_84,
            daily_motion: 1.383_333_3,
            latitude: 1.215_67,
            distance: 1.415_032_27,
        },
        Body::Venus => MeanElements {
            epoch_longitude: 181.979_73,
            daily_motion: 1.200_000_0,
            latitude: 0.912_46,
            distance: 1.137_154_36,
        },
        Body::Mars => MeanElements {
            epoch_longitude: 355.433_00,
            daily_motion: 0.524_033_3,
            latitude: -1.038_25,
            distance: 1.849_340_42,
        },
        Body::Jupiter => MeanElements {
            epoch_longitude: 34.351_484,
            daily_motion: 0.083_091_2,
            latitude: -1.270_01,
            distance: 4.613_204_51,
        },
        Body::Saturn => MeanElements {
            epoch_longitude: 50.077_471,
            daily_motion: 0.033_459_1,
            latitude: -2.490_37,
            distance: 8.652_401_17,
        },
        Body::Rahu => MeanElements {
            epoch_longitude: 125.044_522,
            daily_motion: -0.052_954_0,
            latitude: 0.0,
            distance: 0.002_569_55,
        },
        // Ketu has no independent ephemeris entry.
        Body::Ketu => return None,
    };
    Some(elements)
}

/// Deterministic ephemeris for tests, benches, and demos.
///
/// Each body moves linearly at its mean rate from its J2000 mean longitude;
/// latitude and distance are held at epoch values. Nutation is the leading
/// IAU 1980 term. Observer input is accepted and ignored (the linear model
/// has no parallax). Sidereal frames are refused so the ayanamsa engine
/// stays the single source of the tropical-to-sidereal offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticEphemeris;

impl SyntheticEphemeris {
    pub fn new() -> Self {
        SyntheticEphemeris
    }
}

impl EphemerisProvider for SyntheticEphemeris {
    fn to_julian_day(&self, datetime: &NaiveDateTime) -> f64 {
        time::julian_date(datetime)
    }

    fn raw_position(
        &self,
        julian_day: f64,
        body: Body,
        frame: Frame,
        _observer: Option<&GeoLocation>,
    ) -> Result<RawPosition, ProviderError> {
        if let Frame::Sidereal(system) = frame {
            return Err(ProviderError::Unsupported(format!(
                "synthetic ephemeris serves tropical positions only, not sidereal {}",
                system
            )));
        }

        let elements = mean_elements(body).ok_or_else(|| ProviderError::PositionUnavailable {
            body,
            julian_day,
            reason: "Ketu is derived from Rahu, never queried".to_string(),
        })?;

        let days = julian_day - J2000;
        Ok(RawPosition {
            longitude: normalize_degrees(elements.epoch_longitude + elements.daily_motion * days),
            latitude: elements.latitude,
            distance: elements.distance,
            speed: elements.daily_motion,
        })
    }

    fn nutation(&self, julian_day: f64) -> Nutation {
        // Leading IAU 1980 series term, driven by the mean lunar node.
        let days = julian_day - J2000;
        let node = (125.044_522 - 0.052_954_0 * days).to_radians();
        Nutation {
            longitude_arcsec: -17.20 * node.sin(),
            obliquity_arcsec: 9.20 * node.cos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_positions_stay_normalized() {
        let eph = SyntheticEphemeris::new();
        for offset in [-80_000.0, -1.5, 0.0, 365.25, 123_456.0] {
            for body in Body::ALL.iter().filter(|b| **b != Body::Ketu) {
                let pos = eph
                    .raw_position(J2000 + offset, *body, Frame::Tropical, None)
                    .unwrap();
                assert!((0.0..360.0).contains(&pos.longitude), "{}", body);
                assert!(pos.distance > 0.0);
            }
        }
    }

    #[test]
    fn test_epoch_longitudes() {
        let eph = SyntheticEphemeris::new();
        let sun = eph
            .raw_position(J2000, Body::Sun, Frame::Tropical, None)
            .unwrap();
        assert_relative_eq!(sun.longitude, 280.459_86);

        let rahu = eph
            .raw_position(J2000, Body::Rahu, Frame::Tropical, None)
            .unwrap();
        assert_relative_eq!(rahu.longitude, 125.044_522);
        assert!(rahu.speed < 0.0);
    }

    #[test]
    fn test_ketu_is_never_served() {
        let eph = SyntheticEphemeris::new();
        let err = eph
            .raw_position(J2000, Body::Ketu, Frame::Tropical, None)
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::PositionUnavailable {
                body: Body::Ketu,
                ..
            }
        ));
    }

    #[test]
    fn test_sidereal_frame_is_refused() {
        let eph = SyntheticEphemeris::new();
        let err = eph
            .raw_position(
                J2000,
                Body::Sun,
                Frame::Sidereal(AyanamsaSystem::Lahiri),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported(_)));
    }

    #[test]
    fn test_nutation_stays_bounded() {
        let eph = SyntheticEphemeris::new();
        for offset in [0.0, 1_000.0, 3_400.0, -6_800.0] {
            let nutation = eph.nutation(J2000 + offset);
            assert!(nutation.longitude_arcsec.abs() <= 17.20);
            assert!(nutation.obliquity_arcsec.abs() <= 9.20);
        }
    }
}
