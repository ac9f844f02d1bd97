//! Chart assembly
//!
//! One call runs the whole pipeline for an instant: Julian day, ayanamsa,
//! tropical positions, sidereal conversion, then lunar mansions, aspects,
//! and divisional charts off the same sidereal set. Positions are fetched
//! tropical and converted here exactly once, so every consumer sees the
//! same reference frame.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::aspects::{self, AspectRecord};
use crate::ayanamsa::{to_sidereal, AyanamsaEngine, AyanamsaSystem, AyanamsaValue};
use crate::bodies::Body;
use crate::nakshatra::{self, NakshatraPlacement};
use crate::positions::{fetch_positions, PositionSet};
use crate::provider::{EphemerisProvider, Frame, GeoLocation};
use crate::varga::{self, DivisionalPosition};
use crate::{ChartError, Result};

/// A computed sidereal chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub julian_day: f64,
    pub ayanamsa: AyanamsaValue,
    /// Sidereal positions in chart body order.
    pub positions: PositionSet,
    pub nakshatras: Vec<(Body, NakshatraPlacement)>,
    pub aspects: Vec<AspectRecord>,
    pub divisional: Vec<(Body, Vec<DivisionalPosition>)>,
}

/// Compute a full chart for one instant.
///
/// `divisions` follows the divisional batch contract: ids are validated up
/// front and an unknown id fails the whole request; `None` selects the full
/// catalog. The observer, when given, must be a plausible ground location.
pub fn compute_chart<P: EphemerisProvider>(
    provider: &P,
    datetime: &NaiveDateTime,
    system: AyanamsaSystem,
    divisions: Option<&[&str]>,
    observer: Option<&GeoLocation>,
) -> Result<Chart> {
    let divisions = varga::parse_ids(divisions)?;
    if let Some(location) = observer {
        validate_observer(location)?;
    }

    let julian_day = provider.to_julian_day(datetime);
    let ayanamsa = AyanamsaEngine::new().calculate(provider, datetime, system);

    let tropical = fetch_positions(provider, julian_day, &Body::ALL, Frame::Tropical, observer);
    let positions = to_sidereal(&tropical, ayanamsa.degrees);

    let nakshatras = nakshatra::calculate_all(&positions);
    let aspects = aspects::find_aspects(&positions);
    let divisional = positions
        .iter()
        .map(|(body, position)| {
            let charts = divisions
                .iter()
                .map(|&division| DivisionalPosition {
                    division,
                    longitude: varga::calculate(position.longitude, division),
                })
                .collect();
            (*body, charts)
        })
        .collect();

    log::debug!(
        "chart at JD {} under {}: {} aspects",
        julian_day,
        system,
        aspects.len()
    );

    Ok(Chart {
        julian_day,
        ayanamsa,
        positions,
        nakshatras,
        aspects,
        divisional,
    })
}

/// Ground-location sanity bounds, matching the service request limits.
fn validate_observer(location: &GeoLocation) -> Result<()> {
    if !(-90.0..=90.0).contains(&location.latitude) {
        return Err(ChartError::Validation(format!(
            "latitude out of range: {}",
            location.latitude
        )));
    }
    if !(-180.0..=180.0).contains(&location.longitude) {
        return Err(ChartError::Validation(format!(
            "longitude out of range: {}",
            location.longitude
        )));
    }
    if !(-1_000.0..=9_000.0).contains(&location.altitude) {
        return Err(ChartError::Validation(format!(
            "altitude out of range: {}",
            location.altitude
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SyntheticEphemeris;
    use crate::varga::Division;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn birth_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 21)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_chart_carries_all_sections() {
        let eph = SyntheticEphemeris::new();
        let chart =
            compute_chart(&eph, &birth_time(), AyanamsaSystem::Lahiri, None, None).unwrap();

        assert_eq!(chart.positions.len(), Body::ALL.len());
        assert_eq!(chart.nakshatras.len(), Body::ALL.len());
        assert_eq!(chart.divisional.len(), Body::ALL.len());
        for (_, charts) in &chart.divisional {
            assert_eq!(charts.len(), Division::ALL.len());
        }
        // Lahiri sits near 24 degrees in the current era.
        assert!(chart.ayanamsa.degrees > 23.0 && chart.ayanamsa.degrees < 25.0);
    }

    #[test]
    fn test_positions_are_sidereal() {
        let eph = SyntheticEphemeris::new();
        let when = birth_time();
        let chart = compute_chart(&eph, &when, AyanamsaSystem::Lahiri, None, None).unwrap();

        let tropical = fetch_positions(
            &eph,
            eph.to_julian_day(&when),
            &[Body::Sun],
            Frame::Tropical,
            None,
        );
        let expected = (tropical.get(Body::Sun).unwrap().longitude - chart.ayanamsa.degrees)
            .rem_euclid(360.0);
        assert_relative_eq!(
            chart.positions.get(Body::Sun).unwrap().longitude,
            expected,
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn test_requested_divisions_only() {
        let eph = SyntheticEphemeris::new();
        let chart = compute_chart(
            &eph,
            &birth_time(),
            AyanamsaSystem::Krishnamurti,
            Some(&["D1", "D9", "D12"]),
            None,
        )
        .unwrap();

        let (_, charts) = &chart.divisional[0];
        let ids: Vec<Division> = charts.iter().map(|c| c.division).collect();
        assert_eq!(ids, vec![Division::D1, Division::D9, Division::D12]);
    }

    #[test]
    fn test_unknown_division_fails_before_any_work() {
        let eph = SyntheticEphemeris::new();
        let err = compute_chart(
            &eph,
            &birth_time(),
            AyanamsaSystem::Lahiri,
            Some(&["D1", "D99"]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::Validation(_)));
    }

    #[test]
    fn test_observer_bounds_are_enforced() {
        let eph = SyntheticEphemeris::new();
        let off_planet = GeoLocation {
            latitude: 91.0,
            longitude: 77.2,
            altitude: 0.0,
        };
        let err = compute_chart(
            &eph,
            &birth_time(),
            AyanamsaSystem::Lahiri,
            None,
            Some(&off_planet),
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::Validation(_)));
    }

    #[test]
    fn test_chart_is_deterministic() {
        let eph = SyntheticEphemeris::new();
        let first =
            compute_chart(&eph, &birth_time(), AyanamsaSystem::Raman, None, None).unwrap();
        let second =
            compute_chart(&eph, &birth_time(), AyanamsaSystem::Raman, None, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nodes_stay_opposed_after_conversion() {
        let eph = SyntheticEphemeris::new();
        let chart =
            compute_chart(&eph, &birth_time(), AyanamsaSystem::Lahiri, None, None).unwrap();

        let rahu = chart.positions.get(Body::Rahu).unwrap().longitude;
        let ketu = chart.positions.get(Body::Ketu).unwrap().longitude;
        assert_relative_eq!(
            (ketu - rahu).rem_euclid(360.0),
            180.0,
            epsilon = 1.0e-6
        );
    }
}
