//! Aspect detection
//!
//! Every unordered pair of bodies is measured by shortest arc and tested
//! against a fixed catalog of nine aspect kinds, each an exact angle with
//! an orb window. The scan never stops at the first match, so a separation
//! inside two overlapping windows would yield two records. Pair order
//! follows position-set order, first body against each later one.

use std::fmt;

use serde::Serialize;

use crate::angles::{round_reported, shortest_arc};
use crate::bodies::Body;
use crate::positions::PositionSet;

/// The nine recognized aspect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Semisextile,
    Quincunx,
    Semisquare,
    Sesquiquadrate,
}

impl AspectKind {
    /// Full catalog, scan order.
    pub const ALL: [AspectKind; 9] = [
        AspectKind::Conjunction,
        AspectKind::Opposition,
        AspectKind::Trine,
        AspectKind::Square,
        AspectKind::Sextile,
        AspectKind::Semisextile,
        AspectKind::Quincunx,
        AspectKind::Semisquare,
        AspectKind::Sesquiquadrate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Opposition => "Opposition",
            AspectKind::Trine => "Trine",
            AspectKind::Square => "Square",
            AspectKind::Sextile => "Sextile",
            AspectKind::Semisextile => "Semisextile",
            AspectKind::Quincunx => "Quincunx",
            AspectKind::Semisquare => "Semisquare",
            AspectKind::Sesquiquadrate => "Sesquiquadrate",
        }
    }

    /// The separation at which the aspect is exact, in degrees.
    pub fn exact_angle(&self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Opposition => 180.0,
            AspectKind::Trine => 120.0,
            AspectKind::Square => 90.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Semisextile => 30.0,
            AspectKind::Quincunx => 150.0,
            AspectKind::Semisquare => 45.0,
            AspectKind::Sesquiquadrate => 135.0,
        }
    }

    /// Half-width of the matching window around the exact angle.
    pub fn orb(&self) -> f64 {
        match self {
            AspectKind::Conjunction | AspectKind::Opposition => 10.0,
            AspectKind::Trine | AspectKind::Square => 8.0,
            AspectKind::Sextile => 6.0,
            AspectKind::Quincunx => 3.0,
            AspectKind::Semisextile
            | AspectKind::Semisquare
            | AspectKind::Sesquiquadrate => 2.0,
        }
    }

    /// The five Ptolemaic aspects count as major.
    pub fn is_major(&self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction
                | AspectKind::Opposition
                | AspectKind::Trine
                | AspectKind::Square
                | AspectKind::Sextile
        )
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One detected aspect between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectRecord {
    pub body1: Body,
    pub body2: Body,
    pub kind: AspectKind,
    /// Catalog angle the pair matched, in degrees.
    pub exact_angle: f64,
    /// Deviation from exactness, rounded for reporting.
    pub orb: f64,
    pub is_major: bool,
    /// Sign of the speed difference only; aspect geometry is not consulted.
    pub is_applying: bool,
}

/// Detect aspects between every unordered pair of bodies in the set.
pub fn find_aspects(positions: &PositionSet) -> Vec<AspectRecord> {
    let entries: Vec<_> = positions.iter().collect();
    let mut records = Vec::new();

    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let (body1, first) = entries[i];
            let (body2, second) = entries[j];
            let separation = shortest_arc(first.longitude, second.longitude);

            for kind in AspectKind::ALL {
                let deviation = (separation - kind.exact_angle()).abs();
                if deviation <= kind.orb() {
                    records.push(AspectRecord {
                        body1: *body1,
                        body2: *body2,
                        kind,
                        exact_angle: kind.exact_angle(),
                        orb: round_reported(deviation),
                        is_major: kind.is_major(),
                        is_applying: first.speed.degrees_per_day
                            - second.speed.degrees_per_day
                            < 0.0,
                    });
                }
            }
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positions::{normalize, PositionSet};
    use crate::provider::RawPosition;
    use approx::assert_relative_eq;

    fn set_of(entries: &[(Body, f64, f64)]) -> PositionSet {
        entries
            .iter()
            .map(|&(body, longitude, speed)| {
                (
                    body,
                    normalize(
                        body,
                        &RawPosition {
                            longitude,
                            latitude: 0.0,
                            distance: 1.0,
                            speed,
                        },
                    ),
                )
            })
            .collect()
    }

    #[test]
    fn test_right_angle_is_one_exact_square() {
        let positions = set_of(&[(Body::Sun, 10.0, 1.0), (Body::Mars, 100.0, 0.5)]);
        let records = find_aspects(&positions);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, AspectKind::Square);
        assert_relative_eq!(records[0].orb, 0.0);
        assert!(records[0].is_major);
    }

    #[test]
    fn test_conjunction_across_the_wrap() {
        let positions = set_of(&[(Body::Sun, 355.0, 1.0), (Body::Moon, 5.0, 13.0)]);
        let records = find_aspects(&positions);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, AspectKind::Conjunction);
        assert_relative_eq!(records[0].orb, 10.0);
    }

    #[test]
    fn test_orb_window_is_inclusive() {
        let positions = set_of(&[(Body::Sun, 0.0, 1.0), (Body::Saturn, 170.0, 0.03)]);
        let records = find_aspects(&positions);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, AspectKind::Opposition);
        assert_relative_eq!(records[0].orb, 10.0);
    }

    #[test]
    fn test_gap_between_windows_yields_nothing() {
        let positions = set_of(&[(Body::Sun, 0.0, 1.0), (Body::Venus, 17.0, 1.2)]);
        assert!(find_aspects(&positions).is_empty());
    }

    #[test]
    fn test_minor_aspect_flagged() {
        let positions = set_of(&[(Body::Sun, 0.0, 1.0), (Body::Mercury, 31.0, 1.4)]);
        let records = find_aspects(&positions);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, AspectKind::Semisextile);
        assert!(!records[0].is_major);
        assert_relative_eq!(records[0].orb, 1.0);
    }

    #[test]
    fn test_applying_follows_speed_difference_sign() {
        // The slower body listed first is closing on the faster one.
        let sun_first = set_of(&[(Body::Sun, 0.0, 1.0), (Body::Moon, 120.0, 13.2)]);
        let moon_first = set_of(&[(Body::Moon, 120.0, 13.2), (Body::Sun, 0.0, 1.0)]);

        assert!(find_aspects(&sun_first)[0].is_applying);
        assert!(!find_aspects(&moon_first)[0].is_applying);
    }

    #[test]
    fn test_pairs_follow_set_order() {
        let positions = set_of(&[
            (Body::Sun, 0.0, 1.0),
            (Body::Moon, 90.0, 13.2),
            (Body::Mars, 180.0, 0.5),
        ]);
        let records = find_aspects(&positions);

        let pairs: Vec<(Body, Body)> = records
            .iter()
            .map(|record| (record.body1, record.body2))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (Body::Sun, Body::Moon),
                (Body::Sun, Body::Mars),
                (Body::Moon, Body::Mars),
            ]
        );
    }

    #[test]
    fn test_catalog_windows_never_double_match() {
        // The shipped windows are pairwise disjoint, so one separation can
        // match at most one kind.
        let mut separation = 0.0;
        while separation <= 180.0 {
            let matched = AspectKind::ALL
                .iter()
                .filter(|kind| (separation - kind.exact_angle()).abs() <= kind.orb())
                .count();
            assert!(matched <= 1, "separation {} matched {}", separation, matched);
            separation += 0.05;
        }
    }
}
