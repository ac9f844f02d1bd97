//! Angle normalization and fixed-precision rounding
//!
//! Every longitude that leaves this crate is normalized into [0, 360) and
//! rounded to its precision class: 6 decimals for coordinates and times,
//! 8 for distances, 2 for reported orbs and traversal degrees.

use crate::constants::{CIRCLE_DEG, COORD_DECIMALS, DISTANCE_DECIMALS, REPORT_DECIMALS};

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(CIRCLE_DEG);
    // rem_euclid of a tiny negative can land exactly on 360.0
    if wrapped >= CIRCLE_DEG {
        0.0
    } else {
        wrapped
    }
}

/// Angular separation between two longitudes, reduced to the shorter arc.
///
/// The result is always in [0, 180].
pub fn shortest_arc(a: f64, b: f64) -> f64 {
    let diff = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if diff > CIRCLE_DEG / 2.0 {
        CIRCLE_DEG - diff
    } else {
        diff
    }
}

/// Round to a fixed number of decimal digits.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Round a coordinate or time quantity to its precision class.
pub fn round_coordinate(value: f64) -> f64 {
    round_to(value, COORD_DECIMALS)
}

/// Round a distance quantity to its precision class.
pub fn round_distance(value: f64) -> f64 {
    round_to(value, DISTANCE_DECIMALS)
}

/// Round a reported quantity (orb, degrees traversed) to its precision class.
pub fn round_reported(value: f64) -> f64 {
    round_to(value, REPORT_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.5), 5.5);
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(-720.0), 0.0);

        let tiny = normalize_degrees(-1.0e-16);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_shortest_arc() {
        assert_relative_eq!(shortest_arc(10.0, 100.0), 90.0);
        assert_relative_eq!(shortest_arc(100.0, 10.0), 90.0);
        assert_relative_eq!(shortest_arc(350.0, 10.0), 20.0);
        assert_relative_eq!(shortest_arc(0.0, 180.0), 180.0);
        assert_relative_eq!(shortest_arc(5.0, 5.0), 0.0);
    }

    #[test]
    fn test_rounding_precision() {
        assert_eq!(round_coordinate(123.456_789_123), 123.456_789);
        assert_eq!(round_distance(1.234_567_891_23), 1.234_567_89);
        assert_eq!(round_reported(13.333_333), 13.33);
        assert_eq!(round_coordinate(-0.000_000_4), 0.0);
    }

    #[test]
    fn test_rounding_idempotence() {
        for &value in &[45.5, 124.649_999_7, 359.999_999_9, 0.000_000_49, 23.853_2] {
            let once = round_coordinate(value);
            let twice = round_coordinate(once);
            assert_eq!(once, twice);
        }
    }
}
