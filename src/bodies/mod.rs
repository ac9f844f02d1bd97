//! Celestial bodies of the sidereal chart
//!
//! The nine grahas of the classical chart. Rahu is taken as the mean
//! ascending lunar node; Ketu is never fetched from the ephemeris provider
//! and is always derived from Rahu during position normalization.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ChartError;

/// A chart body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Rahu,
    Ketu,
}

impl Body {
    /// All chart bodies in conventional chart order.
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Rahu,
        Body::Ketu,
    ];

    /// Conventional English name.
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
        }
    }

    /// True for the two lunar nodes.
    pub fn is_node(&self) -> bool {
        matches!(self, Body::Rahu | Body::Ketu)
    }

    /// Mean daily motion in degrees, the baseline for relative speed.
    ///
    /// Ketu regresses with Rahu, so both nodes share the mean node rate.
    pub fn mean_daily_motion(&self) -> f64 {
        match self {
            Body::Sun => 0.9856,
            Body::Moon => 13.1764,
            Body::Mercury => 1.3833,
            Body::Venus => 1.2000,
            Body::Mars => 0.5240,
            Body::Jupiter => 0.0831,
            Body::Saturn => 0.0334,
            Body::Rahu | Body::Ketu => 0.0529,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sun" => Ok(Body::Sun),
            "moon" => Ok(Body::Moon),
            "mercury" => Ok(Body::Mercury),
            "venus" => Ok(Body::Venus),
            "mars" => Ok(Body::Mars),
            "jupiter" => Ok(Body::Jupiter),
            "saturn" => Ok(Body::Saturn),
            "rahu" => Ok(Body::Rahu),
            "ketu" => Ok(Body::Ketu),
            _ => Err(ChartError::Validation(format!("unknown body: {}", s))),
        }
    }
}
