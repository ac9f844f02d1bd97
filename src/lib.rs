//! Siderea: sidereal chart computations
//!
//! This crate computes the building blocks of a sidereal chart: ayanamsa
//! offsets for named reference systems, normalized body positions, lunar
//! mansion placements, aspect detection, and harmonic divisional charts,
//! all driven through a pluggable ephemeris provider.

use thiserror::Error;

pub mod angles;
pub mod aspects;
pub mod ayanamsa;
pub mod bodies;
pub mod chart;
pub mod constants;
pub mod nakshatra;
pub mod positions;
pub mod provider;
pub mod time;
pub mod varga;

// Re-export commonly used types
pub use aspects::{AspectKind, AspectRecord};
pub use ayanamsa::{AyanamsaEngine, AyanamsaSystem, AyanamsaValue};
pub use bodies::Body;
pub use chart::{compute_chart, Chart};
pub use nakshatra::NakshatraPlacement;
pub use positions::{BodyPosition, PositionSet, SpeedInfo};
pub use provider::{EphemerisProvider, Frame, GeoLocation, ProviderError, SyntheticEphemeris};
pub use varga::{Division, DivisionalPosition};

/// Main error type for chart computations
///
/// Caller mistakes fail fast as `Validation`; a provider failure for a
/// single body during a batch fetch is instead recovered in place by the
/// position normalizer and never surfaces here.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Provider(#[from] provider::ProviderError),
}

/// Result type for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;
