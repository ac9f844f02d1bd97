//! Constants module for sidereal chart calculations

// Epochs
/// J2000.0 epoch as Julian date (2000-01-01 12:00 TT)
pub const J2000: f64 = 2_451_545.0;
/// Julian date of 1900-01-01 00:00, lower boundary of the 1900-1999 era band
pub const ERA_1900_JD: f64 = 2_415_020.5;
/// Julian date of 2000-01-01 00:00, lower boundary of the modern era band
pub const ERA_2000_JD: f64 = 2_451_544.5;

// Time constants
/// Seconds in a day
pub const DAY_SECONDS: f64 = 86_400.0;
/// Days in a Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;
/// Days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

// Angles
/// Degrees in a complete circle
pub const CIRCLE_DEG: f64 = 360.0;
/// Arcseconds in one degree
pub const ASEC_PER_DEG: f64 = 3_600.0;
/// Degrees spanned by one zodiac sign
pub const SIGN_DEG: f64 = 30.0;
/// Number of zodiac signs
pub const SIGN_COUNT: u32 = 12;

// Precession and era corrections
/// General precession rate in arcseconds per Julian century
pub const PRECESSION_ASEC_PER_CENTURY: f64 = 50.27;
/// Era drift in arcseconds per year for dates before 1900, measured from 1900-01-01
pub const ERA_DRIFT_PRE_1900_ASEC: f64 = -0.0108;
/// Era drift in arcseconds per year for 1900-1999, measured from 1900-01-01
pub const ERA_DRIFT_1900_ASEC: f64 = 0.0050;
/// Era drift in arcseconds per year for 2000 onward, measured from 2000-01-01
pub const ERA_DRIFT_2000_ASEC: f64 = 0.0100;

// Lunar mansions
/// Number of nakshatras along the ecliptic
pub const NAKSHATRA_COUNT: u32 = 27;
/// Degrees spanned by one nakshatra (13 degrees 20 minutes)
pub const NAKSHATRA_SPAN_DEG: f64 = CIRCLE_DEG / NAKSHATRA_COUNT as f64;
/// Degrees spanned by one pada, a quarter nakshatra (3 degrees 20 minutes)
pub const PADA_SPAN_DEG: f64 = NAKSHATRA_SPAN_DEG / 4.0;

// Precision classes
/// Decimal digits kept for coordinate and time quantities
pub const COORD_DECIMALS: u32 = 6;
/// Decimal digits kept for distance quantities
pub const DISTANCE_DECIMALS: u32 = 8;
/// Decimal digits kept for reported orbs and traversal degrees
pub const REPORT_DECIMALS: u32 = 2;
