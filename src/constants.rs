//! # Constants and type definitions for Heliorbit
//!
//! This module centralizes the **conversion factors**, **reference values**, and **unit type
//! aliases** used throughout the `heliorbit` library.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, days ↔ Julian years)
//! - Reference epoch J2000 expressed as a calendar instant (UTC)
//! - Default numerical settings for the Kepler solver and orbit sampling
//! - Semi-major axes of the outer planets used as distance boundaries
//!
//! Angles are carried in **radians** inside the crate; catalog inputs in degrees are
//! converted once at construction.

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Number of seconds in a Julian year
pub const SECONDS_PER_JULIAN_YEAR: f64 = SECONDS_PER_DAY * DAYS_PER_JULIAN_YEAR;

/// Calendar components of J2000.0 (2000-01-01 12:00:00 UTC): year, month, day, hour
pub const J2000_GREGORIAN_UTC: (i32, u8, u8, u8) = (2000, 1, 1, 12);

// -------------------------------------------------------------------------------------------------
// Numerical defaults
// -------------------------------------------------------------------------------------------------

/// Default convergence threshold on |ΔE| for the Kepler solver (radians)
pub const KEPLER_TOLERANCE: f64 = 1e-8;

/// Default iteration cap for the Kepler solver
pub const KEPLER_MAX_ITER: usize = 100;

/// Eccentricity above which the solver starts from E₀ = π instead of E₀ = M
pub const HIGH_ECCENTRICITY: f64 = 0.8;

/// Default number of samples along an orbit curve of a small body
pub const ORBIT_SAMPLES: usize = 250;

/// Number of samples along a planetary orbit curve
pub const PLANET_ORBIT_SAMPLES: usize = 400;

// -------------------------------------------------------------------------------------------------
// Planetary distance boundaries (AU)
// -------------------------------------------------------------------------------------------------

pub const JUPITER_BOUNDARY: AstronomicalUnit = 5.2;
pub const SATURN_BOUNDARY: AstronomicalUnit = 9.58;
pub const URANUS_BOUNDARY: AstronomicalUnit = 19.2;
pub const NEPTUNE_BOUNDARY: AstronomicalUnit = 30.1;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Duration in Julian years
pub type JulianYear = f64;
