//! # Orbital element representations
//!
//! This module defines the element set consumed by the evaluator:
//!
//! - [`keplerian_element`](crate::orbit_type::keplerian_element): Classical Keplerian elements
//!   `(a, e, i, Ω, ω)` plus a [`MeanAnomaly`], restricted to elliptic orbits.
//!
//! Two sources of mean anomaly coexist in practice and are kept apart at the type level:
//!
//! * asteroid/comet catalogs publish `M` already referred to the present day
//!   ([`MeanAnomaly::Observed`]);
//! * planetary ephemeris tables publish `M0` at a reference epoch, usually J2000, which must
//!   be advanced with the orbital period before use ([`MeanAnomaly::AtReference`]).
//!
//! ## Typical workflow
//!
//! ```rust, no_run
//! use heliorbit::orbit_type::{keplerian_element::KeplerianElements, MeanAnomaly};
//!
//! let earth = KeplerianElements::from_degrees(
//!     1.0, 0.0167, 0.0, -11.26, 114.207,
//!     MeanAnomaly::at_j2000_degrees(357.529),
//! );
//! assert_eq!(earth.orbital_period_years(), 1.0);
//! ```
use hifitime::Epoch;

use crate::{
    constants::{Degree, Radian, RADEG},
    kepler::principal_angle,
    time::j2000,
};

/// Classical Keplerian elements structure and utilities.
pub mod keplerian_element;

/// Mean anomaly together with the instant it refers to.
///
/// Variants
/// --------
/// * `Observed`: mean anomaly (radians) taken as valid at the evaluation epoch.
/// * `AtReference`: mean anomaly (radians) at `reference_epoch`, to be propagated
///   with the mean motion `360° / P`, `P = a^1.5` years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeanAnomaly {
    Observed(Radian),
    AtReference {
        mean_anomaly: Radian,
        reference_epoch: Epoch,
    },
}

impl MeanAnomaly {
    /// Directly observed mean anomaly given in degrees, reduced modulo 360°.
    pub fn observed_degrees(m: Degree) -> Self {
        MeanAnomaly::Observed(principal_angle(m * RADEG))
    }

    /// Mean anomaly in degrees at J2000.0 (2000-01-01 12:00 UTC).
    pub fn at_j2000_degrees(m0: Degree) -> Self {
        Self::at_epoch_degrees(m0, j2000())
    }

    /// Mean anomaly in degrees at an arbitrary reference epoch.
    pub fn at_epoch_degrees(m0: Degree, reference_epoch: Epoch) -> Self {
        MeanAnomaly::AtReference {
            mean_anomaly: principal_angle(m0 * RADEG),
            reference_epoch,
        }
    }

    /// Stored angle in radians, regardless of the reference.
    pub fn angle(&self) -> Radian {
        match self {
            MeanAnomaly::Observed(m) => *m,
            MeanAnomaly::AtReference { mean_anomaly, .. } => *mean_anomaly,
        }
    }
}
