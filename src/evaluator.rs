//! # Current-position evaluator
//!
//! Places a body on its Keplerian orbit at a given [`Epoch`]:
//!
//! 1. **Mean anomaly at the epoch** ([`mean_anomaly_at`]):
//!    * [`MeanAnomaly::Observed`] is used as-is (catalog values already refer to "now");
//!    * [`MeanAnomaly::AtReference`] is advanced with `M(t) = M0 + 2π·Δt / P`, where
//!      `Δt` is the elapsed time in Julian years and `P = a^1.5` years, then reduced
//!      modulo 2π.
//! 2. **Eccentric anomaly** from [`solve_kepler`].
//! 3. **True anomaly** `ν` from [`eccentric_to_true_anomaly`] and **distance**
//!    `r = a(1 − e·cos E)`.
//! 4. **Ecliptic position** by rotating `(r·cos ν, r·sin ν)` with [`EclipticRotation`].
//!
//! The evaluation is a pure function of `(elements, epoch, params)`: repeated calls return
//! bit-identical results and rows can be evaluated in any order or in parallel.
//!
//! ## Failure semantics
//!
//! [`current_position`] reports failures as [`HeliorbitError`] values. Batch callers that
//! want NaN placeholders instead use [`current_position_or_nan`], which never fails.
use hifitime::Epoch;
use nalgebra::Vector3;

use crate::{
    constants::{AstronomicalUnit, Radian, DPI},
    heliorbit_errors::HeliorbitError,
    kepler::{eccentric_to_true_anomaly, principal_angle, solve_kepler},
    orbit_geometry::EclipticRotation,
    orbit_type::{keplerian_element::KeplerianElements, MeanAnomaly},
    params::EvaluationParams,
    time::julian_years_between,
};

/// Heliocentric state of a body at the evaluation epoch.
///
/// Units
/// -----
/// * `position`: ecliptic X, Y, Z in AU.
/// * `distance`: heliocentric distance `r` in AU.
/// * anomalies: radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeliocentricState {
    pub position: Vector3<f64>,
    pub distance: AstronomicalUnit,
    pub mean_anomaly: Radian,
    pub eccentric_anomaly: Radian,
    pub true_anomaly: Radian,
}

impl HeliocentricState {
    /// State whose every component is NaN, standing for "could not be evaluated".
    pub fn undefined() -> Self {
        Self {
            position: Vector3::repeat(f64::NAN),
            distance: f64::NAN,
            mean_anomaly: f64::NAN,
            eccentric_anomaly: f64::NAN,
            true_anomaly: f64::NAN,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.distance.is_finite()
    }

    /// `(X, Y, Z, r)` tuple handed to reporting and rendering layers.
    pub fn xyzr(&self) -> (f64, f64, f64, f64) {
        (
            self.position.x,
            self.position.y,
            self.position.z,
            self.distance,
        )
    }
}

/// Mean anomaly (radians, in `[0, 2π)`) of a body at `epoch`.
///
/// Arguments
/// ---------
/// * `elements` – element set; only `a` and the mean anomaly are read.
/// * `epoch` – evaluation instant; ignored for [`MeanAnomaly::Observed`].
pub fn mean_anomaly_at(elements: &KeplerianElements, epoch: Epoch) -> Radian {
    match elements.mean_anomaly {
        MeanAnomaly::Observed(m) => principal_angle(m),
        MeanAnomaly::AtReference {
            mean_anomaly,
            reference_epoch,
        } => {
            let elapsed = julian_years_between(reference_epoch, epoch);
            let period = elements.orbital_period_years();
            principal_angle(mean_anomaly + DPI * elapsed / period)
        }
    }
}

/// Position and distance of a body at `epoch`.
///
/// Return
/// ------
/// * `Ok(HeliocentricState)` on success.
/// * `Err(_)` with [`HeliorbitError::NonFiniteElement`], [`HeliorbitError::InvalidSemiMajorAxis`],
///   [`HeliorbitError::EccentricityOutOfDomain`] or [`HeliorbitError::KeplerNonConvergence`].
pub fn current_position(
    elements: &KeplerianElements,
    epoch: Epoch,
    params: &EvaluationParams,
) -> Result<HeliocentricState, HeliorbitError> {
    elements.validate()?;

    let a = elements.semi_major_axis;
    let e = elements.eccentricity;

    let mean_anomaly = mean_anomaly_at(elements, epoch);
    let eccentric_anomaly = solve_kepler(
        mean_anomaly,
        e,
        params.kepler_tolerance,
        params.kepler_max_iter,
    )?;
    let true_anomaly = eccentric_to_true_anomaly(eccentric_anomaly, e);
    let distance = a * (1.0 - e * eccentric_anomaly.cos());

    let position = EclipticRotation::from_elements(elements).apply_polar(distance, true_anomaly);

    Ok(HeliocentricState {
        position,
        distance,
        mean_anomaly,
        eccentric_anomaly,
        true_anomaly,
    })
}

/// Lenient variant of [`current_position`]: failures turn into
/// [`HeliocentricState::undefined`].
pub fn current_position_or_nan(
    elements: &KeplerianElements,
    epoch: Epoch,
    params: &EvaluationParams,
) -> HeliocentricState {
    current_position(elements, epoch, params).unwrap_or_else(|_| HeliocentricState::undefined())
}
