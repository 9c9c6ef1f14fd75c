//! # Kepler equation solver
//!
//! Newton–Raphson solution of the elliptic Kepler equation
//!
//! ```text
//! M = E − e·sin(E)
//! ```
//!
//! for the eccentric anomaly `E`, given the mean anomaly `M` (radians) and the
//! eccentricity `0 ≤ e < 1`.
//!
//! ## Algorithm
//!
//! 1. `M` is reduced to `[0, 2π)` with [`principal_angle`].
//! 2. Starting guess `E₀ = M` when `e < 0.8`, otherwise `E₀ = π`.
//! 3. Update `E ← E + (M − (E − e·sin E)) / (1 − e·cos E)` until `|ΔE| < tol`.
//! 4. The loop is capped at `max_iter` steps; exhausting the cap is reported as
//!    [`HeliorbitError::KeplerNonConvergence`], distinct from a missing input.
//!
//! Near-parabolic eccentricities (`e → 1`) are outside the contract and rejected
//! as [`HeliorbitError::EccentricityOutOfDomain`].
//!
//! ## See also
//! ------------
//! * [`eccentric_to_true_anomaly`] – Half-angle conversion `E → ν`.
//! * [`crate::evaluator`] – Uses the solver to place a body at an epoch.
use std::f64::consts::PI;

use log::debug;

use crate::{
    constants::{Radian, DPI, HIGH_ECCENTRICITY},
    heliorbit_errors::HeliorbitError,
};

/// Reduce an angle (radians) to its principal value in `[0, 2π)`.
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Signed difference `a − b` between two angles, folded into `[-π, π]`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let mut diff = principal_angle(a) - principal_angle(b);

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

/// Solve Kepler's equation for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` in radians, any real value (wrapped to `[0, 2π)`).
/// * `eccentricity`: eccentricity `e`, must satisfy `0 ≤ e < 1`.
/// * `tolerance`: convergence threshold on the Newton step `|ΔE|` (radians).
/// * `max_iter`: maximum number of Newton steps.
///
/// Return
/// ------
/// * `Ok(E)` – the eccentric anomaly in radians, close to `[0, 2π]`.
/// * `Err(HeliorbitError::NonFiniteElement)` – `M` or `e` is NaN/infinite.
/// * `Err(HeliorbitError::EccentricityOutOfDomain)` – `e < 0` or `e ≥ 1`.
/// * `Err(HeliorbitError::KeplerNonConvergence)` – the cap was reached.
pub fn solve_kepler(
    mean_anomaly: Radian,
    eccentricity: f64,
    tolerance: f64,
    max_iter: usize,
) -> Result<Radian, HeliorbitError> {
    if !mean_anomaly.is_finite() {
        return Err(HeliorbitError::NonFiniteElement {
            name: "mean_anomaly",
        });
    }
    if !eccentricity.is_finite() {
        return Err(HeliorbitError::NonFiniteElement {
            name: "eccentricity",
        });
    }
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(HeliorbitError::EccentricityOutOfDomain(eccentricity));
    }

    let m = principal_angle(mean_anomaly);
    let e = eccentricity;

    let mut ecc_anomaly = if e < HIGH_ECCENTRICITY { m } else { PI };
    let mut step = f64::INFINITY;

    for _ in 0..max_iter {
        step = (m - (ecc_anomaly - e * ecc_anomaly.sin())) / (1.0 - e * ecc_anomaly.cos());
        ecc_anomaly += step;
        if step.abs() < tolerance {
            return Ok(ecc_anomaly);
        }
    }

    debug!(
        "Kepler solver stalled: M = {m}, e = {e}, {max_iter} iterations, last |dE| = {:e}",
        step.abs()
    );

    Err(HeliorbitError::KeplerNonConvergence {
        mean_anomaly: m,
        eccentricity: e,
        iterations: max_iter,
        last_step: step.abs(),
    })
}

/// Element-wise solver over independent `(M, e)` pairs.
///
/// Each pair is solved on its own; a failure on one pair has no effect on the others
/// and the output keeps the input order.
pub fn solve_kepler_many<I>(
    inputs: I,
    tolerance: f64,
    max_iter: usize,
) -> impl Iterator<Item = Result<Radian, HeliorbitError>>
where
    I: IntoIterator<Item = (Radian, f64)>,
{
    inputs
        .into_iter()
        .map(move |(m, e)| solve_kepler(m, e, tolerance, max_iter))
}

/// Mean anomaly from the eccentric anomaly (forward Kepler equation).
#[inline]
pub fn eccentric_to_mean_anomaly(ecc_anomaly: Radian, eccentricity: f64) -> Radian {
    ecc_anomaly - eccentricity * ecc_anomaly.sin()
}

/// True anomaly from the eccentric anomaly:
/// `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`.
///
/// The result lies in `(−π, π]` and follows `E` continuously through the quadrants.
#[inline]
pub fn eccentric_to_true_anomaly(ecc_anomaly: Radian, eccentricity: f64) -> Radian {
    let half = 0.5 * ecc_anomaly;
    2.0 * f64::atan2(
        (1.0 + eccentricity).sqrt() * half.sin(),
        (1.0 - eccentricity).sqrt() * half.cos(),
    )
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use crate::constants::{KEPLER_MAX_ITER, KEPLER_TOLERANCE, RADEG};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_principal_angle() {
        assert_abs_diff_eq!(principal_angle(-0.5), DPI - 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(principal_angle(DPI + 1.0), 1.0, epsilon = 1e-12);
        assert_eq!(principal_angle(0.0), 0.0);
        assert_abs_diff_eq!(angle_diff(0.1, DPI - 0.1), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_round_trip_grid() {
        for ie in 0..=19 {
            let e = ie as f64 * 0.05;
            for im in 0..48 {
                let m = im as f64 * 7.5 * RADEG;
                let ecc = solve_kepler(m, e, KEPLER_TOLERANCE, KEPLER_MAX_ITER).unwrap();
                let m_back = eccentric_to_mean_anomaly(ecc, e);
                assert!(
                    angle_diff(m_back, m).abs() < KEPLER_TOLERANCE,
                    "round trip failed for e = {e}, M = {m}"
                );
            }
        }
    }

    #[test]
    fn test_circular_identity() {
        for im in 0..36 {
            let m = im as f64 * 10.0 * RADEG;
            let ecc = solve_kepler(m, 0.0, KEPLER_TOLERANCE, KEPLER_MAX_ITER).unwrap();
            assert_eq!(ecc, m);
        }
    }

    #[test]
    fn test_mean_anomaly_is_wrapped() {
        let direct = solve_kepler(1.0, 0.3, KEPLER_TOLERANCE, KEPLER_MAX_ITER).unwrap();
        let wrapped = solve_kepler(1.0 + 3.0 * DPI, 0.3, KEPLER_TOLERANCE, KEPLER_MAX_ITER).unwrap();
        let negative = solve_kepler(1.0 - DPI, 0.3, KEPLER_TOLERANCE, KEPLER_MAX_ITER).unwrap();
        assert_abs_diff_eq!(direct, wrapped, epsilon = 1e-9);
        assert_abs_diff_eq!(direct, negative, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_mean_anomaly() {
        let ecc = solve_kepler(0.0, 0.0167, KEPLER_TOLERANCE, KEPLER_MAX_ITER).unwrap();
        assert_eq!(ecc, 0.0);
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(
            solve_kepler(1.0, 1.0, KEPLER_TOLERANCE, KEPLER_MAX_ITER),
            Err(HeliorbitError::EccentricityOutOfDomain(1.0))
        );
        assert_eq!(
            solve_kepler(1.0, -0.1, KEPLER_TOLERANCE, KEPLER_MAX_ITER),
            Err(HeliorbitError::EccentricityOutOfDomain(-0.1))
        );
        assert_eq!(
            solve_kepler(f64::NAN, 0.1, KEPLER_TOLERANCE, KEPLER_MAX_ITER),
            Err(HeliorbitError::NonFiniteElement {
                name: "mean_anomaly"
            })
        );
        assert_eq!(
            solve_kepler(0.5, f64::NAN, KEPLER_TOLERANCE, KEPLER_MAX_ITER),
            Err(HeliorbitError::NonFiniteElement {
                name: "eccentricity"
            })
        );
    }

    #[test]
    fn test_iteration_cap() {
        let res = solve_kepler(0.3, 0.9, 1e-15, 2);
        match res {
            Err(HeliorbitError::KeplerNonConvergence {
                iterations,
                eccentricity,
                ..
            }) => {
                assert_eq!(iterations, 2);
                assert_eq!(eccentricity, 0.9);
            }
            other => panic!("expected a convergence failure, got {other:?}"),
        }
    }

    #[test]
    fn test_solve_many_is_row_independent() {
        let inputs = vec![(0.5, 0.1), (0.5, f64::NAN), (2.0, 0.7), (1.0, 1.5)];
        let out: Vec<_> = solve_kepler_many(inputs.clone(), KEPLER_TOLERANCE, KEPLER_MAX_ITER).collect();

        assert_eq!(out.len(), 4);
        assert!(out[1].is_err());
        assert!(out[3].is_err());
        for idx in [0, 2] {
            let (m, e) = inputs[idx];
            let single = solve_kepler(m, e, KEPLER_TOLERANCE, KEPLER_MAX_ITER).unwrap();
            assert_eq!(out[idx].as_ref().unwrap().to_bits(), single.to_bits());
        }
    }

    #[test]
    fn test_true_anomaly() {
        assert_eq!(eccentric_to_true_anomaly(0.0, 0.5), 0.0);
        assert_abs_diff_eq!(eccentric_to_true_anomaly(PI, 0.5), PI, epsilon = 1e-12);
        // circular orbit: ν = E
        assert_abs_diff_eq!(eccentric_to_true_anomaly(1.2, 0.0), 1.2, epsilon = 1e-14);

        // cos ν = (cos E − e) / (1 − e cos E)
        let (ecc, e) = (2.0_f64, 0.4_f64);
        let nu = eccentric_to_true_anomaly(ecc, e);
        assert_abs_diff_eq!(
            nu.cos(),
            (ecc.cos() - e) / (1.0 - e * ecc.cos()),
            epsilon = 1e-12
        );
        assert!(nu > ecc);
    }
}
