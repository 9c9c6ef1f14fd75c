//! # Orbital plane → ecliptic frame transform
//!
//! Positions are first expressed in the **perifocal frame** (x towards periapsis, y at
//! ν = 90°, z along the orbital angular momentum) and then rotated into the heliocentric
//! ecliptic frame with the classical 3-1-3 composition
//!
//! ```text
//! R = Rz(Ω) · Rx(i) · Rz(ω)
//! ```
//!
//! which, applied to a point `(x₀, y₀, 0)` of the orbital plane, expands to
//!
//! ```text
//! X = (cosΩ cosω − sinΩ sinω cos i)·x₀ + (−cosΩ sinω − sinΩ cosω cos i)·y₀
//! Y = (sinΩ cosω + cosΩ sinω cos i)·x₀ + (−sinΩ sinω + cosΩ cosω cos i)·y₀
//! Z = (sinω sin i)·x₀ + (cosω sin i)·y₀
//! ```
//!
//! ## Radius conventions
//!
//! * Orbit curves are swept in true anomaly with the conic equation
//!   `r = a(1 − e²) / (1 + e·cos ν)` (see [`conic_radius`]).
//! * Instantaneous positions computed by [`crate::evaluator`] use `r = a(1 − e·cos E)`
//!   together with the true anomaly derived from `E`; both radii agree when ν and E
//!   describe the same point.
//!
//! Every function here is pure; evaluating many objects concurrently needs no coordination.
use std::iter::FusedIterator;

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    constants::{AstronomicalUnit, Radian, DPI},
    heliorbit_errors::HeliorbitError,
    orbit_type::keplerian_element::KeplerianElements,
};

/// Axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Elementary rotation matrix of angle `alpha` (radians) about a coordinate axis.
///
/// The matrix rotates **vectors** in a fixed frame (`x' = R · x`), counter-clockwise
/// when looking down the axis towards the origin.
pub fn rotation_about(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Perifocal → ecliptic rotation of one orbit.
///
/// Built once per object and reused for every sample of its orbit curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticRotation {
    matrix: Matrix3<f64>,
}

impl EclipticRotation {
    /// Compose `Rz(Ω) · Rx(i) · Rz(ω)`.
    ///
    /// Arguments
    /// ---------
    /// * `inclination` – i (radians).
    /// * `ascending_node_longitude` – Ω (radians).
    /// * `periapsis_argument` – ω (radians).
    pub fn new(
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_argument: Radian,
    ) -> Self {
        let matrix = rotation_about(ascending_node_longitude, Axis::Z)
            * rotation_about(inclination, Axis::X)
            * rotation_about(periapsis_argument, Axis::Z);
        Self { matrix }
    }

    pub fn from_elements(elements: &KeplerianElements) -> Self {
        Self::new(
            elements.inclination,
            elements.ascending_node_longitude,
            elements.periapsis_argument,
        )
    }

    /// Rotate an orbital-plane point `(x₀, y₀)` into the ecliptic frame.
    #[inline]
    pub fn apply(&self, x0: AstronomicalUnit, y0: AstronomicalUnit) -> Vector3<f64> {
        self.matrix * Vector3::new(x0, y0, 0.0)
    }

    /// Place a point given in polar form `(r, θ)` in the orbital plane.
    #[inline]
    pub fn apply_polar(&self, radius: AstronomicalUnit, angle: Radian) -> Vector3<f64> {
        let (sin, cos) = angle.sin_cos();
        self.apply(radius * cos, radius * sin)
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }
}

/// Heliocentric distance on a conic of semi-latus rectum `p` and eccentricity `e` at true
/// anomaly `ν`: `r = p / (1 + e·cos ν)`.
#[inline]
pub fn conic_radius(semi_latus_rectum: AstronomicalUnit, eccentricity: f64, true_anomaly: Radian) -> AstronomicalUnit {
    semi_latus_rectum / (1.0 + eccentricity * true_anomaly.cos())
}

/// Ecliptic position of the body at a given true anomaly.
pub fn position_at_true_anomaly(elements: &KeplerianElements, true_anomaly: Radian) -> Vector3<f64> {
    let r = conic_radius(
        elements.semi_latus_rectum(),
        elements.eccentricity,
        true_anomaly,
    );
    EclipticRotation::from_elements(elements).apply_polar(r, true_anomaly)
}

/// Coarse position that uses the mean anomaly directly as the orbital-plane angle.
///
/// This skips Kepler's equation entirely and is only exact for circular orbits; the error
/// grows with the eccentricity (up to ~2e radians in angle). It exists for quick-look
/// plots of very large catalogs; [`crate::evaluator::current_position`] is the reference
/// path.
pub fn approximate_position(elements: &KeplerianElements, mean_anomaly: Radian) -> Vector3<f64> {
    position_at_true_anomaly(elements, mean_anomaly)
}

/// Lazily sampled closed orbit curve.
///
/// The true anomaly is swept over `samples` evenly spaced values from `0` to `2π`
/// **inclusive**, so the last point repeats the first and a polyline through the samples
/// closes on itself. The iterator is finite, cheap to clone, and can be rewound with
/// [`OrbitCurve::restart`].
#[derive(Debug, Clone)]
pub struct OrbitCurve {
    rotation: EclipticRotation,
    semi_latus_rectum: AstronomicalUnit,
    eccentricity: f64,
    samples: usize,
    cursor: usize,
}

impl OrbitCurve {
    /// Prepare the sampling of one orbit.
    ///
    /// Arguments
    /// ---------
    /// * `elements` – orbit to draw; its mean anomaly is not used.
    /// * `samples` – number of points, at least 2.
    ///
    /// Return
    /// ------
    /// * an [`OrbitCurve`] positioned on the first sample, or the validation error of the
    ///   element set / sample count.
    pub fn new(elements: &KeplerianElements, samples: usize) -> Result<Self, HeliorbitError> {
        if samples < 2 {
            return Err(HeliorbitError::InvalidEvaluationParameter(format!(
                "an orbit curve needs at least 2 samples, got {samples}"
            )));
        }
        elements.validate_shape()?;

        Ok(Self {
            rotation: EclipticRotation::from_elements(elements),
            semi_latus_rectum: elements.semi_latus_rectum(),
            eccentricity: elements.eccentricity,
            samples,
            cursor: 0,
        })
    }

    /// Number of samples of the full curve.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// True anomaly of sample `k`.
    #[inline]
    pub fn true_anomaly(&self, k: usize) -> Radian {
        DPI * k as f64 / (self.samples - 1) as f64
    }

    /// Ecliptic position of sample `k`.
    pub fn point(&self, k: usize) -> Vector3<f64> {
        let nu = self.true_anomaly(k);
        let r = conic_radius(self.semi_latus_rectum, self.eccentricity, nu);
        self.rotation.apply_polar(r, nu)
    }

    /// Rewind to the first sample.
    pub fn restart(&mut self) {
        self.cursor = 0;
    }
}

impl Iterator for OrbitCurve {
    type Item = Vector3<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.samples {
            return None;
        }
        let p = self.point(self.cursor);
        self.cursor += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.samples - self.cursor;
        (left, Some(left))
    }
}

impl ExactSizeIterator for OrbitCurve {}

impl FusedIterator for OrbitCurve {}
