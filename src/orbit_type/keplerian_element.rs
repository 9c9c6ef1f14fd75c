//! # Keplerian orbital elements
//!
//! This module defines the [`crate::orbit_type::keplerian_element::KeplerianElements`] struct,
//! the **classical orbital element representation** of a body on a bound heliocentric orbit.
//!
//! ## What are Keplerian elements?
//!
//! 1. **a** – Semi-major axis (AU)
//! 2. **e** – Eccentricity (unitless, `0 ≤ e < 1` here)
//! 3. **i** – Inclination (radians)
//! 4. **Ω** – Longitude of ascending node (radians)
//! 5. **ω** – Argument of periapsis (radians)
//! 6. **M** – Mean anomaly, see [`MeanAnomaly`]
//!
//! Catalogs publish the angles in degrees; [`KeplerianElements::from_degrees`] converts them
//! once so that every downstream routine works in radians.
//!
//! ## Validation
//!
//! Elements are plain data and may carry NaN (a catalog cell that failed numeric coercion).
//! [`KeplerianElements::validate`] reports the first problem found:
//!
//! - any non-finite field → [`HeliorbitError::NonFiniteElement`],
//! - `a ≤ 0` → [`HeliorbitError::InvalidSemiMajorAxis`],
//! - `e ∉ [0, 1)` → [`HeliorbitError::EccentricityOutOfDomain`].
//!
//! ## See also
//!
//! - [`crate::evaluator`] – Places a body on its orbit at a given epoch.
//! - [`crate::orbit_geometry`] – Orbital-plane to ecliptic transform.
use std::fmt;

use crate::{
    constants::{AstronomicalUnit, Degree, JulianYear, Radian, RADEG},
    heliorbit_errors::HeliorbitError,
    orbit_type::MeanAnomaly,
};

/// Keplerian orbital elements (osculating, two-body, elliptic).
///
/// Units
/// -----
/// * `semi_major_axis`: Astronomical Units (AU).
/// * `eccentricity`: unitless.
/// * `inclination`: radians.
/// * `ascending_node_longitude`: radians (Ω).
/// * `periapsis_argument`: radians (ω).
/// * `mean_anomaly`: radians, with its reference (see [`MeanAnomaly`]).
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct KeplerianElements {
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub mean_anomaly: MeanAnomaly,
}

impl KeplerianElements {
    /// Build elements from catalog units (AU and degrees).
    ///
    /// Arguments
    /// ---------
    /// * `a` – Semi-major axis (AU).
    /// * `e` – Eccentricity.
    /// * `i` – Inclination (degrees).
    /// * `om` – Longitude of the ascending node Ω (degrees).
    /// * `w` – Argument of periapsis ω (degrees).
    /// * `mean_anomaly` – Mean anomaly already converted to radians, see
    ///   [`MeanAnomaly::observed_degrees`] and [`MeanAnomaly::at_j2000_degrees`].
    pub fn from_degrees(
        a: AstronomicalUnit,
        e: f64,
        i: Degree,
        om: Degree,
        w: Degree,
        mean_anomaly: MeanAnomaly,
    ) -> Self {
        Self {
            semi_major_axis: a,
            eccentricity: e,
            inclination: i * RADEG,
            ascending_node_longitude: om * RADEG,
            periapsis_argument: w * RADEG,
            mean_anomaly,
        }
    }

    /// Check that the element set describes a bound orbit the solver can handle.
    pub fn validate(&self) -> Result<(), HeliorbitError> {
        self.validate_shape()?;
        if !self.mean_anomaly.angle().is_finite() {
            return Err(HeliorbitError::NonFiniteElement {
                name: "mean_anomaly",
            });
        }
        Ok(())
    }

    /// Same checks as [`Self::validate`] restricted to the five elements fixing the
    /// ellipse in space; the mean anomaly is ignored.
    pub fn validate_shape(&self) -> Result<(), HeliorbitError> {
        let fields = [
            ("semi_major_axis", self.semi_major_axis),
            ("eccentricity", self.eccentricity),
            ("inclination", self.inclination),
            ("ascending_node_longitude", self.ascending_node_longitude),
            ("periapsis_argument", self.periapsis_argument),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(HeliorbitError::NonFiniteElement { name });
        }

        if self.semi_major_axis <= 0.0 {
            return Err(HeliorbitError::InvalidSemiMajorAxis(self.semi_major_axis));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(HeliorbitError::EccentricityOutOfDomain(self.eccentricity));
        }
        Ok(())
    }

    /// Orbital period from Kepler's third law in solar units, `P = a^1.5` years.
    pub fn orbital_period_years(&self) -> JulianYear {
        self.semi_major_axis.powf(1.5)
    }

    /// Semi-latus rectum `p = a(1 − e²)`.
    pub fn semi_latus_rectum(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
    }

    /// Perihelion distance `q = a(1 − e)`.
    pub fn perihelion(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Aphelion distance `Q = a(1 + e)`.
    pub fn aphelion(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rad_to_deg = 1.0 / RADEG;
        match self.mean_anomaly {
            MeanAnomaly::Observed(_) => writeln!(f, "Keplerian Elements (observed M)")?,
            MeanAnomaly::AtReference {
                reference_epoch, ..
            } => writeln!(f, "Keplerian Elements @ epoch {reference_epoch}")?,
        }
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} AU",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6}°",
            self.inclination * rad_to_deg
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6}°",
            self.ascending_node_longitude * rad_to_deg
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6}°",
            self.periapsis_argument * rad_to_deg
        )?;
        writeln!(
            f,
            "  M   (mean anomaly)          = {:.6}°",
            self.mean_anomaly.angle() * rad_to_deg
        )
    }
}

#[cfg(test)]
pub(crate) mod test_keplerian_element {
    use super::*;
    use approx::assert_relative_eq;

    pub(crate) fn ceres_like() -> KeplerianElements {
        KeplerianElements::from_degrees(
            2.7675,
            0.0785,
            10.59,
            80.30,
            73.60,
            MeanAnomaly::observed_degrees(95.99),
        )
    }

    #[test]
    fn test_from_degrees() {
        let kep = ceres_like();
        assert_relative_eq!(kep.inclination, 10.59_f64.to_radians(), epsilon = 1e-15);
        assert_relative_eq!(
            kep.ascending_node_longitude,
            80.30_f64.to_radians(),
            epsilon = 1e-15
        );
        assert_relative_eq!(kep.periapsis_argument, 73.60_f64.to_radians(), epsilon = 1e-15);
        assert_relative_eq!(kep.mean_anomaly.angle(), 95.99_f64.to_radians(), epsilon = 1e-12);
        assert!(kep.validate().is_ok());
    }

    #[test]
    fn test_derived_quantities() {
        let mut kep = ceres_like();
        kep.semi_major_axis = 4.0;
        kep.eccentricity = 0.25;
        assert_relative_eq!(kep.orbital_period_years(), 8.0, epsilon = 1e-12);
        assert_relative_eq!(kep.perihelion(), 3.0);
        assert_relative_eq!(kep.aphelion(), 5.0);
        assert_relative_eq!(kep.semi_latus_rectum(), 3.75);
    }

    #[test]
    fn test_validate() {
        let mut kep = ceres_like();
        kep.eccentricity = f64::NAN;
        assert_eq!(
            kep.validate(),
            Err(HeliorbitError::NonFiniteElement {
                name: "eccentricity"
            })
        );

        let mut kep = ceres_like();
        kep.mean_anomaly = MeanAnomaly::Observed(f64::INFINITY);
        assert_eq!(
            kep.validate(),
            Err(HeliorbitError::NonFiniteElement {
                name: "mean_anomaly"
            })
        );

        let mut kep = ceres_like();
        kep.semi_major_axis = 0.0;
        assert_eq!(kep.validate(), Err(HeliorbitError::InvalidSemiMajorAxis(0.0)));

        let mut kep = ceres_like();
        kep.eccentricity = 1.0;
        assert_eq!(
            kep.validate(),
            Err(HeliorbitError::EccentricityOutOfDomain(1.0))
        );
    }

    #[test]
    fn test_display() {
        let txt = format!("{}", ceres_like());
        assert!(txt.starts_with("Keplerian Elements (observed M)"));
        assert!(txt.contains("a   (semi-major axis)       = 2.767500 AU"));
    }
}
