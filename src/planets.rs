//! Approximate J2000 orbital elements of the eight major planets.
//!
//! The mean anomalies refer to J2000.0 and are advanced with the mean motion `360° / P`,
//! `P = a^1.5` years, when a planet is evaluated at another epoch. Without secular rates
//! for the other elements, positions drift by a few degrees per century: good enough to
//! place the planets in a scene, not for ephemeris work.
use hifitime::Epoch;

use crate::{
    constants::{Degree, PLANET_ORBIT_SAMPLES},
    evaluator::{current_position, HeliocentricState},
    heliorbit_errors::HeliorbitError,
    orbit_geometry::OrbitCurve,
    orbit_type::{keplerian_element::KeplerianElements, MeanAnomaly},
    params::EvaluationParams,
};

/// `(name, a [AU], e, i, Ω, ω, M0)`, angles in degrees.
const PLANET_ELEMENTS: [(&str, f64, f64, Degree, Degree, Degree, Degree); 8] = [
    ("Mercury", 0.3871, 0.2056, 7.005, 48.331, 29.124, 174.795),
    ("Venus", 0.7233, 0.0067, 3.394, 76.680, 54.884, 50.115),
    ("Earth", 1.0000, 0.0167, 0.000, -11.260, 114.207, 357.529),
    ("Mars", 1.5237, 0.0934, 1.850, 49.558, 286.502, 19.412),
    ("Jupiter", 5.2028, 0.0484, 1.303, 100.464, 273.867, 20.020),
    ("Saturn", 9.5388, 0.0542, 2.485, 113.665, 339.392, 317.020),
    ("Uranus", 19.191, 0.0472, 0.770, 74.006, 96.998, 142.238),
    ("Neptune", 30.068, 0.0086, 1.770, 131.784, 272.846, 256.228),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planet {
    pub name: &'static str,
    pub elements: KeplerianElements,
}

impl Planet {
    /// Position at `epoch`.
    pub fn position_at(
        &self,
        epoch: Epoch,
        params: &EvaluationParams,
    ) -> Result<HeliocentricState, HeliorbitError> {
        current_position(&self.elements, epoch, params)
    }

    /// Orbit curve with the planet sampling density.
    pub fn orbit(&self) -> Result<OrbitCurve, HeliorbitError> {
        OrbitCurve::new(&self.elements, PLANET_ORBIT_SAMPLES)
    }
}

/// The eight planets, from Mercury outwards.
pub fn planets() -> Vec<Planet> {
    PLANET_ELEMENTS
        .iter()
        .map(|&(name, a, e, i, om, w, m0)| Planet {
            name,
            elements: KeplerianElements::from_degrees(
                a,
                e,
                i,
                om,
                w,
                MeanAnomaly::at_j2000_degrees(m0),
            ),
        })
        .collect()
}

/// Look a planet up by name, case-insensitively.
pub fn planet(name: &str) -> Option<Planet> {
    planets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod planets_test {
    use super::*;
    use crate::time::j2000;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_table() {
        let all = planets();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0].name, "Mercury");
        assert_eq!(all[7].name, "Neptune");
        assert!(all
            .windows(2)
            .all(|w| w[0].elements.semi_major_axis < w[1].elements.semi_major_axis));
        assert!(all.iter().all(|p| p.elements.validate().is_ok()));
        assert_eq!(planet("jupiter").map(|p| p.elements.semi_major_axis), Some(5.2028));
        assert_eq!(planet("Pluto"), None);
    }

    #[test]
    fn test_positions_within_orbit_bounds() {
        let params = EvaluationParams::default();
        for p in planets() {
            let state = p.position_at(j2000(), &params).unwrap();
            assert!(state.distance >= p.elements.perihelion() - 1e-12);
            assert!(state.distance <= p.elements.aphelion() + 1e-12);
            assert_abs_diff_eq!(state.position.norm(), state.distance, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_earth_near_one_au() {
        let earth = planet("Earth").unwrap();
        let state = earth.position_at(j2000(), &EvaluationParams::default()).unwrap();
        assert_abs_diff_eq!(state.distance, 0.9833, epsilon = 1e-3);
        assert_abs_diff_eq!(state.position.z, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_orbit_sampling() {
        let orbit = planet("Mars").unwrap().orbit().unwrap();
        assert_eq!(orbit.len(), 400);
        let points: Vec<_> = orbit.collect();
        assert_abs_diff_eq!(points[0], points[399], epsilon = 1e-12);
    }
}
