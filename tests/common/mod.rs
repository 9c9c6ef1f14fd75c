#![allow(dead_code)]

use approx::assert_relative_eq;
use camino::Utf8Path;
use heliorbit::catalog::{load_catalog, LoadOptions};
use heliorbit::{ElementTable, HeliocentricState, KeplerianElements};

pub const SAMPLE_CATALOG: &str = "tests/data/sbdb_sample.csv";

pub fn sample_catalog(options: &LoadOptions) -> ElementTable {
    load_catalog(Utf8Path::new(SAMPLE_CATALOG), options).unwrap()
}

pub fn assert_elements_close(actual: &KeplerianElements, expected: &KeplerianElements, epsilon: f64) {
    assert_relative_eq!(
        actual.semi_major_axis,
        expected.semi_major_axis,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.eccentricity,
        expected.eccentricity,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.inclination, expected.inclination, epsilon = epsilon);
    assert_relative_eq!(
        actual.ascending_node_longitude,
        expected.ascending_node_longitude,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.periapsis_argument,
        expected.periapsis_argument,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.mean_anomaly.angle(),
        expected.mean_anomaly.angle(),
        epsilon = epsilon
    );
}

/// `a(1−e) ≤ r ≤ a(1+e)` and `|position| = r`.
pub fn assert_state_on_orbit(state: &HeliocentricState, elements: &KeplerianElements) {
    let tol = 1e-12 * elements.semi_major_axis.max(1.0);
    assert!(
        state.distance >= elements.perihelion() - tol,
        "r = {} below perihelion {}",
        state.distance,
        elements.perihelion()
    );
    assert!(
        state.distance <= elements.aphelion() + tol,
        "r = {} beyond aphelion {}",
        state.distance,
        elements.aphelion()
    );
    assert_relative_eq!(state.position.norm(), state.distance, max_relative = 1e-12);
}
