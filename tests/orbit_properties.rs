mod common;

use approx::assert_abs_diff_eq;
use common::assert_state_on_orbit;
use heliorbit::constants::{DPI, KEPLER_MAX_ITER, RADEG};
use heliorbit::kepler::{angle_diff, eccentric_to_mean_anomaly, solve_kepler, solve_kepler_many};
use heliorbit::orbit_geometry::OrbitCurve;
use heliorbit::time::j2000;
use heliorbit::{current_position, EvaluationParams, KeplerianElements, MeanAnomaly};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_elements(rng: &mut StdRng) -> KeplerianElements {
    KeplerianElements::from_degrees(
        rng.random_range(0.2..100.0),
        rng.random_range(0.0..0.95),
        rng.random_range(0.0..180.0),
        rng.random_range(-180.0..360.0),
        rng.random_range(0.0..360.0),
        MeanAnomaly::observed_degrees(rng.random_range(-720.0..720.0)),
    )
}

#[test]
fn test_kepler_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..5_000 {
        let m = rng.random_range(0.0..DPI);
        let e = rng.random_range(0.0..=0.95);
        let ecc = solve_kepler(m, e, 1e-12, KEPLER_MAX_ITER).unwrap();
        let back = eccentric_to_mean_anomaly(ecc, e);
        assert!(
            angle_diff(back, m).abs() < 1e-9,
            "M = {m}, e = {e}: recovered {back}"
        );
    }
}

#[test]
fn test_vectorized_matches_scalar() {
    let mut rng = StdRng::seed_from_u64(7);
    let inputs: Vec<(f64, f64)> = (0..500)
        .map(|_| (rng.random_range(0.0..DPI), rng.random_range(0.0..0.99)))
        .collect();
    let many: Vec<_> = solve_kepler_many(inputs.iter().copied(), 1e-8, KEPLER_MAX_ITER).collect();
    for (&(m, e), res) in inputs.iter().zip(many) {
        let scalar = solve_kepler(m, e, 1e-8, KEPLER_MAX_ITER).unwrap();
        assert_eq!(res.unwrap().to_bits(), scalar.to_bits());
    }
}

#[test]
fn test_distance_bounds_random() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let params = EvaluationParams::default();
    for _ in 0..2_000 {
        let kep = random_elements(&mut rng);
        let state = current_position(&kep, j2000(), &params).unwrap();
        assert_state_on_orbit(&state, &kep);
    }
}

#[test]
fn test_circular_identity() {
    let params = EvaluationParams::default();
    for deg in (0..360).step_by(5) {
        let kep = KeplerianElements::from_degrees(
            3.3,
            0.0,
            20.0,
            45.0,
            90.0,
            MeanAnomaly::observed_degrees(deg as f64),
        );
        let state = current_position(&kep, j2000(), &params).unwrap();
        assert_abs_diff_eq!(state.eccentric_anomaly, deg as f64 * RADEG, epsilon = 1e-12);
        assert_abs_diff_eq!(state.distance, 3.3, epsilon = 1e-12);
    }
}

#[test]
fn test_curve_closure_random() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let kep = random_elements(&mut rng);
        let samples = rng.random_range(250..=400);
        let curve = OrbitCurve::new(&kep, samples).unwrap();
        let points: Vec<_> = curve.collect();
        assert_eq!(points.len(), samples);

        let first = points[0];
        let last = points[samples - 1];
        assert_abs_diff_eq!(first, last, epsilon = 1e-9 * kep.semi_major_axis);

        for p in &points {
            let r = p.norm();
            assert!(r >= kep.perihelion() * (1.0 - 1e-12));
            assert!(r <= kep.aphelion() * (1.0 + 1e-12));
        }
    }
}

#[test]
fn test_current_position_lies_on_curve_plane() {
    let mut rng = StdRng::seed_from_u64(2024);
    let params = EvaluationParams::default();
    for _ in 0..100 {
        let kep = random_elements(&mut rng);
        let state = current_position(&kep, j2000(), &params).unwrap();
        let curve = OrbitCurve::new(&kep, 5).unwrap();
        let (p0, p1) = (curve.point(0), curve.point(1));
        // orbital plane normal from two non-collinear curve points
        let normal = p0.cross(&p1).normalize();
        assert_abs_diff_eq!(normal.dot(&state.position), 0.0, epsilon = 1e-9 * kep.aphelion());
    }
}
