mod common;

use approx::assert_abs_diff_eq;
use common::{assert_state_on_orbit, sample_catalog};
use heliorbit::catalog::{csv_writer::write_with_distances, CoercionPolicy, LoadOptions};
use heliorbit::pipeline::{evaluate_batch, evaluate_table, DistanceDistribution};
use heliorbit::time::{j2000, parse_epoch};
use heliorbit::{
    DistanceBoundaries, DistanceBucket, EvaluationParams, FailureKind, KeplerianElements,
    MeanAnomaly,
};

#[test]
fn test_one_nan_eccentricity_gives_one_nan_distance() {
    let table = sample_catalog(&LoadOptions::default().with_coercion(CoercionPolicy::KeepAsNan));
    let batch = evaluate_table(&table, j2000(), &EvaluationParams::default());
    let r = batch.distances();

    assert_eq!(r.len(), table.len());
    assert_eq!(r.iter().filter(|x| x.is_nan()).count(), 1);
    assert!(r[8].is_nan());

    for (entry, result) in table.entries().iter().zip(batch.results()).take(8) {
        assert_state_on_orbit(result.as_ref().unwrap(), &entry.elements);
    }

    let diag = batch.diagnostics();
    assert_eq!(diag.count(FailureKind::MissingInput), 1);
    assert_eq!(diag.succeeded(), 8);
}

#[test]
fn test_catalog_values_do_not_depend_on_epoch() {
    // catalog mean anomalies are taken as valid "now"
    let table = sample_catalog(&LoadOptions::default());
    let params = EvaluationParams::default();
    let a = evaluate_table(&table, j2000(), &params);
    let b = evaluate_table(&table, parse_epoch("2025-06-01T00:00:00 UTC").unwrap(), &params);
    for (ra, rb) in a.distances().iter().zip(b.distances()) {
        assert_eq!(ra.to_bits(), rb.to_bits());
    }
}

#[test]
fn test_distribution_and_filter_on_sample() {
    let table = sample_catalog(&LoadOptions::default());
    let batch = evaluate_table(&table, j2000(), &EvaluationParams::default());
    let boundaries = DistanceBoundaries::planetary();

    let dist = batch.distribution(&boundaries);
    assert_eq!(dist.total(), table.len());
    assert_eq!(dist.undetermined(), 0);

    // recomputing the distribution from the filtered rows only sees the outer buckets
    let beyond = batch.filter_beyond(5.2);
    let r = batch.distances();
    let outer = DistanceDistribution::from_distances(&boundaries, beyond.iter().map(|&k| r[k]));
    assert_eq!(outer.count(DistanceBucket::Below(0)), 0);
    assert_eq!(outer.classified(), beyond.len());

    // main-belt asteroids and Eros stay inside Jupiter's orbit
    for k in [0, 1, 2] {
        assert_eq!(boundaries.classify(r[k]), DistanceBucket::Below(0));
    }
    // Albion is a Kuiper-belt object
    assert_eq!(boundaries.classify(r[5]), DistanceBucket::Beyond);
}

#[test]
fn test_classification_scenario() {
    let circular = KeplerianElements::from_degrees(
        7.0,
        0.0,
        3.0,
        40.0,
        10.0,
        MeanAnomaly::observed_degrees(123.0),
    );
    let batch = evaluate_batch(&[circular], j2000(), &EvaluationParams::default());
    assert_abs_diff_eq!(batch.distances()[0], 7.0, epsilon = 1e-12);

    let boundaries = DistanceBoundaries::planetary();
    let bucket = batch.classify(&boundaries)[0];
    assert_eq!(boundaries.label(bucket), "Jupiter–Saturn");
}

#[test]
fn test_export_beyond_jupiter() {
    let table = sample_catalog(&LoadOptions::default());
    let batch = evaluate_table(&table, j2000(), &EvaluationParams::default());
    let r = batch.distances();

    let mut out = Vec::<u8>::new();
    let written = write_with_distances(&table, &r, &mut out, |x| x > 5.2).unwrap();
    assert_eq!(written, batch.filter_beyond(5.2).len());

    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("full_name,pdes,a,e,i,om,w,ma,cluster,r")
    );
    assert_eq!(lines.count(), written);
    assert!(!text.contains("Ceres"));
    assert!(text.contains("Sedna"));
}
