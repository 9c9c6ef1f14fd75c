//! # Batch distance evaluation and classification
//!
//! Applies the current-position evaluator to every row of a catalog and derives, from the
//! resulting distance column, two independent read-only views:
//!
//! * **filtering**: the rows whose distance exceeds a threshold
//!   ([`BatchEvaluation::filter_beyond`]);
//! * **distribution**: the count of rows per bucket of a [`DistanceBoundaries`] set
//!   ([`BatchEvaluation::distribution`]).
//!
//! ## Failure model
//!
//! Rows are independent. A row whose elements are missing, out of domain, or on which the
//! Kepler solver does not converge keeps its error in [`BatchEvaluation::results`]; its
//! distance reads as NaN and it lands in the *undetermined* bucket. The batch itself never
//! fails. Failures are tallied by [`FailureKind`] in [`BatchDiagnostics`] and logged once
//! per batch.
//!
//! ## Execution
//!
//! * default: sequential, in row order;
//! * feature `progress`: sequential with an `indicatif` progress bar;
//! * feature `parallel`: `rayon` parallel iterator (takes precedence over `progress`).
//!
//! The output is identical in all three modes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use heliorbit::catalog::{load_catalog, LoadOptions};
//! use heliorbit::params::EvaluationParams;
//! use heliorbit::pipeline::{evaluate_table, DistanceBoundaries};
//! use heliorbit::time::now;
//! use camino::Utf8Path;
//!
//! let table = load_catalog(Utf8Path::new("comets.csv"), &LoadOptions::default())?;
//! let batch = evaluate_table(&table, now()?, &EvaluationParams::default());
//!
//! println!("{:#}", batch.distribution(&DistanceBoundaries::planetary()));
//! let beyond_jupiter = batch.filter_beyond(5.2);
//! # Ok::<(), heliorbit::heliorbit_errors::HeliorbitError>(())
//! ```
use std::{collections::BTreeMap, fmt};

use hifitime::Epoch;
use log::{info, warn};

use crate::{
    catalog::ElementTable,
    evaluator::{current_position, HeliocentricState},
    heliorbit_errors::{FailureKind, HeliorbitError},
    orbit_type::keplerian_element::KeplerianElements,
    params::EvaluationParams,
};

pub mod boundaries;
pub mod distribution;

pub use boundaries::{DistanceBoundaries, DistanceBucket};
pub use distribution::DistanceDistribution;

/// Per-row outcome of a batch evaluation.
pub type RowResult = Result<HeliocentricState, HeliorbitError>;

/// Result of evaluating a batch of element sets at one epoch.
///
/// `results()[k]` corresponds to the `k`-th input row.
#[derive(Debug)]
pub struct BatchEvaluation {
    epoch: Epoch,
    results: Vec<RowResult>,
}

/// Count of rows per failure kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDiagnostics {
    pub rows: usize,
    pub failures: BTreeMap<FailureKind, usize>,
}

impl BatchDiagnostics {
    pub fn count(&self, kind: FailureKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_failures(&self) -> usize {
        self.failures.values().sum()
    }

    pub fn succeeded(&self) -> usize {
        self.rows - self.total_failures()
    }
}

impl fmt::Display for BatchDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} evaluated, {} missing input, {} out of domain, {} not converged",
            self.rows,
            self.succeeded(),
            self.count(FailureKind::MissingInput),
            self.count(FailureKind::OutOfDomain),
            self.count(FailureKind::NonConvergence)
        )
    }
}

#[cfg(feature = "parallel")]
fn evaluate_rows<T, F>(
    rows: &[T],
    elements_of: F,
    epoch: Epoch,
    params: &EvaluationParams,
) -> Vec<RowResult>
where
    T: Sync,
    F: Fn(&T) -> &KeplerianElements + Sync,
{
    use rayon::prelude::*;

    rows.par_iter()
        .map(|row| current_position(elements_of(row), epoch, params))
        .collect()
}

#[cfg(all(feature = "progress", not(feature = "parallel")))]
fn evaluate_rows<T, F>(
    rows: &[T],
    elements_of: F,
    epoch: Epoch,
    params: &EvaluationParams,
) -> Vec<RowResult>
where
    F: Fn(&T) -> &KeplerianElements,
{
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;

    let pb = ProgressBar::new((rows.len() as u64).max(1));
    if let Ok(style) = ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | {per_sec} | ETA {eta_precise}",
    ) {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(200));

    let results = rows
        .iter()
        .map(|row| {
            let res = current_position(elements_of(row), epoch, params);
            pb.inc(1);
            res
        })
        .collect();

    pb.finish_and_clear();
    results
}

#[cfg(not(any(feature = "progress", feature = "parallel")))]
fn evaluate_rows<T, F>(
    rows: &[T],
    elements_of: F,
    epoch: Epoch,
    params: &EvaluationParams,
) -> Vec<RowResult>
where
    F: Fn(&T) -> &KeplerianElements,
{
    rows.iter()
        .map(|row| current_position(elements_of(row), epoch, params))
        .collect()
}

/// Evaluate a slice of element sets at `epoch`.
pub fn evaluate_batch(
    elements: &[KeplerianElements],
    epoch: Epoch,
    params: &EvaluationParams,
) -> BatchEvaluation {
    BatchEvaluation::finish(epoch, evaluate_rows(elements, |kep| kep, epoch, params))
}

/// Evaluate every row of a loaded catalog at `epoch`, in table order.
pub fn evaluate_table(
    table: &ElementTable,
    epoch: Epoch,
    params: &EvaluationParams,
) -> BatchEvaluation {
    BatchEvaluation::finish(
        epoch,
        evaluate_rows(table.entries(), |entry| &entry.elements, epoch, params),
    )
}

impl BatchEvaluation {
    fn finish(epoch: Epoch, results: Vec<RowResult>) -> Self {
        let batch = Self { epoch, results };
        let diagnostics = batch.diagnostics();
        if diagnostics.total_failures() > 0 {
            warn!("batch at {epoch}: {diagnostics}");
        }
        info!(
            "batch at {epoch}: {} of {} rows evaluated",
            diagnostics.succeeded(),
            diagnostics.rows
        );
        batch
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[RowResult] {
        &self.results
    }

    /// State of row `k`, or [`HeliocentricState::undefined`] if it failed or is out of range.
    pub fn state_or_nan(&self, k: usize) -> HeliocentricState {
        match self.results.get(k) {
            Some(Ok(state)) => *state,
            _ => HeliocentricState::undefined(),
        }
    }

    /// The `r` column: one heliocentric distance per row, NaN for failed rows.
    pub fn distances(&self) -> Vec<f64> {
        self.results
            .iter()
            .map(|res| res.as_ref().map_or(f64::NAN, |s| s.distance))
            .collect()
    }

    /// `(X, Y, Z, r)` per row, NaN for failed rows.
    pub fn positions(&self) -> Vec<(f64, f64, f64, f64)> {
        (0..self.results.len())
            .map(|k| self.state_or_nan(k).xyzr())
            .collect()
    }

    /// Indices of the rows whose distance is strictly greater than `threshold`.
    ///
    /// Failed rows never pass the filter.
    pub fn filter_beyond(&self, threshold: f64) -> Vec<usize> {
        self.results
            .iter()
            .enumerate()
            .filter_map(|(k, res)| match res {
                Ok(state) if state.distance > threshold => Some(k),
                _ => None,
            })
            .collect()
    }

    /// Bucket of every row.
    pub fn classify(&self, boundaries: &DistanceBoundaries) -> Vec<DistanceBucket> {
        self.distances()
            .into_iter()
            .map(|r| boundaries.classify(r))
            .collect()
    }

    /// Count of rows per bucket.
    pub fn distribution(&self, boundaries: &DistanceBoundaries) -> DistanceDistribution {
        DistanceDistribution::from_distances(boundaries, self.distances())
    }

    /// Failure tally of the batch.
    pub fn diagnostics(&self) -> BatchDiagnostics {
        let mut diagnostics = BatchDiagnostics {
            rows: self.results.len(),
            ..Default::default()
        };
        for err in self.results.iter().filter_map(|res| res.as_ref().err()) {
            *diagnostics.failures.entry(err.failure_kind()).or_insert(0) += 1;
        }
        diagnostics
    }
}
