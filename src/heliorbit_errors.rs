use thiserror::Error;

/// Coarse classification of a [`HeliorbitError`].
///
/// Batch evaluation keeps going on every kind except [`FailureKind::Configuration`];
/// the kind is what per-batch diagnostics are tallied by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    /// Structural problem with the input or the configuration (fatal).
    Configuration,
    /// A required element is NaN or otherwise not finite.
    MissingInput,
    /// The element is finite but outside the elliptic two-body domain.
    OutOfDomain,
    /// The Kepler solver hit its iteration cap.
    NonConvergence,
}

#[derive(Error, Debug)]
pub enum HeliorbitError {
    #[error("Required column missing from input table: {0}")]
    MissingColumn(String),

    #[error("Unable to detect the field delimiter of {0} (tried ',', ';' and tab)")]
    UndetectableDelimiter(String),

    #[error("Column length mismatch: table has {expected} rows, column has {got}")]
    ColumnLengthMismatch { expected: usize, got: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Scene serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Orbital element '{name}' is not a finite number")]
    NonFiniteElement { name: &'static str },

    #[error("Semi-major axis must be strictly positive, got {0} AU")]
    InvalidSemiMajorAxis(f64),

    #[error("Eccentricity {0} is outside the elliptic domain [0, 1)")]
    EccentricityOutOfDomain(f64),

    #[error(
        "Kepler solver did not converge after {iterations} iterations \
         (M = {mean_anomaly} rad, e = {eccentricity}, last |ΔE| = {last_step:e})"
    )]
    KeplerNonConvergence {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: usize,
        last_step: f64,
    },

    #[error("Invalid evaluation parameter: {0}")]
    InvalidEvaluationParameter(String),

    #[error("Invalid distance boundaries: {0}")]
    InvalidBoundaries(String),

    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),
}

impl HeliorbitError {
    /// Classify the error for diagnostics.
    pub fn failure_kind(&self) -> FailureKind {
        use HeliorbitError::*;
        match self {
            NonFiniteElement { .. } => FailureKind::MissingInput,
            InvalidSemiMajorAxis(_) | EccentricityOutOfDomain(_) => FailureKind::OutOfDomain,
            KeplerNonConvergence { .. } => FailureKind::NonConvergence,
            MissingColumn(_)
            | UndetectableDelimiter(_)
            | ColumnLengthMismatch { .. }
            | Csv(_)
            | IoError(_)
            | Json(_)
            | InvalidEvaluationParameter(_)
            | InvalidBoundaries(_)
            | InvalidEpoch(_) => FailureKind::Configuration,
        }
    }

    /// `true` when the error only concerns a single object row.
    pub fn is_row_local(&self) -> bool {
        self.failure_kind() != FailureKind::Configuration
    }
}

impl PartialEq for HeliorbitError {
    fn eq(&self, other: &Self) -> bool {
        use HeliorbitError::*;
        match (self, other) {
            (MissingColumn(a), MissingColumn(b)) => a == b,
            (UndetectableDelimiter(a), UndetectableDelimiter(b)) => a == b,
            (
                ColumnLengthMismatch {
                    expected: e1,
                    got: g1,
                },
                ColumnLengthMismatch {
                    expected: e2,
                    got: g2,
                },
            ) => e1 == e2 && g1 == g2,

            // wrapped errors are not comparable: same variant is enough
            (Csv(_), Csv(_)) => true,
            (IoError(_), IoError(_)) => true,
            (Json(_), Json(_)) => true,

            (NonFiniteElement { name: a }, NonFiniteElement { name: b }) => a == b,
            (InvalidSemiMajorAxis(a), InvalidSemiMajorAxis(b)) => a.to_bits() == b.to_bits(),
            (EccentricityOutOfDomain(a), EccentricityOutOfDomain(b)) => a.to_bits() == b.to_bits(),
            (
                KeplerNonConvergence {
                    mean_anomaly: m1,
                    eccentricity: e1,
                    iterations: i1,
                    ..
                },
                KeplerNonConvergence {
                    mean_anomaly: m2,
                    eccentricity: e2,
                    iterations: i2,
                    ..
                },
            ) => m1.to_bits() == m2.to_bits() && e1.to_bits() == e2.to_bits() && i1 == i2,
            (InvalidEvaluationParameter(a), InvalidEvaluationParameter(b)) => a == b,
            (InvalidBoundaries(a), InvalidBoundaries(b)) => a == b,
            (InvalidEpoch(a), InvalidEpoch(b)) => a == b,

            _ => false,
        }
    }
}
