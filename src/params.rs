//! # Evaluation parameters
//!
//! [`EvaluationParams`] gathers the numerical knobs of the evaluator: the Kepler solver
//! tolerance and iteration cap, and the number of samples used for orbit curves.
//!
//! ## Example
//!
//! ```rust,no_run
//! use heliorbit::params::EvaluationParams;
//!
//! let params = EvaluationParams::builder()
//!     .kepler_tolerance(1e-10)
//!     .kepler_max_iter(50)
//!     .orbit_samples(400)
//!     .build()
//!     .unwrap();
//! ```
use std::fmt;

use crate::{
    constants::{KEPLER_MAX_ITER, KEPLER_TOLERANCE, ORBIT_SAMPLES},
    heliorbit_errors::HeliorbitError,
};

/// Numerical configuration of the evaluator.
///
/// Fields
/// -----------------
/// * `kepler_tolerance` – Stop the Newton iteration once `|ΔE|` falls below this (radians).
/// * `kepler_max_iter` – Iteration cap; exceeding it is a per-row convergence failure.
/// * `orbit_samples` – Points per orbit curve (first and last coincide).
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationParams {
    pub kepler_tolerance: f64,
    pub kepler_max_iter: usize,
    pub orbit_samples: usize,
}

impl EvaluationParams {
    pub fn builder() -> EvaluationParamsBuilder {
        EvaluationParamsBuilder::new()
    }
}

impl Default for EvaluationParams {
    fn default() -> Self {
        EvaluationParams {
            kepler_tolerance: KEPLER_TOLERANCE,
            kepler_max_iter: KEPLER_MAX_ITER,
            orbit_samples: ORBIT_SAMPLES,
        }
    }
}

impl fmt::Display for EvaluationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kepler_tolerance={:e}, kepler_max_iter={}, orbit_samples={}",
            self.kepler_tolerance, self.kepler_max_iter, self.orbit_samples
        )
    }
}

/// Builder for [`EvaluationParams`], with validation.
#[derive(Debug, Clone)]
pub struct EvaluationParamsBuilder {
    params: EvaluationParams,
}

impl Default for EvaluationParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: EvaluationParams::default(),
        }
    }

    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.kepler_tolerance = v;
        self
    }
    pub fn kepler_max_iter(mut self, v: usize) -> Self {
        self.params.kepler_max_iter = v;
        self
    }
    pub fn orbit_samples(mut self, v: usize) -> Self {
        self.params.orbit_samples = v;
        self
    }

    /// Validate and return the parameters.
    ///
    /// Return
    /// ----------
    /// * `Err(HeliorbitError::InvalidEvaluationParameter)` when the tolerance is not a
    ///   positive finite number, the iteration cap is zero, or fewer than 2 curve samples
    ///   are requested.
    pub fn build(self) -> Result<EvaluationParams, HeliorbitError> {
        let p = &self.params;

        if !(p.kepler_tolerance.is_finite() && p.kepler_tolerance > 0.0) {
            return Err(HeliorbitError::InvalidEvaluationParameter(
                "kepler_tolerance must be finite and > 0".into(),
            ));
        }
        if p.kepler_max_iter == 0 {
            return Err(HeliorbitError::InvalidEvaluationParameter(
                "kepler_max_iter must be >= 1".into(),
            ));
        }
        if p.orbit_samples < 2 {
            return Err(HeliorbitError::InvalidEvaluationParameter(
                "orbit_samples must be >= 2".into(),
            ));
        }

        Ok(self.params)
    }
}
