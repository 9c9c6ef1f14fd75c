//! Distance thresholds and the buckets they delimit.
use std::fmt;

use crate::{
    constants::{
        AstronomicalUnit, JUPITER_BOUNDARY, NEPTUNE_BOUNDARY, SATURN_BOUNDARY, URANUS_BOUNDARY,
    },
    heliorbit_errors::HeliorbitError,
};

/// Ordered, named heliocentric distance thresholds.
///
/// `n` boundaries delimit `n + 1` buckets: bucket `k < n` holds the distances strictly
/// below boundary `k` and at or above boundary `k − 1`, bucket `n` holds everything at or
/// beyond the last boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceBoundaries {
    names: Vec<String>,
    bounds: Vec<AstronomicalUnit>,
}

/// Bucket of a heliocentric distance with respect to a [`DistanceBoundaries`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DistanceBucket {
    /// Below boundary `k` (and not below boundary `k − 1`).
    Below(usize),
    /// At or beyond the outermost boundary.
    Beyond,
    /// Distance not defined (NaN).
    Undetermined,
}

impl DistanceBoundaries {
    /// Build a boundary set from `(name, distance)` pairs.
    ///
    /// Return
    /// ----------
    /// * `Err(HeliorbitError::InvalidBoundaries)` if the set is empty, a distance is not a
    ///   finite positive number, or the distances are not strictly increasing.
    pub fn new<S: Into<String>>(
        boundaries: impl IntoIterator<Item = (S, AstronomicalUnit)>,
    ) -> Result<Self, HeliorbitError> {
        let (names, bounds): (Vec<String>, Vec<f64>) = boundaries
            .into_iter()
            .map(|(name, bound)| (name.into(), bound))
            .unzip();

        if bounds.is_empty() {
            return Err(HeliorbitError::InvalidBoundaries(
                "at least one boundary is required".into(),
            ));
        }
        if let Some(bad) = bounds.iter().find(|b| !(b.is_finite() && **b > 0.0)) {
            return Err(HeliorbitError::InvalidBoundaries(format!(
                "boundary {bad} is not a finite positive distance"
            )));
        }
        if let Some(w) = bounds.windows(2).find(|w| w[0] >= w[1]) {
            return Err(HeliorbitError::InvalidBoundaries(format!(
                "boundaries must be strictly increasing ({} >= {})",
                w[0], w[1]
            )));
        }

        Ok(Self { names, bounds })
    }

    /// Semi-major axes of the giant planets: Jupiter 5.2, Saturn 9.58, Uranus 19.2 and
    /// Neptune 30.1 AU.
    pub fn planetary() -> Self {
        Self {
            names: ["Jupiter", "Saturn", "Uranus", "Neptune"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            bounds: vec![
                JUPITER_BOUNDARY,
                SATURN_BOUNDARY,
                URANUS_BOUNDARY,
                NEPTUNE_BOUNDARY,
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn bounds(&self) -> &[AstronomicalUnit] {
        &self.bounds
    }

    /// Distance of the boundary called `name`, if any.
    pub fn bound_of(&self, name: &str) -> Option<AstronomicalUnit> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.bounds[idx])
    }

    /// Bucket of `r`: the first one whose upper bound is strictly greater than `r`.
    pub fn classify(&self, r: AstronomicalUnit) -> DistanceBucket {
        if r.is_nan() {
            return DistanceBucket::Undetermined;
        }
        match self.bounds.iter().position(|&bound| r < bound) {
            Some(k) => DistanceBucket::Below(k),
            None => DistanceBucket::Beyond,
        }
    }

    /// Every bucket, innermost first, [`DistanceBucket::Undetermined`] excluded.
    pub fn buckets(&self) -> impl Iterator<Item = DistanceBucket> {
        (0..self.bounds.len())
            .map(DistanceBucket::Below)
            .chain(std::iter::once(DistanceBucket::Beyond))
    }

    /// Human-readable bucket name, e.g. `inside Jupiter`, `Jupiter–Saturn`, `beyond Neptune`.
    pub fn label(&self, bucket: DistanceBucket) -> String {
        match bucket {
            DistanceBucket::Below(0) => format!("inside {}", self.names[0]),
            DistanceBucket::Below(k) if k < self.names.len() => {
                format!("{}–{}", self.names[k - 1], self.names[k])
            }
            DistanceBucket::Below(_) | DistanceBucket::Beyond => {
                format!("beyond {}", self.names[self.names.len() - 1])
            }
            DistanceBucket::Undetermined => "undetermined".to_string(),
        }
    }

    /// Distance range `[lower, upper)` of a bucket, `None` for the undetermined one.
    pub fn range(&self, bucket: DistanceBucket) -> Option<(AstronomicalUnit, AstronomicalUnit)> {
        match bucket {
            DistanceBucket::Below(0) => Some((0.0, self.bounds[0])),
            DistanceBucket::Below(k) if k < self.bounds.len() => {
                Some((self.bounds[k - 1], self.bounds[k]))
            }
            DistanceBucket::Below(_) | DistanceBucket::Beyond => {
                Some((self.bounds[self.bounds.len() - 1], f64::INFINITY))
            }
            DistanceBucket::Undetermined => None,
        }
    }
}

impl Default for DistanceBoundaries {
    fn default() -> Self {
        Self::planetary()
    }
}

impl fmt::Display for DistanceBoundaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, (name, bound)) in self.names.iter().zip(&self.bounds).enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name} {bound} AU")?;
        }
        Ok(())
    }
}
