//! # heliorbit
//!
//! Current heliocentric positions of solar-system bodies from their Keplerian elements.
//!
//! * [`kepler`] – Kepler's equation solver and anomaly conversions.
//! * [`orbit_geometry`] – orbital plane → ecliptic rotation, instant positions, orbit curves.
//! * [`evaluator`] – position and distance of one body at an epoch.
//! * [`pipeline`] – batch distances, distance buckets, filtering and distribution reports.
//! * [`catalog`] – CSV ingestion of element tables and augmented CSV output.
//! * [`planets`], [`scene`] – the eight planets and drawable primitives for a 3D front-end.
//! * [`heliorbit`] – session façade owning parameters, boundaries and the catalog cache.
pub mod catalog;
pub mod constants;
pub mod evaluator;
pub mod heliorbit;
pub mod heliorbit_errors;
pub mod kepler;
pub mod orbit_geometry;
pub mod orbit_type;
pub mod params;
pub mod pipeline;
pub mod planets;
pub mod scene;
pub mod time;

pub use crate::catalog::{CatalogEntry, ClusterLabel, ElementTable};
pub use crate::constants::{AstronomicalUnit, Degree, JulianYear, Radian};
pub use crate::evaluator::{current_position, HeliocentricState};
pub use crate::heliorbit::Heliorbit;
pub use crate::heliorbit_errors::{FailureKind, HeliorbitError};
pub use crate::orbit_type::{keplerian_element::KeplerianElements, MeanAnomaly};
pub use crate::params::EvaluationParams;
pub use crate::pipeline::{BatchEvaluation, DistanceBoundaries, DistanceBucket};
