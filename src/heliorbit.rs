//! # Heliorbit: session façade
//!
//! [`Heliorbit`] bundles what a reporting or plotting session needs across calls:
//!
//! 1. **Numerical parameters** ([`EvaluationParams`]) applied to every evaluation.
//! 2. **Distance boundaries** ([`DistanceBoundaries`]) used for classification.
//! 3. **Catalog cache** ([`CatalogCache`]): tables are parsed once per path and options.
//!
//! Only inputs are cached; positions and distances are recomputed on every call since they
//! depend on the epoch.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use camino::Utf8Path;
//! use heliorbit::catalog::LoadOptions;
//! use heliorbit::heliorbit::Heliorbit;
//!
//! let mut session = Heliorbit::default();
//! let table = session.load(Utf8Path::new("sbdb.csv"), &LoadOptions::default())?;
//! let batch = session.evaluate_now(&table)?;
//! println!("{:#}", session.distribution(&batch));
//!
//! let out = std::fs::File::create("beyond_jupiter.csv")?;
//! session.export_with_distances(&table, &batch, out, Some(5.2))?;
//! # Ok::<(), heliorbit::heliorbit_errors::HeliorbitError>(())
//! ```
use std::{io::Write, sync::Arc};

use camino::Utf8Path;
use hifitime::Epoch;

use crate::{
    catalog::{csv_writer::write_with_distances, CatalogCache, ElementTable, LoadOptions},
    evaluator::{current_position, HeliocentricState},
    heliorbit_errors::HeliorbitError,
    orbit_geometry::OrbitCurve,
    orbit_type::keplerian_element::KeplerianElements,
    params::EvaluationParams,
    pipeline::{evaluate_table, BatchEvaluation, DistanceBoundaries, DistanceDistribution},
    scene::{ClusterPalette, Scene},
    time::now,
};

/// What [`Heliorbit::scene`] draws besides the current object positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneOptions {
    pub object_orbits: bool,
    pub planets: bool,
}

#[derive(Debug, Default)]
pub struct Heliorbit {
    params: EvaluationParams,
    boundaries: DistanceBoundaries,
    cache: CatalogCache,
}

impl Heliorbit {
    pub fn new(params: EvaluationParams, boundaries: DistanceBoundaries) -> Self {
        Heliorbit {
            params,
            boundaries,
            cache: CatalogCache::new(),
        }
    }

    pub fn params(&self) -> &EvaluationParams {
        &self.params
    }

    pub fn boundaries(&self) -> &DistanceBoundaries {
        &self.boundaries
    }

    pub fn set_boundaries(&mut self, boundaries: DistanceBoundaries) {
        self.boundaries = boundaries;
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut CatalogCache {
        &mut self.cache
    }

    /// Load a catalog, or return it from the cache.
    pub fn load(
        &mut self,
        path: &Utf8Path,
        options: &LoadOptions,
    ) -> Result<Arc<ElementTable>, HeliorbitError> {
        self.cache.get_or_load(path, options)
    }

    /// Position of a single body at `epoch`.
    pub fn position_of(
        &self,
        elements: &KeplerianElements,
        epoch: Epoch,
    ) -> Result<HeliocentricState, HeliorbitError> {
        current_position(elements, epoch, &self.params)
    }

    /// Orbit curve of a body, with the configured number of samples.
    pub fn orbit_of(&self, elements: &KeplerianElements) -> Result<OrbitCurve, HeliorbitError> {
        OrbitCurve::new(elements, self.params.orbit_samples)
    }

    /// Evaluate every row of `table` at `epoch`.
    pub fn evaluate(&self, table: &ElementTable, epoch: Epoch) -> BatchEvaluation {
        evaluate_table(table, epoch, &self.params)
    }

    /// Evaluate every row of `table` at the current wall-clock time.
    pub fn evaluate_now(&self, table: &ElementTable) -> Result<BatchEvaluation, HeliorbitError> {
        Ok(self.evaluate(table, now()?))
    }

    /// Distribution of `batch` over the session boundaries.
    pub fn distribution(&self, batch: &BatchEvaluation) -> DistanceDistribution {
        batch.distribution(&self.boundaries)
    }

    /// Write `table` with its `r` column; with `beyond = Some(d)` only rows with `r > d`.
    pub fn export_with_distances<W: Write>(
        &self,
        table: &ElementTable,
        batch: &BatchEvaluation,
        writer: W,
        beyond: Option<f64>,
    ) -> Result<usize, HeliorbitError> {
        let distances = batch.distances();
        match beyond {
            Some(threshold) => write_with_distances(table, &distances, writer, |r| r > threshold),
            None => write_with_distances(table, &distances, writer, |_| true),
        }
    }

    /// Build a scene from an evaluated table: object markers coloured by cluster, then the
    /// optional object orbits and planets, then the Sun.
    pub fn scene(
        &self,
        table: &ElementTable,
        batch: &BatchEvaluation,
        options: SceneOptions,
    ) -> Result<Scene, HeliorbitError> {
        let palette = ClusterPalette::from_entries(table.entries());
        let mut scene = Scene::new();

        scene.add_object_positions(table.entries(), batch, &palette)?;
        if options.object_orbits {
            scene.add_object_orbits(table.entries(), self.params.orbit_samples, &palette);
        }
        if options.planets {
            scene.add_planets(batch.epoch(), &self.params)?;
        }
        scene.add_sun();
        Ok(scene)
    }
}
