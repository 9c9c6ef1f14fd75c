//! # Drawable scene primitives
//!
//! A [`Scene`] is a renderer-agnostic list of [`Trace`]s: marker clouds for current
//! positions and polylines for orbits, all in heliocentric ecliptic coordinates (AU).
//! It serialises to JSON with `serde_json` so that any external 3D front-end can draw it.
//!
//! Colours are CSS colour names. Objects carrying a cluster label are coloured with a
//! [`ClusterPalette`]:
//!
//! * labels are sorted as strings;
//! * the noise label (`-1`) is always [`NOISE_COLOR`];
//! * the remaining labels take the [`BASE_COLORS`] in order, cycling after twelve;
//! * unlabeled objects, or labels unknown to the palette, are [`DEFAULT_COLOR`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use heliorbit::params::EvaluationParams;
//! use heliorbit::scene::Scene;
//! use heliorbit::time::now;
//!
//! let mut scene = Scene::new();
//! scene.add_planets(now()?, &EvaluationParams::default())?;
//! scene.add_sun();
//! println!("{}", scene.to_json()?);
//! # Ok::<(), heliorbit::heliorbit_errors::HeliorbitError>(())
//! ```
use std::collections::{BTreeMap, BTreeSet};

use hifitime::Epoch;
use itertools::Itertools;
use log::debug;
use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    catalog::{CatalogEntry, ClusterLabel},
    heliorbit_errors::HeliorbitError,
    orbit_geometry::OrbitCurve,
    params::EvaluationParams,
    pipeline::BatchEvaluation,
    planets::planets,
};

/// Cluster colours, assigned in label order.
pub const BASE_COLORS: [&str; 12] = [
    "red",
    "deepskyblue",
    "lime",
    "yellow",
    "magenta",
    "orange",
    "cyan",
    "white",
    "purple",
    "pink",
    "brown",
    "gold",
];

/// Colour of the noise cluster.
pub const NOISE_COLOR: &str = "gray";

/// Colour of unlabeled objects.
pub const DEFAULT_COLOR: &str = "red";

pub const SUN_COLOR: &str = "gold";

/// Deterministic cluster label → colour mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterPalette {
    colors: BTreeMap<ClusterLabel, &'static str>,
}

impl ClusterPalette {
    /// Build the palette of a set of labels; duplicates are ignored.
    pub fn new<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a ClusterLabel>,
    {
        let distinct: BTreeSet<&ClusterLabel> = labels.into_iter().collect();

        let mut colors = BTreeMap::new();
        let mut next = 0;
        for label in distinct {
            let color = if label.is_noise() {
                NOISE_COLOR
            } else {
                let c = BASE_COLORS[next % BASE_COLORS.len()];
                next += 1;
                c
            };
            colors.insert(label.clone(), color);
        }
        Self { colors }
    }

    /// Palette of the labels carried by `entries`.
    pub fn from_entries(entries: &[CatalogEntry]) -> Self {
        Self::new(entries.iter().filter_map(|entry| entry.cluster.as_ref()))
    }

    pub fn color_of(&self, label: Option<&ClusterLabel>) -> &'static str {
        label
            .and_then(|l| self.colors.get(l))
            .copied()
            .unwrap_or(DEFAULT_COLOR)
    }

    /// `(label, colour)` pairs in label order, for legends.
    pub fn legend(&self) -> impl Iterator<Item = (&ClusterLabel, &'static str)> + '_ {
        self.colors.iter().map(|(label, color)| (label, *color))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Cloud of point markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerTrace {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// Hover text, one per point.
    pub text: Vec<String>,
    /// Colour, one per point; empty lets the renderer pick.
    pub colors: Vec<String>,
    pub size: f64,
    pub opacity: f64,
    /// Draw `text` next to the markers instead of on hover only.
    pub show_text: bool,
}

/// Polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// `None` lets the renderer pick.
    pub color: Option<String>,
    pub width: f64,
    pub show_legend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trace {
    Markers(MarkerTrace),
    Line(LineTrace),
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Markers(m) => &m.name,
            Trace::Line(l) => &l.name,
        }
    }

    /// Number of points of the trace.
    pub fn len(&self) -> usize {
        match self {
            Trace::Markers(m) => m.x.len(),
            Trace::Line(l) => l.x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn split_xyz<I>(points: I) -> (Vec<f64>, Vec<f64>, Vec<f64>)
where
    I: IntoIterator<Item = Vector3<f64>>,
{
    points.into_iter().map(|p| (p.x, p.y, p.z)).multiunzip()
}

fn line_from_curve(
    name: String,
    curve: OrbitCurve,
    color: Option<String>,
    show_legend: bool,
) -> LineTrace {
    let (x, y, z) = split_xyz(curve);
    LineTrace {
        name,
        x,
        y,
        z,
        color,
        width: 1.0,
        show_legend,
    }
}

/// Ordered list of traces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    traces: Vec<Trace>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn push(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    /// Add one marker cloud with the current position of every successfully evaluated
    /// object. Returns the number of markers.
    ///
    /// `batch` must come from evaluating `entries` (same length, same order).
    pub fn add_object_positions(
        &mut self,
        entries: &[CatalogEntry],
        batch: &BatchEvaluation,
        palette: &ClusterPalette,
    ) -> Result<usize, HeliorbitError> {
        if entries.len() != batch.len() {
            return Err(HeliorbitError::ColumnLengthMismatch {
                expected: entries.len(),
                got: batch.len(),
            });
        }

        let mut text = Vec::new();
        let mut colors = Vec::new();
        let mut points = Vec::new();
        for (entry, result) in entries.iter().zip(batch.results()) {
            if let Ok(state) = result {
                points.push(state.position);
                text.push(entry.display_name());
                colors.push(palette.color_of(entry.cluster.as_ref()).to_string());
            }
        }
        let (x, y, z) = split_xyz(points);
        let n = x.len();

        self.traces.push(Trace::Markers(MarkerTrace {
            name: "objects".to_string(),
            x,
            y,
            z,
            text,
            colors,
            size: 2.0,
            opacity: 0.85,
            show_text: false,
        }));
        Ok(n)
    }

    /// Add one orbit polyline per object. Objects whose elements cannot describe an ellipse
    /// are skipped. Returns the number of orbits added.
    pub fn add_object_orbits(
        &mut self,
        entries: &[CatalogEntry],
        samples: usize,
        palette: &ClusterPalette,
    ) -> usize {
        let mut added = 0;
        for entry in entries {
            match OrbitCurve::new(&entry.elements, samples) {
                Ok(curve) => {
                    let color = palette.color_of(entry.cluster.as_ref()).to_string();
                    self.traces.push(Trace::Line(line_from_curve(
                        entry.display_name(),
                        curve,
                        Some(color),
                        false,
                    )));
                    added += 1;
                }
                Err(err) => debug!("orbit of {} skipped: {err}", entry.display_name()),
            }
        }
        added
    }

    /// Add the orbit and the position at `epoch` of each of the eight planets.
    pub fn add_planets(
        &mut self,
        epoch: Epoch,
        params: &EvaluationParams,
    ) -> Result<(), HeliorbitError> {
        for planet in planets() {
            let orbit = planet.orbit()?;
            self.traces.push(Trace::Line(line_from_curve(
                format!("{} Orbit", planet.name),
                orbit,
                None,
                true,
            )));

            let state = planet.position_at(epoch, params)?;
            self.traces.push(Trace::Markers(MarkerTrace {
                name: planet.name.to_string(),
                x: vec![state.position.x],
                y: vec![state.position.y],
                z: vec![state.position.z],
                text: vec![planet.name.to_string()],
                colors: Vec::new(),
                size: 5.0,
                opacity: 1.0,
                show_text: true,
            }));
        }
        Ok(())
    }

    /// Add the Sun at the origin.
    pub fn add_sun(&mut self) {
        self.traces.push(Trace::Markers(MarkerTrace {
            name: "Sun".to_string(),
            x: vec![0.0],
            y: vec![0.0],
            z: vec![0.0],
            text: vec!["Sun".to_string()],
            colors: vec![SUN_COLOR.to_string()],
            size: 8.0,
            opacity: 1.0,
            show_text: true,
        }));
    }

    pub fn to_json(&self) -> Result<String, HeliorbitError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, HeliorbitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
