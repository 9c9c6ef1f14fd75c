//! # Orbital-element catalogs
//!
//! Tabular input of the evaluator: one row per body, with at least the semi-major
//! axis `a`, the eccentricity `e` and a mean anomaly, plus the angles `i`, `om`, `w`
//! when 3D positions are needed.
//!
//! Ingestion is a two-step process:
//!
//! 1. **Schema normalisation** ([`schema`]): headers are trimmed and lower-cased, the
//!    field delimiter is sniffed, and the mean-anomaly aliases are resolved once.
//! 2. **Row coercion** ([`csv_reader`]): every row is turned into a [`CatalogEntry`]
//!    holding validated-shape [`KeplerianElements`] (angles in radians). Rows whose
//!    required cells are not numbers are dropped or kept as NaN depending on
//!    [`CoercionPolicy`].
//!
//! The original records are kept alongside the entries so the table can be written
//! back with an extra distance column ([`csv_writer`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use camino::Utf8Path;
//! use heliorbit::catalog::{load_catalog, LoadOptions};
//!
//! let table = load_catalog(Utf8Path::new("asteroids.csv"), &LoadOptions::default())?;
//! for entry in table.entries() {
//!     println!("{}: a = {} AU", entry.display_name(), entry.elements.semi_major_axis);
//! }
//! # Ok::<(), heliorbit::heliorbit_errors::HeliorbitError>(())
//! ```
use std::fmt;

use csv::StringRecord;
use serde::Serialize;

use crate::orbit_type::keplerian_element::KeplerianElements;

pub mod cache;
pub mod csv_reader;
pub mod csv_writer;
pub mod schema;

pub use cache::CatalogCache;
pub use csv_reader::load_catalog;
pub use schema::{CoercionPolicy, LoadOptions, RequiredColumns};

/// Categorical cluster label attached to a body.
///
/// Labels are opaque strings; the only reserved value is the noise label `-1`, written
/// in any numeric spelling (`-1`, `-1.0`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClusterLabel(String);

impl ClusterLabel {
    pub fn new(label: impl Into<String>) -> Self {
        ClusterLabel(label.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for the reserved noise label.
    pub fn is_noise(&self) -> bool {
        self.0.parse::<f64>().is_ok_and(|v| v == -1.0)
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClusterLabel {
    fn from(value: &str) -> Self {
        ClusterLabel::new(value)
    }
}

/// One body of a catalog.
///
/// Fields
/// -----------------
/// * `identifier` – display name, from the first identifier column present.
/// * `cluster` – cluster label, when a cluster column was requested and the cell is not empty.
/// * `elements` – orbital elements, angles in radians.
/// * `record_index` – index of the source record in [`ElementTable::records`].
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub identifier: Option<String>,
    pub cluster: Option<ClusterLabel>,
    pub elements: KeplerianElements,
    pub record_index: usize,
}

impl CatalogEntry {
    /// Identifier, or `#<record_index>` for anonymous rows.
    pub fn display_name(&self) -> String {
        match &self.identifier {
            Some(id) => id.clone(),
            None => format!("#{}", self.record_index),
        }
    }
}

/// A loaded catalog: the kept source records and the parsed entries, in row order.
///
/// `entries()[k].record_index == k` for every loaded table; dropped rows are neither
/// in `records` nor in `entries`.
#[derive(Debug, Clone)]
pub struct ElementTable {
    pub(crate) headers: StringRecord,
    pub(crate) records: Vec<StringRecord>,
    pub(crate) entries: Vec<CatalogEntry>,
    pub(crate) dropped_rows: usize,
    pub(crate) delimiter: u8,
}

impl ElementTable {
    /// Number of kept rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source headers, as read (not normalised).
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of rows excluded by [`CoercionPolicy::DropRow`].
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Field delimiter detected on load.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Iterate over the element sets, in row order.
    pub fn elements(&self) -> impl ExactSizeIterator<Item = &KeplerianElements> + '_ {
        self.entries.iter().map(|entry| &entry.elements)
    }

    /// Distinct cluster labels of the table, sorted.
    pub fn cluster_labels(&self) -> Vec<ClusterLabel> {
        let mut labels: Vec<ClusterLabel> = self
            .entries
            .iter()
            .filter_map(|entry| entry.cluster.clone())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;

    #[test]
    fn test_noise_label() {
        assert!(ClusterLabel::new("-1").is_noise());
        assert!(ClusterLabel::new(" -1.0 ").is_noise());
        assert!(!ClusterLabel::new("1").is_noise());
        assert!(!ClusterLabel::new("noise").is_noise());
        assert_eq!(ClusterLabel::from(" 3 ").as_str(), "3");
    }

    #[test]
    fn test_label_order_is_lexicographic() {
        let mut labels = vec![
            ClusterLabel::new("10"),
            ClusterLabel::new("2"),
            ClusterLabel::new("-1"),
        ];
        labels.sort();
        let sorted: Vec<&str> = labels.iter().map(ClusterLabel::as_str).collect();
        assert_eq!(sorted, vec!["-1", "10", "2"]);
    }
}
