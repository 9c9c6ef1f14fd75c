//! Column normalisation and alias resolution for orbital-element tables.
//!
//! Headers are trimmed and lower-cased once; every lookup afterwards is exact. The
//! mean anomaly is the only element published under several names: `m`, `ma` and
//! `mean_anomaly` all refer to the present-day value, while `m0` is a J2000 reference
//! value and is only used when none of the direct aliases exist.
use csv::StringRecord;
use log::debug;

use crate::heliorbit_errors::HeliorbitError;

/// Accepted names of the directly observed mean anomaly, by priority.
pub const MEAN_ANOMALY_ALIASES: [&str; 3] = ["m", "ma", "mean_anomaly"];

/// Name of the J2000 reference mean anomaly column.
pub const REFERENCE_MEAN_ANOMALY: &str = "m0";

/// Default identifier columns, by priority.
pub const IDENTIFIER_COLUMNS: [&str; 3] = ["full_name", "name", "pdes"];

/// Which element columns must be present for the table to be usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequiredColumns {
    /// `a`, `e` and a mean anomaly: enough for heliocentric distances. Missing or
    /// unparsable angles default to 0°, so positions computed from such a table are not
    /// meaningful.
    Distance,
    /// `a`, `e`, `i`, `om`, `w` and a mean anomaly: full 3D positions.
    #[default]
    Position,
}

/// What to do with a row whose required element fails numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoercionPolicy {
    /// Exclude the row from the table.
    #[default]
    DropRow,
    /// Keep the row with NaN in the failed cells; its derived values will be NaN.
    KeepAsNan,
}

/// Ingestion options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadOptions {
    pub required: RequiredColumns,
    pub coercion: CoercionPolicy,
    /// Column holding precomputed cluster labels (e.g. `cluster`, `dbscan_cluster`).
    pub cluster_column: Option<String>,
    /// Candidate identifier columns, first present wins.
    pub identifier_columns: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            required: RequiredColumns::default(),
            coercion: CoercionPolicy::default(),
            cluster_column: None,
            identifier_columns: IDENTIFIER_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LoadOptions {
    pub fn with_required(mut self, required: RequiredColumns) -> Self {
        self.required = required;
        self
    }

    pub fn with_coercion(mut self, coercion: CoercionPolicy) -> Self {
        self.coercion = coercion;
        self
    }

    pub fn with_cluster_column(mut self, column: impl Into<String>) -> Self {
        self.cluster_column = Some(normalize_header(&column.into()));
        self
    }
}

/// Where the mean anomaly of each row comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeanAnomalySource {
    /// Directly observed value at this column index.
    Observed(usize),
    /// J2000 reference value at this column index.
    AtJ2000(usize),
}

/// Column indices resolved against a normalised header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub a: usize,
    pub e: usize,
    pub i: Option<usize>,
    pub om: Option<usize>,
    pub w: Option<usize>,
    pub mean_anomaly: MeanAnomalySource,
    pub identifier: Option<usize>,
    pub cluster: Option<usize>,
    pub required: RequiredColumns,
}

/// Trim, drop a UTF-8 byte-order mark, and lower-case a header cell.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Normalise every cell of a header record.
pub fn normalize_headers(headers: &StringRecord) -> StringRecord {
    headers.iter().map(normalize_header).collect()
}

fn position(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn require(headers: &StringRecord, name: &str) -> Result<usize, HeliorbitError> {
    position(headers, name).ok_or_else(|| HeliorbitError::MissingColumn(name.to_string()))
}

impl TableSchema {
    /// Resolve the schema of a **normalised** header.
    ///
    /// Return
    /// ------
    /// * `Err(HeliorbitError::MissingColumn)` naming the first required column that is
    ///   absent; this is fatal and no row is read.
    pub fn resolve(headers: &StringRecord, options: &LoadOptions) -> Result<Self, HeliorbitError> {
        let a = require(headers, "a")?;
        let e = require(headers, "e")?;

        let (i, om, w) = match options.required {
            RequiredColumns::Position => (
                Some(require(headers, "i")?),
                Some(require(headers, "om")?),
                Some(require(headers, "w")?),
            ),
            RequiredColumns::Distance => (
                position(headers, "i"),
                position(headers, "om"),
                position(headers, "w"),
            ),
        };

        let mean_anomaly = match MEAN_ANOMALY_ALIASES
            .iter()
            .find_map(|alias| position(headers, alias).map(|idx| (*alias, idx)))
        {
            Some((alias, idx)) => {
                debug!("mean anomaly read from column '{alias}'");
                MeanAnomalySource::Observed(idx)
            }
            None => match position(headers, REFERENCE_MEAN_ANOMALY) {
                Some(idx) => {
                    debug!("mean anomaly read from J2000 column '{REFERENCE_MEAN_ANOMALY}'");
                    MeanAnomalySource::AtJ2000(idx)
                }
                None => {
                    return Err(HeliorbitError::MissingColumn(
                        "m (or ma, mean_anomaly, m0)".to_string(),
                    ))
                }
            },
        };

        let identifier = options
            .identifier_columns
            .iter()
            .find_map(|name| position(headers, &normalize_header(name)));

        let cluster = options
            .cluster_column
            .as_deref()
            .and_then(|name| position(headers, &normalize_header(name)));

        Ok(Self {
            a,
            e,
            i,
            om,
            w,
            mean_anomaly,
            identifier,
            cluster,
            required: options.required,
        })
    }

    /// Indices of the columns whose coercion failure triggers [`CoercionPolicy::DropRow`].
    ///
    /// Angles only count for [`RequiredColumns::Position`]; the distance does not depend
    /// on them.
    pub fn required_indices(&self) -> Vec<usize> {
        let ma = match self.mean_anomaly {
            MeanAnomalySource::Observed(idx) | MeanAnomalySource::AtJ2000(idx) => idx,
        };
        let angles = match self.required {
            RequiredColumns::Position => [self.i, self.om, self.w],
            RequiredColumns::Distance => [None; 3],
        };
        [Some(self.a), Some(self.e)]
            .into_iter()
            .chain(angles)
            .chain([Some(ma)])
            .flatten()
            .collect()
    }

    /// Angle in degrees read from column `idx`.
    ///
    /// For distance-only tables an absent column or an unparsable cell gives 0°; for
    /// position tables an unparsable cell gives NaN.
    pub fn angle(&self, record: &StringRecord, idx: Option<usize>) -> f64 {
        let value = idx.map_or(0.0, |idx| coerce_f64(record.get(idx)));
        match self.required {
            RequiredColumns::Distance if value.is_nan() => 0.0,
            _ => value,
        }
    }
}

/// Lenient numeric coercion: anything that does not parse as a float becomes NaN.
pub fn coerce_f64(field: Option<&str>) -> f64 {
    field
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
