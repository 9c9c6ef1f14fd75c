//! CSV ingestion of orbital-element catalogs.
//!
//! The field delimiter is not declared by the files found in the wild (JPL SBDB exports
//! use `,`, European spreadsheets `;`, some pipelines `\t`), so it is sniffed: each
//! candidate is tried in turn and the first one whose normalised header contains an
//! `a` column wins.
use std::io::Read;

use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};

use super::{
    schema::{
        coerce_f64, normalize_headers, CoercionPolicy, LoadOptions, MeanAnomalySource,
        TableSchema,
    },
    CatalogEntry, ClusterLabel, ElementTable,
};
use crate::{
    heliorbit_errors::HeliorbitError,
    orbit_type::{keplerian_element::KeplerianElements, MeanAnomaly},
};

/// Candidate field delimiters, by priority.
pub const DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Try every delimiter of [`DELIMITERS`] and return the first one exposing an `a` column,
/// together with the raw and normalised headers.
fn sniff_delimiter(
    data: &[u8],
    source: &str,
) -> Result<(u8, StringRecord, StringRecord), HeliorbitError> {
    for &delimiter in DELIMITERS.iter() {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(data);
        let raw = match rdr.headers() {
            Ok(h) => h.clone(),
            Err(_) => continue,
        };
        let normalized = normalize_headers(&raw);
        if normalized.iter().any(|h| h == "a") {
            debug!(
                "{source}: delimiter {:?} selected, {} columns",
                delimiter as char,
                normalized.len()
            );
            return Ok((delimiter, raw, normalized));
        }
    }
    Err(HeliorbitError::UndetectableDelimiter(source.to_string()))
}

fn text_cell(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|idx| record.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl ElementTable {
    /// Parse a catalog from any reader.
    ///
    /// Arguments
    /// -----------------
    /// * `reader` – byte source holding the whole table (header line first).
    /// * `source` – human-readable origin, used in logs and error messages.
    /// * `options` – ingestion options.
    ///
    /// Return
    /// ----------
    /// * The table with every kept row parsed into a [`CatalogEntry`].
    /// * `Err(HeliorbitError::UndetectableDelimiter)` when no delimiter exposes an `a` column.
    /// * `Err(HeliorbitError::MissingColumn)` when a required column is absent.
    ///
    /// Per-row coercion failures are never errors: see [`CoercionPolicy`].
    pub fn from_reader<R: Read>(
        mut reader: R,
        source: &str,
        options: &LoadOptions,
    ) -> Result<Self, HeliorbitError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let body = data.strip_prefix(UTF8_BOM).unwrap_or(data.as_slice());

        let (delimiter, headers, normalized) = sniff_delimiter(body, source)?;
        let schema = TableSchema::resolve(&normalized, options)?;
        let required = schema.required_indices();

        if options.cluster_column.is_some() && schema.cluster.is_none() {
            warn!(
                "{source}: cluster column {:?} not found, objects will be unlabeled",
                options.cluster_column
            );
        }

        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(body);

        let mut records = Vec::new();
        let mut entries = Vec::new();
        let mut dropped_rows = 0;

        for record in rdr.records() {
            let record = record?;

            let has_failure = required
                .iter()
                .any(|&idx| coerce_f64(record.get(idx)).is_nan());
            if has_failure && options.coercion == CoercionPolicy::DropRow {
                dropped_rows += 1;
                continue;
            }

            let mean_anomaly = match schema.mean_anomaly {
                MeanAnomalySource::Observed(idx) => {
                    MeanAnomaly::observed_degrees(coerce_f64(record.get(idx)))
                }
                MeanAnomalySource::AtJ2000(idx) => {
                    MeanAnomaly::at_j2000_degrees(coerce_f64(record.get(idx)))
                }
            };

            let elements = KeplerianElements::from_degrees(
                coerce_f64(record.get(schema.a)),
                coerce_f64(record.get(schema.e)),
                schema.angle(&record, schema.i),
                schema.angle(&record, schema.om),
                schema.angle(&record, schema.w),
                mean_anomaly,
            );

            entries.push(CatalogEntry {
                identifier: text_cell(&record, schema.identifier).map(String::from),
                cluster: text_cell(&record, schema.cluster).map(ClusterLabel::new),
                elements,
                record_index: records.len(),
            });
            records.push(record);
        }

        info!(
            "{source}: {} objects loaded, {dropped_rows} rows dropped",
            entries.len()
        );

        Ok(ElementTable {
            headers,
            records,
            entries,
            dropped_rows,
            delimiter,
        })
    }
}

/// Load a catalog file.
///
/// See [`ElementTable::from_reader`] for the parsing rules.
pub fn load_catalog(path: &Utf8Path, options: &LoadOptions) -> Result<ElementTable, HeliorbitError> {
    let file = std::fs::File::open(path)?;
    ElementTable::from_reader(file, path.as_str(), options)
}
