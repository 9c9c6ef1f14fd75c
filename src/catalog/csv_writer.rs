//! Write a catalog back with its computed heliocentric distance.
use std::io::Write;

use csv::{StringRecord, WriterBuilder};
use log::info;

use super::{schema::normalize_header, ElementTable};
use crate::heliorbit_errors::HeliorbitError;

/// Name of the distance column appended to the output table.
pub const DISTANCE_COLUMN: &str = "r";

/// Write `table` as comma-separated values with a trailing `r` column.
///
/// Arguments
/// -----------------
/// * `table` – the loaded catalog; records are written verbatim.
/// * `distances` – one heliocentric distance per row of `table`, in row order.
/// * `writer` – destination.
/// * `keep` – row filter evaluated on the distance; use `|_| true` to keep everything.
///
/// Return
/// ----------
/// * The number of data rows written.
/// * `Err(HeliorbitError::ColumnLengthMismatch)` if `distances` and `table` differ in length.
///
/// Undefined (NaN) distances are written as empty cells. If the table already carries an
/// `r` column, its values are replaced instead of adding a second one.
pub fn write_with_distances<W, F>(
    table: &ElementTable,
    distances: &[f64],
    writer: W,
    keep: F,
) -> Result<usize, HeliorbitError>
where
    W: Write,
    F: Fn(f64) -> bool,
{
    if distances.len() != table.len() {
        return Err(HeliorbitError::ColumnLengthMismatch {
            expected: table.len(),
            got: distances.len(),
        });
    }

    let existing = table
        .headers()
        .iter()
        .position(|h| normalize_header(h) == DISTANCE_COLUMN);

    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);

    let mut header = table.headers().clone();
    if existing.is_none() {
        header.push_field(DISTANCE_COLUMN);
    }
    wtr.write_record(&header)?;

    let mut written = 0;
    for (record, &r) in table.records().iter().zip(distances) {
        if !keep(r) {
            continue;
        }
        let cell = if r.is_nan() { String::new() } else { r.to_string() };
        // short rows are padded so that `r` stays under its header
        let width = record.len().max(table.headers().len());
        let padded = (0..width).map(|k| record.get(k).unwrap_or(""));
        let row: StringRecord = match existing {
            Some(idx) => padded
                .enumerate()
                .map(|(k, field)| if k == idx { cell.as_str() } else { field })
                .collect(),
            None => {
                let mut row: StringRecord = padded.collect();
                row.push_field(&cell);
                row
            }
        };
        wtr.write_record(&row)?;
        written += 1;
    }
    wtr.flush()?;

    info!("{written} of {} rows written", table.len());
    Ok(written)
}
