use std::env;
use std::fs::File;

use camino::Utf8PathBuf;
use heliorbit::catalog::LoadOptions;
use heliorbit::time::{now, parse_epoch};
use heliorbit::{Heliorbit, HeliorbitError};

/// Current heliocentric distance of every object of a catalog, bucketed by giant-planet
/// orbits, and export of the objects beyond a threshold.
///
/// Usage:
///   distance_report <CATALOG.csv> [--epoch <ISO>] [--beyond <AU>] [--out <FILE.csv>]
/// Example:
///   RUST_LOG=info distance_report tests/data/sbdb_sample.csv --beyond 5.2 --out outer.csv
fn main() -> Result<(), HeliorbitError> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let mut catalog = Utf8PathBuf::from("tests/data/sbdb_sample.csv");
    let mut epoch = None;
    let mut beyond = 5.2;
    let mut out = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--epoch" => epoch = args.next(),
            "--beyond" => {
                beyond = args
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or_else(|| {
                        HeliorbitError::InvalidBoundaries("--beyond needs a distance in AU".into())
                    })?
            }
            "--out" => out = args.next().map(Utf8PathBuf::from),
            path => catalog = Utf8PathBuf::from(path),
        }
    }

    let epoch = match epoch {
        Some(iso) => parse_epoch(&iso)?,
        None => now()?,
    };

    let mut session = Heliorbit::default();
    let table = session.load(&catalog, &LoadOptions::default())?;
    let batch = session.evaluate(&table, epoch);

    println!("Heliocentric distances at {epoch} ({catalog})");
    println!("{:#}", session.distribution(&batch));
    println!("{}", batch.diagnostics());

    let outer = batch.filter_beyond(beyond);
    println!("{} objects beyond {beyond} AU", outer.len());

    if let Some(path) = out {
        let file = File::create(&path)?;
        let written = session.export_with_distances(&table, &batch, file, Some(beyond))?;
        println!("{written} rows written to {path}");
    }

    Ok(())
}
