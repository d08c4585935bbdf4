//! Stop table loading

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::{Error, model::BusStop};

/// One row of the stop table. Header names are exact and
/// case-sensitive; additional columns are ignored.
#[derive(Debug, Deserialize)]
struct StopRecord {
    #[serde(rename = "Stop Name")]
    name: String,
    #[serde(rename = "Stop lat")]
    lat: f64,
    #[serde(rename = "Stop lon")]
    lon: f64,
}

/// Reads bus stops from a CSV file with `Stop Name`, `Stop lat` and
/// `Stop lon` columns.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, a required column is
/// missing, or a coordinate fails to parse as a number. Rows are not
/// skipped silently.
pub fn read_stops(path: &Path) -> Result<Vec<BusStop>, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open stop table '{}': {}", path.display(), e),
        )
    })?;

    csv::Reader::from_reader(file)
        .deserialize()
        .map(|row| {
            let record: StopRecord = row?;
            Ok(BusStop::new(record.name, record.lat, record.lon))
        })
        .collect()
}
