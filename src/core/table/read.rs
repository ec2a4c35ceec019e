use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::Result;
use crate::frame::FeatureTable;
use crate::raw::RawTable;

/// Read a CSV file with a header row into text cells.
///
/// Rows with a different number of fields than the header are a CSV error.
pub fn read_raw_csv<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)?;
    let raw = collect_records(reader)?;
    debug!(path = %path.display(), rows = raw.len(), "read raw csv");
    Ok(raw)
}

/// Same as [`read_raw_csv`] for any byte source.
pub fn read_raw_csv_from<R: Read>(source: R) -> Result<RawTable> {
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(source);
    collect_records(reader)
}

/// Read a numeric feature file written by [`write_csv`](crate::write_csv).
pub fn read_feature_csv<P: AsRef<Path>>(path: P, index_column: &str) -> Result<FeatureTable> {
    let raw = read_raw_csv(path)?;
    Ok(FeatureTable::from_raw(&raw, index_column))
}

fn collect_records<R: Read>(mut reader: csv::Reader<R>) -> Result<RawTable> {
    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut raw = RawTable::new(headers);

    for record in reader.records() {
        let record = record?;
        raw.push_row(record.iter().map(str::to_string).collect())?;
    }

    Ok(raw)
}
