use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::frame::FeatureTable;

/// Create the parent directories of `path` if they don't exist.
pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Write a feature table as CSV: the index first, then every column in order.
///
/// Undefined cells are written as empty fields. Parent directories are
/// created as needed.
pub fn write_csv<P: AsRef<Path>>(path: P, table: &FeatureTable) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let file = File::create(path)?;
    write_csv_to(file, table)?;
    debug!(path = %path.display(), rows = table.len(), "wrote feature csv");
    Ok(())
}

/// Same as [`write_csv`] for any byte sink.
pub fn write_csv_to<W: Write>(sink: W, table: &FeatureTable) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);

    let mut header = Vec::with_capacity(table.columns().len() + 1);
    header.push(table.index_name());
    header.extend(table.column_names());
    writer.write_record(&header)?;

    let mut record = Vec::with_capacity(header.len());
    for (row, key) in table.index().iter().enumerate() {
        record.clear();
        record.push(key.clone());
        record.extend(table.columns().iter().map(|c| format_cell(c.values[row])));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}
