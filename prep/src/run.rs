use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;

/// Row and column counts of one `prep` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepSummary {
    pub rows_in: usize,
    pub rows_out: usize,
    pub columns: usize,
}

/// Read the raw CSV, build the features and write the dense table.
pub fn run(config: &Config) -> Result<PrepSummary> {
    let features = config.feature_config()?;

    let raw = table::read_raw_csv(&config.input)
        .with_context(|| format!("reading {}", config.input.display()))?;
    info!(path = %config.input.display(), rows = raw.len(), "loaded raw prices");

    let prepared = features::prepare(&raw, &features).context("building features")?;

    table::write_csv(&config.output, &prepared)
        .with_context(|| format!("writing {}", config.output.display()))?;
    info!(path = %config.output.display(), rows = prepared.len(), "wrote features");

    Ok(PrepSummary {
        rows_in: raw.len(),
        rows_out: prepared.len(),
        columns: prepared.columns().len(),
    })
}
