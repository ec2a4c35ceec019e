use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use features::FeatureConfig;

/// Command line of the `prep` binary
#[derive(Debug, Clone, Parser)]
#[command(name = "prep")]
#[command(about = "Compute technical-analysis features from a daily price CSV")]
pub struct Config {
    /// Raw price CSV with a Date column and Adj Close, Adj_Close or Close
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the feature CSV (parent directories are created)
    #[arg(long)]
    pub output: PathBuf,

    /// TOML file with feature parameters; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Column to compute the indicators from
    #[arg(long)]
    pub price_column: Option<String>,

    /// Moving average windows, e.g. 5,20,50
    #[arg(long, value_delimiter = ',')]
    pub ma_windows: Option<Vec<usize>>,

    /// Return lags, e.g. 1,2,3
    #[arg(long, value_delimiter = ',')]
    pub lags: Option<Vec<usize>>,
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.input == self.output {
            anyhow::bail!("input and output must be different files");
        }
        if let Some(windows) = &self.ma_windows {
            if windows.is_empty() {
                anyhow::bail!("--ma-windows needs at least one window");
            }
        }
        if let Some(lags) = &self.lags {
            if lags.is_empty() {
                anyhow::bail!("--lags needs at least one lag");
            }
        }
        Ok(())
    }

    /// Feature parameters: the `--config` file (or defaults) with the
    /// command-line overrides applied, validated.
    pub fn feature_config(&self) -> Result<FeatureConfig> {
        let mut config = match &self.config {
            Some(path) => FeatureConfig::from_file(path)
                .with_context(|| format!("loading feature config {}", path.display()))?,
            None => FeatureConfig::default(),
        };

        if let Some(price_column) = &self.price_column {
            config.price_column = price_column.clone();
        }
        if let Some(windows) = &self.ma_windows {
            config.ma_windows = windows.iter().copied().collect::<BTreeSet<_>>();
        }
        if let Some(lags) = &self.lags {
            config.lags = lags.iter().copied().collect::<BTreeSet<_>>();
        }

        config.validate()?;
        Ok(config)
    }
}
