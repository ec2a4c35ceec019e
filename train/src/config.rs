use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

/// Model family to fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelKind {
    /// Ridge regression
    Ridge,
    /// Random forest tuned by randomized search
    Rf,
}

/// Configuration for model training
#[derive(Debug, Clone, Parser)]
#[command(name = "train")]
#[command(about = "Fit a regression model on a prepared feature CSV")]
pub struct Config {
    /// Feature CSV written by `prep`
    #[arg(long)]
    pub input: PathBuf,

    /// Feature columns used as model inputs
    #[arg(long, num_args = 1.., required = true)]
    pub features: Vec<String>,

    /// Column to predict
    #[arg(long, default_value = "LogReturn")]
    pub target: String,

    #[arg(long, value_enum, default_value_t = ModelKind::Rf)]
    pub model: ModelKind,

    /// Fraction of the most recent rows held out for testing
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Ridge penalty
    #[arg(long, default_value_t = 1.0)]
    pub alpha: f64,

    /// Random-forest parameter draws
    #[arg(long, default_value_t = 20)]
    pub n_iter: usize,

    /// Time-series cross-validation folds
    #[arg(long, default_value_t = 5)]
    pub cv_splits: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.features.is_empty() {
            anyhow::bail!("at least one feature column is required");
        }
        if self.features.iter().any(|f| f == &self.target) {
            anyhow::bail!("target '{}' is also listed as a feature", self.target);
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            anyhow::bail!("test_fraction must be in (0, 1), got {}", self.test_fraction);
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            anyhow::bail!("alpha must be finite and non-negative, got {}", self.alpha);
        }
        if self.n_iter == 0 {
            anyhow::bail!("n_iter must be greater than 0");
        }
        if self.cv_splits < 2 {
            anyhow::bail!("cv_splits must be at least 2");
        }
        Ok(())
    }
}
