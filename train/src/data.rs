use std::ops::Range;

use table::FeatureTable;
use tracing::{debug, warn};

use crate::error::{ModelError, Result};

/// Design matrix and target, one row per case in time order.
///
/// `data` is row-major: case `i` occupies `data[i * n_vars..(i + 1) * n_vars]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub data: Vec<f64>,
    pub targets: Vec<f64>,
    pub n_cases: usize,
    pub n_vars: usize,
}

impl Dataset {
    pub fn new(data: Vec<f64>, targets: Vec<f64>, n_vars: usize) -> Result<Self> {
        if n_vars == 0 {
            return Err(ModelError::Degenerate("no input variables".into()));
        }
        if data.len() != targets.len() * n_vars {
            return Err(ModelError::Degenerate(format!(
                "{} values do not form {} rows of {} variables",
                data.len(),
                targets.len(),
                n_vars
            )));
        }
        Ok(Self {
            n_cases: targets.len(),
            data,
            targets,
            n_vars,
        })
    }

    /// Pull `features` and `target` out of a feature table.
    ///
    /// Rows where any of those columns is undefined are skipped.
    pub fn from_table(table: &FeatureTable, features: &[String], target: &str) -> Result<Self> {
        let columns: Vec<&[f64]> = features
            .iter()
            .map(|name| {
                table
                    .column(name)
                    .ok_or_else(|| ModelError::UnknownColumn(name.clone()))
            })
            .collect::<Result<_>>()?;
        let y = table
            .column(target)
            .ok_or_else(|| ModelError::UnknownColumn(target.to_string()))?;

        let mut data = Vec::with_capacity(table.len() * features.len());
        let mut targets = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            if y[row].is_nan() || columns.iter().any(|c| c[row].is_nan()) {
                continue;
            }
            data.extend(columns.iter().map(|c| c[row]));
            targets.push(y[row]);
        }

        let skipped = table.len() - targets.len();
        if skipped > 0 {
            warn!(skipped, "dropped incomplete rows");
        }
        debug!(cases = targets.len(), vars = features.len(), "built dataset");
        Self::new(data, targets, features.len())
    }

    pub fn row(&self, case: usize) -> &[f64] {
        &self.data[case * self.n_vars..(case + 1) * self.n_vars]
    }

    pub fn is_empty(&self) -> bool {
        self.n_cases == 0
    }

    /// Consecutive cases `range`, in order.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self {
            data: self.data[range.start * self.n_vars..range.end * self.n_vars].to_vec(),
            targets: self.targets[range.clone()].to_vec(),
            n_cases: range.len(),
            n_vars: self.n_vars,
        }
    }

    /// Cases at `indices`, repeats allowed.
    pub fn select(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(indices.len() * self.n_vars);
        for &i in indices {
            data.extend_from_slice(self.row(i));
        }
        Self {
            data,
            targets: indices.iter().map(|&i| self.targets[i]).collect(),
            n_cases: indices.len(),
            n_vars: self.n_vars,
        }
    }

    /// Split off the last `ceil(n * test_fraction)` cases as the test set.
    pub fn split_chronological(&self, test_fraction: f64) -> Result<(Self, Self)> {
        let n_test = (self.n_cases as f64 * test_fraction).ceil() as usize;
        if n_test == 0 || n_test >= self.n_cases {
            return Err(ModelError::NotEnoughRows {
                needed: 2,
                available: self.n_cases,
            });
        }
        let n_train = self.n_cases - n_test;
        Ok((self.slice(0..n_train), self.slice(n_train..self.n_cases)))
    }
}

/// Per-variable centering and scaling to unit population variance.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
}

impl StandardScaler {
    /// Constant variables get a scale of 1 so they map to zero.
    pub fn fit(dataset: &Dataset) -> Result<Self> {
        if dataset.is_empty() {
            return Err(ModelError::NotEnoughRows {
                needed: 1,
                available: 0,
            });
        }

        let mut means = Vec::with_capacity(dataset.n_vars);
        let mut scales = Vec::with_capacity(dataset.n_vars);
        let mut column = Vec::with_capacity(dataset.n_cases);
        for ivar in 0..dataset.n_vars {
            column.clear();
            column.extend((0..dataset.n_cases).map(|i| dataset.data[i * dataset.n_vars + ivar]));
            let mean = stats::mean(&column);
            let std = stats::std_dev(&column, 0);
            means.push(mean);
            scales.push(if std > 0.0 { std } else { 1.0 });
        }

        Ok(Self { means, scales })
    }

    pub fn transform(&self, dataset: &Dataset) -> Dataset {
        let data = dataset
            .data
            .chunks(dataset.n_vars)
            .flat_map(|row| {
                row.iter()
                    .zip(self.means.iter().zip(&self.scales))
                    .map(|(x, (m, s))| (x - m) / s)
            })
            .collect();
        Dataset {
            data,
            targets: dataset.targets.clone(),
            n_cases: dataset.n_cases,
            n_vars: dataset.n_vars,
        }
    }
}
