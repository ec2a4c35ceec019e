use std::collections::BTreeSet;
use std::path::Path;

use indicators::{BollingerParams, MacdParams};
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::normalize::CANONICAL_PRICE;

/// Parameters of the feature pipeline.
///
/// Every field has a default, so a TOML file only needs to name what it
/// changes:
///
/// ```toml
/// ma_windows = [10, 20, 100]
///
/// [macd]
/// signal = 7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Column the indicators are computed from
    pub price_column: String,
    /// Simple moving average windows, one `MA_<w>` column each
    pub ma_windows: BTreeSet<usize>,
    /// Window of the annualized return volatility
    pub volatility_window: usize,
    pub rsi_window: usize,
    pub ema_window: usize,
    pub macd: MacdParams,
    pub bollinger: BollingerParams,
    /// Lags of `LogReturn`, one `Lag<k>_LogReturn` column each
    pub lags: BTreeSet<usize>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            price_column: CANONICAL_PRICE.to_string(),
            ma_windows: BTreeSet::from([5, 20, 50]),
            volatility_window: 20,
            rsi_window: 14,
            ema_window: 20,
            macd: MacdParams::default(),
            bollinger: BollingerParams::default(),
            lags: BTreeSet::from([1, 2, 3]),
        }
    }
}

impl FeatureConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FeatureConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(FeatureError::InvalidConfig(msg)) };

        if self.price_column.trim().is_empty() {
            return invalid("price_column must not be empty".into());
        }
        if self.ma_windows.is_empty() {
            return invalid("ma_windows must name at least one window".into());
        }
        if self.ma_windows.contains(&0) {
            return invalid("ma_windows must be positive".into());
        }
        if self.lags.is_empty() {
            return invalid("lags must name at least one lag".into());
        }
        if self.lags.contains(&0) {
            return invalid("lags must be positive".into());
        }
        if self.volatility_window == 0 {
            return invalid("volatility_window must be positive".into());
        }
        if self.rsi_window == 0 {
            return invalid("rsi_window must be positive".into());
        }
        if self.ema_window == 0 {
            return invalid("ema_window must be positive".into());
        }
        if self.macd.fast == 0 || self.macd.slow == 0 || self.macd.signal == 0 {
            return invalid("macd windows must be positive".into());
        }
        if self.macd.fast >= self.macd.slow {
            return invalid(format!(
                "macd fast window ({}) must be shorter than slow window ({})",
                self.macd.fast, self.macd.slow
            ));
        }
        if self.bollinger.window == 0 {
            return invalid("bollinger window must be positive".into());
        }
        if !self.bollinger.std_mult.is_finite() || self.bollinger.std_mult < 0.0 {
            return invalid(format!(
                "bollinger std_mult must be finite and non-negative, got {}",
                self.bollinger.std_mult
            ));
        }

        Ok(())
    }

    /// Leading rows that are undefined in at least one derived column on a
    /// series without gaps. The first dense output row is at this index.
    pub fn warmup_rows(&self) -> usize {
        let max_ma = self.ma_windows.iter().max().map_or(0, |w| w.saturating_sub(1));
        let max_lag = self.lags.iter().max().copied().unwrap_or(0);
        [
            1, // LogReturn
            max_ma,
            self.volatility_window,
            self.rsi_window,
            self.ema_window.saturating_sub(1),
            (self.macd.slow + self.macd.signal).saturating_sub(2),
            self.bollinger.window.saturating_sub(1),
            max_lag,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}
