use serde::{Deserialize, Serialize};

use crate::trend::ma::exponential_moving_average;

/// MACD (Moving Average Convergence Divergence) windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    /// Fast EMA window (typically 12)
    pub fast: usize,
    /// Slow EMA window (typically 26)
    pub slow: usize,
    /// Signal line EMA window (typically 9)
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        MacdParams {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// MACD (Moving Average Convergence Divergence) Output
#[derive(Debug, Clone)]
pub struct MacdOutput {
    /// MACD Line = Fast EMA - Slow EMA
    pub macd_line: Vec<f64>,
    /// Signal Line = EMA of MACD Line
    pub signal_line: Vec<f64>,
    /// Histogram = MACD Line - Signal Line
    pub histogram: Vec<f64>,
}

/// Computes the MACD indicator.
///
/// The two price EMAs are computed independently; the signal line is the EMA
/// of the MACD line, seeded on its first `signal` defined values. On a clean
/// series the MACD line starts at `slow - 1` and the signal line and
/// histogram at `slow + signal - 2`.
pub fn macd(data: &[f64], params: MacdParams) -> MacdOutput {
    let fast_ema = exponential_moving_average(data, params.fast);
    let slow_ema = exponential_moving_average(data, params.slow);

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = exponential_moving_average(&macd_line, params.signal);

    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    MacdOutput {
        macd_line,
        signal_line,
        histogram,
    }
}
