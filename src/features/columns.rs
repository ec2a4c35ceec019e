//! Names of the derived columns.

use crate::config::FeatureConfig;

pub const LOG_RETURN: &str = "LogReturn";
pub const VOLATILITY: &str = "Volatility";
pub const MACD: &str = "MACD";
pub const MACD_SIGNAL: &str = "MACD_signal";
pub const MACD_DIFF: &str = "MACD_diff";
pub const BB_MAVG: &str = "BB_mavg";
pub const BB_HBAND: &str = "BB_hband";
pub const BB_LBAND: &str = "BB_lband";
pub const MA20_X_VOLATILITY: &str = "MA20_x_Volatility";

/// Window of the moving average feeding the interaction term.
pub const INTERACTION_MA_WINDOW: usize = 20;

pub fn ma(window: usize) -> String {
    format!("MA_{}", window)
}

pub fn rsi(window: usize) -> String {
    format!("RSI_{}", window)
}

pub fn ema(window: usize) -> String {
    format!("EMA_{}", window)
}

pub fn lag(k: usize) -> String {
    format!("Lag{}_LogReturn", k)
}

/// Every column the pipeline derives for `config`, in the order they are added.
pub fn derived(config: &FeatureConfig) -> Vec<String> {
    let mut names = vec![LOG_RETURN.to_string()];
    names.extend(config.ma_windows.iter().map(|&w| ma(w)));
    names.push(VOLATILITY.to_string());
    names.push(rsi(config.rsi_window));
    names.push(ema(config.ema_window));
    names.extend([MACD, MACD_SIGNAL, MACD_DIFF].map(String::from));
    names.extend([BB_MAVG, BB_HBAND, BB_LBAND].map(String::from));
    names.extend(config.lags.iter().map(|&k| lag(k)));
    names.push(MA20_X_VOLATILITY.to_string());
    names
}
