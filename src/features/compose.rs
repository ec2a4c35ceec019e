use indicators::{
    annualized_volatility, bollinger_bands, exponential_moving_average, lagged, log_returns, macd,
    moving_average, rsi,
};
use table::{FeatureTable, RawTable};
use tracing::{debug, info, warn};

use crate::columns;
use crate::config::FeatureConfig;
use crate::error::Result;
use crate::normalize::normalize;

// ============================================================================
// Stages
// ============================================================================
//
// Each stage reads what it needs from `table` and returns a copy with its
// columns appended. The input table is never modified.

/// `LogReturn` from the configured price column.
pub fn add_returns(table: &FeatureTable, config: &FeatureConfig) -> Result<FeatureTable> {
    let prices = table.require(&config.price_column)?;
    debug!(price_column = %config.price_column, "adding log returns");
    Ok(table.with_column(columns::LOG_RETURN, log_returns(prices))?)
}

/// One `MA_<w>` column per configured window, ascending.
pub fn add_moving_averages(table: &FeatureTable, config: &FeatureConfig) -> Result<FeatureTable> {
    let prices = table.require(&config.price_column)?;
    let averages: Vec<(String, Vec<f64>)> = config
        .ma_windows
        .iter()
        .map(|&w| (columns::ma(w), moving_average(prices, w)))
        .collect();
    debug!(windows = ?config.ma_windows, "adding moving averages");
    Ok(table.with_columns(averages)?)
}

/// Annualized rolling volatility of `LogReturn`.
pub fn add_volatility(table: &FeatureTable, config: &FeatureConfig) -> Result<FeatureTable> {
    let returns = table.require(columns::LOG_RETURN)?;
    debug!(window = config.volatility_window, "adding volatility");
    let volatility = annualized_volatility(returns, config.volatility_window);
    Ok(table.with_column(columns::VOLATILITY, volatility)?)
}

pub fn add_rsi(table: &FeatureTable, config: &FeatureConfig) -> Result<FeatureTable> {
    let prices = table.require(&config.price_column)?;
    debug!(window = config.rsi_window, "adding RSI");
    Ok(table.with_column(columns::rsi(config.rsi_window), rsi(prices, config.rsi_window))?)
}

pub fn add_ema(table: &FeatureTable, config: &FeatureConfig) -> Result<FeatureTable> {
    let prices = table.require(&config.price_column)?;
    debug!(window = config.ema_window, "adding EMA");
    let ema = exponential_moving_average(prices, config.ema_window);
    Ok(table.with_column(columns::ema(config.ema_window), ema)?)
}

/// `MACD`, `MACD_signal` and `MACD_diff`.
pub fn add_macd(table: &FeatureTable, config: &FeatureConfig) -> Result<FeatureTable> {
    let prices = table.require(&config.price_column)?;
    debug!(params = ?config.macd, "adding MACD");
    let out = macd(prices, config.macd);
    Ok(table.with_columns(vec![
        (columns::MACD, out.macd_line),
        (columns::MACD_SIGNAL, out.signal_line),
        (columns::MACD_DIFF, out.histogram),
    ])?)
}

/// `BB_mavg`, `BB_hband` and `BB_lband`.
pub fn add_bollinger(table: &FeatureTable, config: &FeatureConfig) -> Result<FeatureTable> {
    let prices = table.require(&config.price_column)?;
    debug!(params = ?config.bollinger, "adding Bollinger bands");
    let bands = bollinger_bands(prices, config.bollinger);
    Ok(table.with_columns(vec![
        (columns::BB_MAVG, bands.middle_band),
        (columns::BB_HBAND, bands.upper_band),
        (columns::BB_LBAND, bands.lower_band),
    ])?)
}

/// One `Lag<k>_LogReturn` column per configured lag, ascending.
pub fn add_lagged_returns(table: &FeatureTable, config: &FeatureConfig) -> Result<FeatureTable> {
    let returns = table.require(columns::LOG_RETURN)?;
    let lags: Vec<(String, Vec<f64>)> = config
        .lags
        .iter()
        .map(|&k| (columns::lag(k), lagged(returns, k)))
        .collect();
    debug!(lags = ?config.lags, "adding lagged returns");
    Ok(table.with_columns(lags)?)
}

/// `MA20_x_Volatility`, the product of `MA_20` and `Volatility`.
///
/// Fails with [`MissingColumn`](crate::FeatureError::MissingColumn) when
/// either input is absent, which happens when 20 is not among the
/// moving-average windows.
pub fn add_interaction(table: &FeatureTable) -> Result<FeatureTable> {
    let ma = table.require(&columns::ma(columns::INTERACTION_MA_WINDOW))?;
    let volatility = table.require(columns::VOLATILITY)?;

    let product: Vec<f64> = ma.iter().zip(volatility).map(|(m, v)| m * v).collect();
    debug!("adding interaction term");
    Ok(table.with_column(columns::MA20_X_VOLATILITY, product)?)
}

// ============================================================================
// Pipeline
// ============================================================================

/// Run every stage on a normalized table and keep only the complete rows.
pub fn build_features(table: &FeatureTable, config: &FeatureConfig) -> Result<FeatureTable> {
    let warmup = config.warmup_rows();
    if table.len() <= warmup {
        warn!(
            rows = table.len(),
            warmup, "input is not longer than the indicator warm-up, output will be empty"
        );
    }

    let table = add_returns(table, config)?;
    let table = add_moving_averages(&table, config)?;
    let table = add_volatility(&table, config)?;
    let table = add_rsi(&table, config)?;
    let table = add_ema(&table, config)?;
    let table = add_macd(&table, config)?;
    let table = add_bollinger(&table, config)?;
    let table = add_lagged_returns(&table, config)?;
    let table = add_interaction(&table)?;

    let dense = table.retain_complete();
    info!(
        rows_in = table.len(),
        rows_out = dense.len(),
        dropped = table.len() - dense.len(),
        columns = dense.columns().len(),
        "features built"
    );
    Ok(dense)
}

/// Validate `config`, normalize `raw` and build the feature table.
pub fn prepare(raw: &RawTable, config: &FeatureConfig) -> Result<FeatureTable> {
    config.validate()?;
    let table = normalize(raw, &config.price_column)?;
    info!(rows = table.len(), columns = table.columns().len(), "input normalized");
    build_features(&table, config)
}
