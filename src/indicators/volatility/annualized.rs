use stats::rolling_std;

/// Trading days per year used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Rolling sample standard deviation of `returns` over `window` rows, scaled
/// by `sqrt(252)`.
///
/// The first defined value sits at the end of the first window of defined
/// returns; for log-returns (undefined at row 0) that is row `window`.
pub fn annualized_volatility(returns: &[f64], window: usize) -> Vec<f64> {
    let scale = TRADING_DAYS_PER_YEAR.sqrt();
    rolling_std(returns, window, 1)
        .into_iter()
        .map(|sd| sd * scale)
        .collect()
}
