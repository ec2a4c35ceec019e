/// Natural log of consecutive price ratios.
///
/// `out[0]` is NaN (no prior row). `out[i]` is NaN whenever either price is
/// undefined, zero or negative.
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; prices.len()];

    for i in 1..prices.len() {
        let (prev, cur) = (prices[i - 1], prices[i]);
        // NaN fails both comparisons
        if prev > 0.0 && cur > 0.0 {
            out[i] = (cur / prev).ln();
        }
    }

    out
}

/// Shift a series down by `lag` rows: `out[i] = data[i - lag]`.
///
/// The first `lag` entries are NaN; a lag at least as long as the series
/// yields an all-NaN column.
pub fn lagged(data: &[f64], lag: usize) -> Vec<f64> {
    let n = data.len();
    let mut out = vec![f64::NAN; n];
    if lag >= n {
        return out;
    }
    out[lag..].copy_from_slice(&data[..n - lag]);
    out
}
