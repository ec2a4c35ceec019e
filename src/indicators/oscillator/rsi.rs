/// Calculates the Relative Strength Index (RSI) with Wilder's smoothing.
///
/// Average gain and loss are seeded with the simple mean of the first
/// `period` price changes, then updated as
/// `avg = (avg * (period - 1) + x) / period`. RSI = 100 - 100 / (1 + RS).
///
/// # Arguments
///
/// * `data` - A slice of f64 values (prices).
/// * `period` - The lookback period for RSI (typically 14).
///
/// # Returns
///
/// A Vec<f64> containing the RSI values. The first `period` values are NaN.
/// A NaN price breaks the chain of changes; the averages are re-seeded once
/// `period` fresh changes have been observed.
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
    let n = data.len();
    let mut rsi_values = vec![f64::NAN; n];
    if period == 0 || period >= n {
        return rsi_values;
    }

    let p = period as f64;
    let mut avg: Option<(f64, f64)> = None;
    let mut gains = 0.0;
    let mut losses = 0.0;
    let mut seen = 0usize;

    for i in 1..n {
        let change = data[i] - data[i - 1];
        if change.is_nan() {
            avg = None;
            gains = 0.0;
            losses = 0.0;
            seen = 0;
            continue;
        }
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };

        let (avg_gain, avg_loss) = match avg {
            Some((g, l)) => ((g * (p - 1.0) + gain) / p, (l * (p - 1.0) + loss) / p),
            None => {
                gains += gain;
                losses += loss;
                seen += 1;
                if seen < period {
                    continue;
                }
                (gains / p, losses / p)
            }
        };

        avg = Some((avg_gain, avg_loss));
        rsi_values[i] = rsi_from_averages(avg_gain, avg_loss);
    }

    rsi_values
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // no movement at all reads as neutral
        if avg_gain == 0.0 { 50.0 } else { 100.0 }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}
