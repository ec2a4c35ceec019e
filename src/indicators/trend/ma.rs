/// Calculates the Simple Moving Average (SMA) for a given data slice and window.
///
/// # Arguments
///
/// * `data` - A slice of f64 values.
/// * `window` - The number of trailing values averaged, current row included.
///
/// # Returns
///
/// A Vec<f64> containing the SMA values. The first `window - 1` values are NaN,
/// as is every position whose window contains a NaN.
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len();
    let mut sma = vec![f64::NAN; n];
    if window == 0 || window > n {
        return sma;
    }

    // running sum over the defined values in the window, plus a count of the
    // undefined ones
    let mut sum = 0.0;
    let mut missing = 0usize;

    for i in 0..n {
        if data[i].is_nan() {
            missing += 1;
        } else {
            sum += data[i];
        }

        if i >= window {
            let old = data[i - window];
            if old.is_nan() {
                missing -= 1;
            } else {
                sum -= old;
            }
        }

        if i + 1 >= window && missing == 0 {
            sma[i] = sum / window as f64;
        }
    }

    sma
}

/// Calculates the Exponential Moving Average (EMA) with smoothing `2 / (window + 1)`.
///
/// The recursion is seeded with the simple average of the first `window`
/// defined values, so on a clean series the first EMA sits at `window - 1`.
/// Leading NaNs are skipped. A NaN later in the series is NaN in the output
/// and the recursion restarts, needing `window` fresh values before the next
/// defined EMA.
pub fn exponential_moving_average(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len();
    let mut ema = vec![f64::NAN; n];
    if window == 0 || window > n {
        return ema;
    }

    let multiplier = 2.0 / (window as f64 + 1.0);
    let mut prev: Option<f64> = None;
    let mut seed_sum = 0.0;
    let mut seed_count = 0usize;

    for (i, &x) in data.iter().enumerate() {
        if x.is_nan() {
            prev = None;
            seed_sum = 0.0;
            seed_count = 0;
            continue;
        }

        match prev {
            Some(p) => {
                let next = (x - p) * multiplier + p;
                ema[i] = next;
                prev = Some(next);
            }
            None => {
                seed_sum += x;
                seed_count += 1;
                if seed_count == window {
                    let seed = seed_sum / window as f64;
                    ema[i] = seed;
                    prev = Some(seed);
                }
            }
        }
    }

    ema
}
