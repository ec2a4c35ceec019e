// ============================================================================
// Mean
// ============================================================================

/// Arithmetic mean. NaN for an empty slice; any NaN input propagates.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

// ============================================================================
// Variance / standard deviation (two pass)
// ============================================================================

/// Variance with `ddof` delta degrees of freedom (0 = population, 1 = sample).
///
/// Returns NaN when `data.len() <= ddof`. A constant slice yields exactly
/// zero; its summed mean can be off by an ulp, so it is checked up front.
pub fn variance(data: &[f64], ddof: usize) -> f64 {
    if data.len() <= ddof {
        return f64::NAN;
    }
    if data.iter().all(|&x| x == data[0]) {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    ss / (data.len() - ddof) as f64
}

pub fn std_dev(data: &[f64], ddof: usize) -> f64 {
    variance(data, ddof).sqrt()
}

/// Trailing-window standard deviation aligned with `data`.
///
/// Entry `i` covers `data[i + 1 - window..=i]`; the first `window - 1`
/// entries, and any window containing NaN, are NaN.
pub fn rolling_std(data: &[f64], window: usize, ddof: usize) -> Vec<f64> {
    let n = data.len();
    let mut out = vec![f64::NAN; n];
    if window == 0 || window > n || window <= ddof {
        return out;
    }

    for i in (window - 1)..n {
        let slice = &data[i + 1 - window..=i];
        if slice.iter().any(|x| x.is_nan()) {
            continue;
        }
        out[i] = std_dev(slice, ddof);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_variance_ddof() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&data, 0) - 4.0).abs() < 1e-12);
        assert!((variance(&data, 1) - 32.0 / 7.0).abs() < 1e-12);
        assert!((std_dev(&data, 0) - 2.0).abs() < 1e-12);
        assert!(variance(&[1.0], 1).is_nan());
    }

    #[test]
    fn test_constant_is_exact_zero() {
        let data = [101.3; 20];
        assert_eq!(std_dev(&data, 1), 0.0);
        assert_eq!(std_dev(&data, 0), 0.0);

        assert!(std_dev(&[f64::NAN, f64::NAN], 0).is_nan());
        assert!(rolling_std(&data, 5, 0)[4..].iter().all(|&sd| sd == 0.0));
    }

    #[test]
    fn test_rolling_std() {
        let data = [1.0, 2.0, 3.0, 4.0, f64::NAN, 6.0, 7.0, 8.0];
        let out = rolling_std(&data, 3, 1);
        assert_eq!(out.len(), data.len());
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!((out[2] - 1.0).abs() < 1e-12);
        assert!((out[3] - 1.0).abs() < 1e-12);
        // windows touching the NaN at index 4
        assert!(out[4].is_nan());
        assert!(out[5].is_nan());
        assert!(out[6].is_nan());
        assert!((out[7] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rolling_std_degenerate_window() {
        let data = [1.0, 2.0, 3.0];
        assert!(rolling_std(&data, 4, 0).iter().all(|x| x.is_nan()));
        assert!(rolling_std(&data, 0, 0).iter().all(|x| x.is_nan()));
        assert!(rolling_std(&data, 1, 1).iter().all(|x| x.is_nan()));
    }
}
