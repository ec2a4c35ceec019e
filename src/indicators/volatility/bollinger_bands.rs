use serde::{Deserialize, Serialize};
use stats::rolling_std;

use crate::trend::ma::moving_average;

/// Bollinger Bands window and band width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    /// Window for the middle band and the standard deviation (typically 20)
    pub window: usize,
    /// Number of standard deviations between the middle and outer bands (typically 2.0)
    pub std_mult: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        BollingerParams {
            window: 20,
            std_mult: 2.0,
        }
    }
}

/// Bollinger Bands Output
#[derive(Debug, Clone)]
pub struct BollingerBandsOutput {
    /// Upper Band = Middle Band + (Multiplier * SD)
    pub upper_band: Vec<f64>,
    /// Middle Band = SMA
    pub middle_band: Vec<f64>,
    /// Lower Band = Middle Band - (Multiplier * SD)
    pub lower_band: Vec<f64>,
}

/// Computes Bollinger Bands.
///
/// The band half-width uses the population standard deviation of the
/// trailing window.
///
/// # Arguments
///
/// * `data` - A slice of f64 values (typically closing prices).
/// * `params` - Window and standard deviation multiplier.
///
/// # Returns
///
/// A `BollingerBandsOutput` struct containing the upper, middle, and lower bands.
pub fn bollinger_bands(data: &[f64], params: BollingerParams) -> BollingerBandsOutput {
    let middle_band = moving_average(data, params.window);
    let std_dev = rolling_std(data, params.window, 0);

    let (upper_band, lower_band): (Vec<f64>, Vec<f64>) = middle_band
        .iter()
        .zip(&std_dev)
        .map(|(&mid, &sd)| {
            let half_width = params.std_mult * sd;
            (mid + half_width, mid - half_width)
        })
        .unzip();

    BollingerBandsOutput {
        upper_band,
        middle_band,
        lower_band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_bands() {
        let data = vec![
            10.0, 10.0, 10.0, 10.0, 10.0,
            12.0, 12.0, 12.0, 12.0, 12.0,
        ];
        let params = BollingerParams {
            window: 5,
            std_mult: 2.0,
        };
        let bb = bollinger_bands(&data, params);

        assert!(bb.middle_band[3].is_nan());
        assert!(bb.upper_band[3].is_nan());

        // flat window: bands collapse onto the mean
        assert_eq!(bb.middle_band[4], 10.0);
        assert_eq!(bb.upper_band[4], 10.0);
        assert_eq!(bb.lower_band[4], 10.0);

        // window [10, 10, 10, 10, 12]: mean 10.4, population sd 0.8
        assert!((bb.middle_band[5] - 10.4).abs() < 1e-10);
        assert!((bb.upper_band[5] - 12.0).abs() < 1e-10);
        assert!((bb.lower_band[5] - 8.8).abs() < 1e-10);
    }

    #[test]
    fn test_bollinger_symmetry() {
        let data: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.4).cos() * 3.0).collect();
        let bb = bollinger_bands(&data, BollingerParams::default());

        for i in 19..50 {
            let up = bb.upper_band[i] - bb.middle_band[i];
            let down = bb.middle_band[i] - bb.lower_band[i];
            assert!((up - down).abs() < 1e-9);
            assert!(up >= 0.0);
        }
        assert!(bb.middle_band[18].is_nan());
    }

    #[test]
    fn test_bollinger_constant_prices() {
        let data = vec![101.3; 30];
        let bb = bollinger_bands(&data, BollingerParams::default());

        for i in 19..30 {
            assert!(!bb.middle_band[i].is_nan());
            assert_eq!(bb.upper_band[i], bb.middle_band[i]);
            assert_eq!(bb.lower_band[i], bb.middle_band[i]);
        }
    }

    #[test]
    fn test_bollinger_defaults() {
        let p = BollingerParams::default();
        assert_eq!(p.window, 20);
        assert_eq!(p.std_mult, 2.0);
    }
}
