use tracing::debug;

use crate::data::Dataset;
use crate::error::{ModelError, Result};
use crate::model::Regressor;

/// Ridge regression with an unpenalized intercept.
///
/// Minimizes `||y - Xw - b||^2 + alpha * ||w||^2` by cyclic coordinate
/// descent on the centered cross-product matrices.
#[derive(Debug, Clone)]
pub struct Ridge {
    pub alpha: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub beta: Vec<f64>,
    pub intercept: f64,
    /// Iterations used by the last fit
    pub iterations: usize,
    fitted: bool,
}

impl Ridge {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            max_iterations: 1000,
            tolerance: 1e-12,
            beta: Vec::new(),
            intercept: 0.0,
            iterations: 0,
            fitted: false,
        }
    }
}

impl Regressor for Ridge {
    fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        let nvars = dataset.n_vars;
        let ncases = dataset.n_cases;
        if ncases < 2 {
            return Err(ModelError::NotEnoughRows {
                needed: 2,
                available: ncases,
            });
        }
        let n = ncases as f64;

        let mut xmeans = vec![0.0; nvars];
        for icase in 0..ncases {
            for (ivar, xm) in xmeans.iter_mut().enumerate() {
                *xm += dataset.data[icase * nvars + ivar];
            }
        }
        xmeans.iter_mut().for_each(|xm| *xm /= n);
        let ymean = dataset.targets.iter().sum::<f64>() / n;

        // Centered inner products, scaled by 1/n
        let mut xinner = vec![0.0; nvars * nvars];
        let mut yinner = vec![0.0; nvars];
        for icase in 0..ncases {
            let row = dataset.row(icase);
            let yc = dataset.targets[icase] - ymean;
            for ivar in 0..nvars {
                let xi = row[ivar] - xmeans[ivar];
                yinner[ivar] += xi * yc;
                for jvar in ivar..nvars {
                    xinner[ivar * nvars + jvar] += xi * (row[jvar] - xmeans[jvar]);
                }
            }
        }
        for ivar in 0..nvars {
            yinner[ivar] /= n;
            for jvar in ivar..nvars {
                xinner[ivar * nvars + jvar] /= n;
                xinner[jvar * nvars + ivar] = xinner[ivar * nvars + jvar];
            }
        }

        let penalty = self.alpha / n;
        if penalty == 0.0 && xinner.iter().step_by(nvars + 1).any(|&xss| xss == 0.0) {
            return Err(ModelError::Degenerate(
                "constant input variable with no ridge penalty".into(),
            ));
        }

        let mut beta = vec![0.0; nvars];
        self.iterations = 0;
        for iter in 0..self.max_iterations {
            self.iterations = iter + 1;
            let mut max_change: f64 = 0.0;

            for ivar in 0..nvars {
                let xss = xinner[ivar * nvars + ivar];
                let update_factor = xss + penalty;
                if update_factor == 0.0 {
                    continue;
                }

                let mut sum = 0.0;
                for kvar in 0..nvars {
                    if kvar != ivar {
                        sum += xinner[ivar * nvars + kvar] * beta[kvar];
                    }
                }
                let new_beta = (yinner[ivar] - sum) / update_factor;

                max_change = max_change.max((new_beta - beta[ivar]).abs());
                beta[ivar] = new_beta;
            }

            if max_change < self.tolerance {
                break;
            }
        }

        self.intercept = ymean - beta.iter().zip(&xmeans).map(|(b, m)| b * m).sum::<f64>();
        self.beta = beta;
        self.fitted = true;
        debug!(iterations = self.iterations, alpha = self.alpha, "ridge fitted");
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        if !self.fitted {
            return f64::NAN;
        }
        self.intercept + self.beta.iter().zip(row).map(|(b, x)| b * x).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_variable_closed_form() {
        let ds = Dataset::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![2.0, 4.0, 6.0, 8.0, 10.0],
            1,
        )
        .unwrap();
        let mut model = Ridge::new(1.0);
        model.fit(&ds).unwrap();

        // w = Sxy / (Sxx + alpha) = 20 / 11
        let w = 20.0 / 11.0;
        assert!((model.beta[0] - w).abs() < 1e-10);
        assert!((model.intercept - (6.0 - 3.0 * w)).abs() < 1e-10);
        assert!((model.predict_row(&[3.0]) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_variables_match_normal_equations() {
        let x1 = [0.5, 1.0, -1.5, 2.0, 0.0, 3.5, -0.5, 1.5];
        let x2 = [1.0, -2.0, 0.5, 0.0, 1.5, -1.0, 2.5, 0.5];
        let data: Vec<f64> = x1.iter().zip(&x2).flat_map(|(&a, &b)| [a, b]).collect();
        let targets: Vec<f64> = x1
            .iter()
            .zip(&x2)
            .enumerate()
            .map(|(i, (a, b))| 1.0 + 2.0 * a - 3.0 * b + if i % 2 == 0 { 0.1 } else { -0.1 })
            .collect();
        let ds = Dataset::new(data, targets.clone(), 2).unwrap();

        let alpha = 0.7;
        let mut model = Ridge::new(alpha);
        model.fit(&ds).unwrap();

        // (Xc'Xc + alpha I) w = Xc'yc solved directly
        let m1 = x1.iter().sum::<f64>() / 8.0;
        let m2 = x2.iter().sum::<f64>() / 8.0;
        let my = targets.iter().sum::<f64>() / 8.0;
        let (mut s11, mut s12, mut s22, mut s1y, mut s2y) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for i in 0..8 {
            let (a, b, y) = (x1[i] - m1, x2[i] - m2, targets[i] - my);
            s11 += a * a;
            s12 += a * b;
            s22 += b * b;
            s1y += a * y;
            s2y += b * y;
        }
        let (a11, a22) = (s11 + alpha, s22 + alpha);
        let det = a11 * a22 - s12 * s12;
        let w1 = (a22 * s1y - s12 * s2y) / det;
        let w2 = (a11 * s2y - s12 * s1y) / det;

        assert!((model.beta[0] - w1).abs() < 1e-8);
        assert!((model.beta[1] - w2).abs() < 1e-8);
        assert!((model.intercept - (my - w1 * m1 - w2 * m2)).abs() < 1e-8);
    }

    #[test]
    fn test_constant_input_gets_zero_weight() {
        let ds = Dataset::new(vec![1.0, 5.0, 2.0, 5.0, 3.0, 5.0], vec![1.0, 2.0, 3.0], 2).unwrap();
        let mut model = Ridge::new(1.0);
        model.fit(&ds).unwrap();
        assert_eq!(model.beta[1], 0.0);

        let mut unpenalized = Ridge::new(0.0);
        assert!(matches!(unpenalized.fit(&ds), Err(ModelError::Degenerate(_))));
    }

    #[test]
    fn test_too_few_rows() {
        let ds = Dataset::new(vec![1.0], vec![1.0], 1).unwrap();
        assert!(matches!(
            Ridge::new(1.0).fit(&ds),
            Err(ModelError::NotEnoughRows { .. })
        ));
        assert!(Ridge::new(1.0).predict_row(&[1.0]).is_nan());
    }
}
