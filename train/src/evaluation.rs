use std::fmt;

use crate::data::Dataset;
use crate::model::Regressor;

/// Out-of-sample fit of a model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub r2: f64,
    pub mse: f64,
    pub n_test: usize,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R²: {:.4}, MSE: {:.6}", self.r2, self.mse)
    }
}

/// Score `model` on `test`
pub fn evaluate<M: Regressor + ?Sized>(model: &M, test: &Dataset) -> Evaluation {
    let predicted = model.predict(test);
    Evaluation {
        r2: stats::r2_score(&test.targets, &predicted),
        mse: stats::mean_squared_error(&test.targets, &predicted),
        n_test: test.n_cases,
    }
}
