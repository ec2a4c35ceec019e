use crate::data::Dataset;
use crate::error::Result;

/// A model mapping one row of inputs to a predicted target.
pub trait Regressor {
    fn fit(&mut self, dataset: &Dataset) -> Result<()>;

    fn predict_row(&self, row: &[f64]) -> f64;

    fn predict(&self, dataset: &Dataset) -> Vec<f64> {
        (0..dataset.n_cases)
            .map(|i| self.predict_row(dataset.row(i)))
            .collect()
    }
}
