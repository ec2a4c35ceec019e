use anyhow::{Context, Result};
use tracing::info;

use crate::config::{Config, ModelKind};
use crate::data::{Dataset, StandardScaler};
use crate::evaluation::{Evaluation, evaluate};
use crate::model::Regressor;
use crate::ridge::Ridge;
use crate::search::{ParamSpace, randomized_search};

/// Load the feature CSV, fit the configured model and score it on the most
/// recent `test_fraction` of rows.
pub fn run(config: &Config) -> Result<Evaluation> {
    let table = table::read_feature_csv(&config.input, "Date")
        .with_context(|| format!("reading {}", config.input.display()))?;
    info!(path = %config.input.display(), rows = table.len(), "loaded features");

    let dataset = Dataset::from_table(&table, &config.features, &config.target)?;
    // Scaled on all rows before the split
    let scaler = StandardScaler::fit(&dataset)?;
    let scaled = scaler.transform(&dataset);
    let (train, test) = scaled.split_chronological(config.test_fraction)?;
    info!(train = train.n_cases, test = test.n_cases, "split dataset");

    let evaluation = match config.model {
        ModelKind::Ridge => {
            let mut model = Ridge::new(config.alpha);
            model.fit(&train).context("fitting ridge regression")?;
            info!(beta = ?model.beta, intercept = model.intercept, "ridge coefficients");
            evaluate(&model, &test)
        }
        ModelKind::Rf => {
            let result = randomized_search(
                &train,
                &ParamSpace::default(),
                config.n_iter,
                config.cv_splits,
                config.seed,
            )
            .context("tuning random forest")?;
            info!(
                params = ?result.best_params,
                cv_r2 = result.best_score,
                "best random forest"
            );
            evaluate(&result.model, &test)
        }
    };

    info!(r2 = evaluation.r2, mse = evaluation.mse, "test evaluation");
    Ok(evaluation)
}
