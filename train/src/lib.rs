//! Regression models predicting a feature-table target column.
//!
//! Two models are available behind the [`Regressor`] trait: ridge
//! regression solved by coordinate descent, and a bootstrap random forest
//! tuned by randomized search over time-ordered folds.

pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod forest;
pub mod model;
pub mod ridge;
pub mod run;
pub mod search;

pub use config::{Config, ModelKind};
pub use data::{Dataset, StandardScaler};
pub use error::{ModelError, Result};
pub use evaluation::{Evaluation, evaluate};
pub use forest::{ForestParams, RandomForest};
pub use model::Regressor;
pub use ridge::Ridge;
pub use run::run;
pub use search::{ParamSpace, SearchResult, randomized_search, time_series_splits};
