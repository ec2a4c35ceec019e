use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::data::Dataset;
use crate::error::{ModelError, Result};
use crate::forest::{ForestParams, RandomForest};
use crate::model::Regressor;

/// Expanding-window folds over `n_cases` time-ordered cases.
///
/// Each test block holds `n_cases / (n_splits + 1)` cases. Fold `i` trains on
/// everything before its test block, so earlier folds train on less data and
/// no fold ever trains on cases later than the ones it is scored on.
pub fn time_series_splits(
    n_cases: usize,
    n_splits: usize,
) -> Result<Vec<(Range<usize>, Range<usize>)>> {
    let test_size = n_cases / (n_splits + 1);
    if n_splits == 0 || test_size == 0 {
        return Err(ModelError::NotEnoughRows {
            needed: n_splits + 1,
            available: n_cases,
        });
    }

    Ok((0..n_splits)
        .map(|i| {
            let train_end = n_cases - (n_splits - i) * test_size;
            (0..train_end, train_end..train_end + test_size)
        })
        .collect())
}

/// Half-open ranges the random-forest parameters are drawn from
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpace {
    pub n_estimators: Range<usize>,
    pub max_depth: Range<usize>,
    pub min_samples_leaf: Range<usize>,
}

impl Default for ParamSpace {
    fn default() -> Self {
        Self {
            n_estimators: 50..300,
            max_depth: 2..10,
            min_samples_leaf: 1..10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_params: ForestParams,
    /// Mean cross-validated R^2 of `best_params`
    pub best_score: f64,
    /// Every draw with its mean score, in draw order
    pub candidates: Vec<(ForestParams, f64)>,
    /// Forest refitted with `best_params` on all of the search data
    pub model: RandomForest,
}

/// Mean out-of-fold R^2 of a forest with `params`.
pub fn cross_val_score(dataset: &Dataset, params: ForestParams, n_splits: usize) -> Result<f64> {
    let folds = time_series_splits(dataset.n_cases, n_splits)?;
    let mut total = 0.0;
    for (train, test) in &folds {
        let mut forest = RandomForest::new(params);
        forest.fit(&dataset.slice(train.clone()))?;
        let test = dataset.slice(test.clone());
        total += stats::r2_score(&test.targets, &forest.predict(&test));
    }
    Ok(total / folds.len() as f64)
}

/// Randomized search over `space`, scored by time-series cross-validation.
///
/// Draws `n_iter` parameter sets from a generator seeded with `seed`; the
/// forests themselves use the same seed. The first draw with the highest
/// mean score wins and is refitted on the whole `dataset`.
pub fn randomized_search(
    dataset: &Dataset,
    space: &ParamSpace,
    n_iter: usize,
    n_splits: usize,
    seed: u64,
) -> Result<SearchResult> {
    if n_iter == 0 {
        return Err(ModelError::Degenerate("n_iter must be positive".into()));
    }
    if space.n_estimators.is_empty() || space.max_depth.is_empty() || space.min_samples_leaf.is_empty()
    {
        return Err(ModelError::Degenerate("empty parameter range".into()));
    }
    // fail before any fitting when the folds cannot be formed
    time_series_splits(dataset.n_cases, n_splits)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut candidates = Vec::with_capacity(n_iter);
    let mut best: Option<(ForestParams, f64)> = None;

    for iter in 0..n_iter {
        let params = ForestParams {
            n_estimators: rng.gen_range(space.n_estimators.clone()),
            max_depth: rng.gen_range(space.max_depth.clone()),
            min_samples_leaf: rng.gen_range(space.min_samples_leaf.clone()),
            seed,
        };
        let score = cross_val_score(dataset, params, n_splits)?;
        debug!(iter, ?params, score, "search candidate");

        if best.is_none_or(|(_, s)| score > s) {
            best = Some((params, score));
        }
        candidates.push((params, score));
    }

    let Some((best_params, best_score)) = best else {
        return Err(ModelError::Degenerate("no candidates evaluated".into()));
    };
    info!(?best_params, best_score, "randomized search done");

    let mut model = RandomForest::new(best_params);
    model.fit(dataset)?;

    Ok(SearchResult {
        best_params,
        best_score,
        candidates,
        model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_series_splits() {
        let folds = time_series_splits(12, 5).unwrap();
        assert_eq!(
            folds,
            vec![
                (0..2, 2..4),
                (0..4, 4..6),
                (0..6, 6..8),
                (0..8, 8..10),
                (0..10, 10..12),
            ]
        );
    }

    #[test]
    fn test_time_series_splits_with_remainder() {
        // 23 / 6 = 3 per test block; the leftover rows widen the first train block
        let folds = time_series_splits(23, 5).unwrap();
        assert_eq!(folds[0], (0..8, 8..11));
        assert_eq!(folds[4], (0..20, 20..23));
        for (train, test) in &folds {
            assert_eq!(train.end, test.start);
            assert_eq!(test.len(), 3);
        }
    }

    #[test]
    fn test_time_series_splits_too_short() {
        assert!(time_series_splits(5, 5).is_err());
        assert!(time_series_splits(6, 5).is_ok());
        assert!(time_series_splits(10, 0).is_err());
    }

    fn signal_data(n: usize) -> Dataset {
        let mut data = Vec::with_capacity(n * 2);
        let mut targets = Vec::with_capacity(n);
        for i in 0..n {
            let a = ((i * 13) % 17) as f64 / 17.0;
            let b = ((i * 5) % 11) as f64 / 11.0;
            data.push(a);
            data.push(b);
            targets.push(if a > 0.5 { 1.0 } else { -1.0 } + 0.1 * b);
        }
        Dataset::new(data, targets, 2).unwrap()
    }

    #[test]
    fn test_randomized_search() {
        let ds = signal_data(120);
        let space = ParamSpace {
            n_estimators: 5..15,
            max_depth: 2..5,
            min_samples_leaf: 1..4,
        };
        let result = randomized_search(&ds, &space, 4, 3, 42).unwrap();

        assert_eq!(result.candidates.len(), 4);
        for (params, _) in &result.candidates {
            assert!(space.n_estimators.contains(&params.n_estimators));
            assert!(space.max_depth.contains(&params.max_depth));
            assert!(space.min_samples_leaf.contains(&params.min_samples_leaf));
            assert_eq!(params.seed, 42);
        }
        let top = result
            .candidates
            .iter()
            .map(|(_, s)| *s)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.best_score, top);
        assert!(result.best_score > 0.8);
        assert_eq!(result.model.n_trees(), result.best_params.n_estimators);
    }

    #[test]
    fn test_randomized_search_is_seeded() {
        let ds = signal_data(60);
        let space = ParamSpace {
            n_estimators: 3..6,
            max_depth: 1..4,
            min_samples_leaf: 1..3,
        };
        let a = randomized_search(&ds, &space, 3, 2, 9).unwrap();
        let b = randomized_search(&ds, &space, 3, 2, 9).unwrap();
        assert_eq!(a.best_params, b.best_params);
        assert_eq!(a.candidates, b.candidates);
    }

    #[test]
    fn test_default_space() {
        let space = ParamSpace::default();
        assert_eq!(space.n_estimators, 50..300);
        assert_eq!(space.max_depth, 2..10);
        assert_eq!(space.min_samples_leaf, 1..10);
    }
}
