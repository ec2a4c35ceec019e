use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::data::Dataset;
use crate::error::{ModelError, Result};
use crate::model::Regressor;

/// Random forest hyper-parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 5,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

// ============================================================================
// Regression tree
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Leaf(f64),
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, row: &[f64]) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    /// Number of cases going left once sorted on `feature`
    n_left: usize,
}

/// CART regression tree grown on cases `indices` of `dataset`.
///
/// Every variable is tried at every node and the split with the largest
/// reduction in squared error wins. Growth stops at `max_depth`, when a node
/// cannot be split into two children of at least `min_samples_leaf` cases,
/// or when its targets are all equal.
fn grow(
    dataset: &Dataset,
    indices: &mut [usize],
    depth: usize,
    max_depth: usize,
    min_samples_leaf: usize,
) -> Node {
    let n = indices.len();
    let sum: f64 = indices.iter().map(|&i| dataset.targets[i]).sum();
    let mean = sum / n as f64;

    let pure = indices
        .iter()
        .all(|&i| dataset.targets[i] == dataset.targets[indices[0]]);
    if depth >= max_depth || n < 2 * min_samples_leaf || pure {
        return Node::Leaf(mean);
    }

    let Some(best) = best_split(dataset, indices, sum, min_samples_leaf) else {
        return Node::Leaf(mean);
    };

    indices.sort_by(|&a, &b| {
        dataset.data[a * dataset.n_vars + best.feature]
            .total_cmp(&dataset.data[b * dataset.n_vars + best.feature])
    });
    let (left, right) = indices.split_at_mut(best.n_left);

    Node::Split {
        feature: best.feature,
        threshold: best.threshold,
        left: Box::new(grow(dataset, left, depth + 1, max_depth, min_samples_leaf)),
        right: Box::new(grow(dataset, right, depth + 1, max_depth, min_samples_leaf)),
    }
}

fn best_split(
    dataset: &Dataset,
    indices: &[usize],
    total: f64,
    min_samples_leaf: usize,
) -> Option<BestSplit> {
    let n = indices.len();
    let nvars = dataset.n_vars;
    // Maximizing sum_l^2/n_l + sum_r^2/n_r minimizes the children's squared error
    let parent_score = total * total / n as f64;
    let mut best: Option<(f64, BestSplit)> = None;
    let mut order: Vec<usize> = indices.to_vec();

    for feature in 0..nvars {
        let x = |i: usize| dataset.data[i * nvars + feature];
        order.sort_by(|&a, &b| x(a).total_cmp(&x(b)));

        let mut left_sum = 0.0;
        for n_left in 1..n {
            left_sum += dataset.targets[order[n_left - 1]];
            if n_left < min_samples_leaf || n - n_left < min_samples_leaf {
                continue;
            }
            let (lo, hi) = (x(order[n_left - 1]), x(order[n_left]));
            if lo == hi {
                continue;
            }

            let right_sum = total - left_sum;
            let score = left_sum * left_sum / n_left as f64
                + right_sum * right_sum / (n - n_left) as f64;
            if score <= parent_score + 1e-12 {
                continue;
            }
            if best.as_ref().is_none_or(|(s, _)| score > *s) {
                best = Some((
                    score,
                    BestSplit {
                        feature,
                        threshold: lo + (hi - lo) / 2.0,
                        n_left,
                    },
                ));
            }
        }
    }

    best.map(|(_, split)| split)
}

// ============================================================================
// Forest
// ============================================================================

/// Bagged regression trees; the prediction is the mean over trees.
#[derive(Debug, Clone)]
pub struct RandomForest {
    pub params: ForestParams,
    trees: Vec<Node>,
}

impl RandomForest {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
        }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Depth of the deepest tree
    pub fn depth(&self) -> usize {
        self.trees.iter().map(Node::depth).max().unwrap_or(0)
    }
}

impl Regressor for RandomForest {
    fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        let params = self.params;
        if dataset.is_empty() {
            return Err(ModelError::NotEnoughRows {
                needed: 1,
                available: 0,
            });
        }
        if params.n_estimators == 0 || params.min_samples_leaf == 0 {
            return Err(ModelError::Degenerate(
                "n_estimators and min_samples_leaf must be positive".into(),
            ));
        }

        let n = dataset.n_cases;
        let mut rng = StdRng::seed_from_u64(params.seed);
        self.trees = (0..params.n_estimators)
            .map(|_| {
                let mut sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                grow(dataset, &mut sample, 0, params.max_depth, params.min_samples_leaf)
            })
            .collect();

        debug!(
            trees = self.trees.len(),
            depth = self.depth(),
            cases = n,
            "random forest fitted"
        );
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return f64::NAN;
        }
        self.trees.iter().map(|t| t.predict(row)).sum::<f64>() / self.trees.len() as f64
    }
}
