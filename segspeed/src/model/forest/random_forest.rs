use super::{ForestConfig, ForestError, RegressionTree};
use kdam::tqdm;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use segspeed_core::util::fingerprint::mix64;
use serde::{Deserialize, Serialize};

/// an ensemble of regression trees. each tree draws from its own random stream seeded
/// by the forest seed and the tree index, so fitting in parallel or sequentially gives
/// the same forest.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// fits `config.tree_count` trees on rows `x` with targets `y`.
    ///
    /// # Arguments
    ///
    /// * `x` - feature rows
    /// * `y` - regression target of each row
    /// * `config` - forest hyperparameters
    ///
    /// # Returns
    ///
    /// * the fitted forest, or an error if the config or the training set is invalid
    pub fn fit<const F: usize>(
        x: &[[f64; F]],
        y: &[f64],
        config: &ForestConfig,
    ) -> Result<RandomForest, ForestError> {
        config.validate()?;
        if x.len() != y.len() {
            return Err(ForestError::LengthMismatch(x.len(), y.len()));
        }
        if x.is_empty() {
            return Err(ForestError::EmptyTrainingSet);
        }
        if let Some(row) = x
            .iter()
            .zip(y.iter())
            .position(|(r, t)| !t.is_finite() || r.iter().any(|v| !v.is_finite()))
        {
            return Err(ForestError::NonFiniteSample(row));
        }

        log::info!(
            "fitting {} trees on {} samples with {} features",
            config.tree_count,
            x.len(),
            F
        );
        let n = x.len();
        let fit_tree = |tree_idx: usize| {
            let mut rng = ChaCha8Rng::seed_from_u64(tree_seed(config.seed, tree_idx));
            let sample: Vec<usize> = if config.bootstrap {
                (0..n).map(|_| rng.random_range(0..n)).collect()
            } else {
                (0..n).collect()
            };
            RegressionTree::fit(x, y, sample, config, &mut rng)
        };
        let trees: Vec<RegressionTree> = if config.parallelize {
            (0..config.tree_count).into_par_iter().map(fit_tree).collect()
        } else {
            let iter = tqdm!(
                0..config.tree_count,
                total = config.tree_count,
                desc = "fit trees"
            );
            let trees: Vec<RegressionTree> = iter.map(fit_tree).collect();
            eprintln!();
            trees
        };
        Ok(RandomForest { trees })
    }

    /// mean prediction over all trees.
    pub fn predict(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return f64::NAN;
        }
        let total: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        total / self.trees.len() as f64
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// checks that a deserialized forest can score rows of `feature_count` features.
    pub fn validate(&self, feature_count: usize) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err(String::from("forest has no trees"));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            if let Some(feature) = tree.max_feature() {
                if feature >= feature_count {
                    return Err(format!(
                        "tree {idx} splits on feature {feature} but rows have {feature_count} features"
                    ));
                }
            }
        }
        Ok(())
    }
}

fn tree_seed(seed: u64, tree_idx: usize) -> u64 {
    mix64(seed ^ mix64(tree_idx as u64))
}
