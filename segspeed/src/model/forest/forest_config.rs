use super::ForestError;
use serde::{Deserialize, Serialize};

/// random forest hyperparameters. unset fields fall back to the defaults below.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ForestConfig {
    /// number of trees in the ensemble
    pub tree_count: usize,
    /// maximum tree depth, unbounded when absent
    pub max_depth: Option<usize>,
    /// minimum samples at a node for it to be split
    pub min_samples_split: usize,
    /// minimum samples on each side of a split
    pub min_samples_leaf: usize,
    /// features considered at each split, all when absent
    pub max_features: Option<usize>,
    /// fit each tree on a bootstrap resample of the training set
    pub bootstrap: bool,
    /// seed from which every tree derives its own random stream
    pub seed: u64,
    /// fit trees on the rayon thread pool. does not change the result.
    pub parallelize: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
            parallelize: false,
        }
    }
}

impl ForestConfig {
    pub fn validate(&self) -> Result<(), ForestError> {
        if self.tree_count == 0 {
            return Err(ForestError::InvalidConfiguration(String::from(
                "tree_count must be at least 1",
            )));
        }
        if self.max_depth == Some(0) {
            return Err(ForestError::InvalidConfiguration(String::from(
                "max_depth must be at least 1",
            )));
        }
        if self.min_samples_split < 2 {
            return Err(ForestError::InvalidConfiguration(format!(
                "min_samples_split must be at least 2, found {}",
                self.min_samples_split
            )));
        }
        if self.min_samples_leaf < 1 {
            return Err(ForestError::InvalidConfiguration(String::from(
                "min_samples_leaf must be at least 1",
            )));
        }
        if self.max_features == Some(0) {
            return Err(ForestError::InvalidConfiguration(String::from(
                "max_features must be at least 1",
            )));
        }
        Ok(())
    }
}
