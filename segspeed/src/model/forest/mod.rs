//! random forest regression: an ensemble of CART trees fitted on bootstrap samples,
//! predicting the mean of the tree outputs.
mod forest_config;
mod forest_error;
mod random_forest;
mod regression_tree;
mod split_ops;
mod tree_node;

pub use forest_config::ForestConfig;
pub use forest_error::ForestError;
pub use random_forest::RandomForest;
pub use regression_tree::RegressionTree;
pub use tree_node::TreeNode;
