use serde::{Deserialize, Serialize};

/// a node of a fitted regression tree. children are indices into the tree's node list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TreeNode {
    /// rows with `row[feature] <= threshold` go left, all others go right
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}
