use super::{split_ops, ForestConfig, TreeNode};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// a CART regression tree stored as a flat node list rooted at index 0. every split
/// references children at larger indices, which [`RegressionTree::try_from`] enforces
/// for deserialized trees so that prediction always terminates.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "Vec<TreeNode>", into = "Vec<TreeNode>")]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// grows a tree over the rows of `x` named by `sample`. rows may repeat when the
    /// sample is a bootstrap draw. nodes are expanded depth-first with an explicit stack.
    ///
    /// a node becomes a leaf when it reaches `max_depth`, holds fewer than
    /// `min_samples_split` rows, has constant targets, or no split improves on it.
    pub fn fit<const F: usize, R: Rng>(
        x: &[[f64; F]],
        y: &[f64],
        sample: Vec<usize>,
        config: &ForestConfig,
        rng: &mut R,
    ) -> RegressionTree {
        let mut nodes = vec![TreeNode::Leaf {
            value: mean(y, &sample),
        }];
        let mut stack = vec![(0, sample, 0)];
        while let Some((node_idx, indices, depth)) = stack.pop() {
            let value = mean(y, &indices);
            nodes[node_idx] = TreeNode::Leaf { value };

            let depth_reached = config.max_depth.is_some_and(|max| depth >= max);
            if depth_reached || indices.len() < config.min_samples_split || is_constant(y, &indices)
            {
                continue;
            }
            let features = candidate_features(F, config.max_features, rng);
            let Some(split) =
                split_ops::best_split(x, y, &indices, &features, config.min_samples_leaf)
            else {
                continue;
            };
            let left = nodes.len();
            let right = left + 1;
            nodes.push(TreeNode::Leaf { value });
            nodes.push(TreeNode::Leaf { value });
            nodes[node_idx] = TreeNode::Split {
                feature: split.feature,
                threshold: split.threshold,
                left,
                right,
            };
            stack.push((right, split.right, depth + 1));
            stack.push((left, split.left, depth + 1));
        }
        RegressionTree { nodes }
    }

    /// walks the tree from the root to a leaf. `row` must hold every feature the tree
    /// splits on, see [`RegressionTree::max_feature`].
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TreeNode::Leaf { .. }))
            .count()
    }

    /// length of the longest root-to-leaf path, counted in edges.
    pub fn depth(&self) -> usize {
        let mut depths = vec![0; self.nodes.len()];
        let mut deepest = 0;
        for (idx, node) in self.nodes.iter().enumerate() {
            deepest = deepest.max(depths[idx]);
            if let TreeNode::Split { left, right, .. } = node {
                depths[*left] = depths[idx] + 1;
                depths[*right] = depths[idx] + 1;
            }
        }
        deepest
    }

    /// largest feature index used by a split, if the tree splits at all.
    pub fn max_feature(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                TreeNode::Split { feature, .. } => Some(*feature),
                TreeNode::Leaf { .. } => None,
            })
            .max()
    }
}

impl TryFrom<Vec<TreeNode>> for RegressionTree {
    type Error = String;

    fn try_from(nodes: Vec<TreeNode>) -> Result<Self, Self::Error> {
        if nodes.is_empty() {
            return Err(String::from("regression tree has no nodes"));
        }
        for (idx, node) in nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(format!("leaf {idx} has non-finite value {value}"));
                }
                TreeNode::Split {
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    if !threshold.is_finite() {
                        return Err(format!("split {idx} has non-finite threshold"));
                    }
                    let in_range = |child: usize| child > idx && child < nodes.len();
                    if !in_range(*left) || !in_range(*right) {
                        return Err(format!(
                            "split {idx} references children {left} and {right} outside of ({idx}, {})",
                            nodes.len()
                        ));
                    }
                }
                TreeNode::Leaf { .. } => {}
            }
        }
        Ok(RegressionTree { nodes })
    }
}

impl From<RegressionTree> for Vec<TreeNode> {
    fn from(tree: RegressionTree) -> Self {
        tree.nodes
    }
}

fn mean(y: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|i| y[*i]).sum::<f64>() / indices.len() as f64
}

fn is_constant(y: &[f64], indices: &[usize]) -> bool {
    match indices.first() {
        None => true,
        Some(first) => indices.iter().all(|i| y[*i] == y[*first]),
    }
}

fn candidate_features<R: Rng>(
    feature_count: usize,
    max_features: Option<usize>,
    rng: &mut R,
) -> Vec<usize> {
    match max_features {
        Some(k) if k < feature_count => {
            let mut features = rand::seq::index::sample(rng, feature_count, k).into_vec();
            features.sort_unstable();
            features
        }
        _ => (0..feature_count).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn step_data() -> (Vec<[f64; 2]>, Vec<f64>) {
        let mut x = vec![];
        let mut y = vec![];
        for code in 0..2 {
            for hour in 0..24 {
                x.push([code as f64, hour as f64]);
                y.push(if (7..=9).contains(&hour) { 18.0 } else { 50.0 } - code as f64);
            }
        }
        (x, y)
    }

    #[test]
    fn test_fits_training_data_exactly_when_unbounded() {
        let (x, y) = step_data();
        let config = ForestConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tree = RegressionTree::fit(&x, &y, (0..x.len()).collect(), &config, &mut rng);
        for (row, target) in x.iter().zip(y.iter()) {
            assert_eq!(tree.predict(row), *target);
        }
        assert_eq!(tree.max_feature(), Some(1));
    }

    #[test]
    fn test_max_depth_limits_tree() {
        let (x, y) = step_data();
        let config = ForestConfig {
            max_depth: Some(1),
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tree = RegressionTree::fit(&x, &y, (0..x.len()).collect(), &config, &mut rng);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn test_constant_targets_give_single_leaf() {
        let x = vec![[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]];
        let y = vec![30.0, 30.0, 30.0];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tree =
            RegressionTree::fit(&x, &y, vec![0, 1, 2], &ForestConfig::default(), &mut rng);
        assert_eq!(tree.nodes(), &[TreeNode::Leaf { value: 30.0 }]);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_rejects_cyclic_nodes() {
        let nodes = vec![
            TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 1,
            },
            TreeNode::Leaf { value: 1.0 },
        ];
        assert!(RegressionTree::try_from(nodes).is_err());
        assert!(RegressionTree::try_from(vec![]).is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_predictions() {
        let (x, y) = step_data();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let tree = RegressionTree::fit(
            &x,
            &y,
            (0..x.len()).collect(),
            &ForestConfig::default(),
            &mut rng,
        );
        let json = serde_json::to_string(&tree).unwrap();
        let loaded: RegressionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, tree);
    }
}
