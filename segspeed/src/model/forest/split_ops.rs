/// a chosen split of the samples at a tree node.
pub(crate) struct Split {
    pub feature: usize,
    pub threshold: f64,
    pub left: Vec<usize>,
    pub right: Vec<usize>,
}

/// finds the split among the candidate features that most reduces the squared error of
/// the node. thresholds lie halfway between adjacent distinct feature values. ties keep
/// the first split found, so the result only depends on the inputs.
///
/// maximizing `sum_l^2 / n_l + sum_r^2 / n_r` is equivalent to minimizing the summed
/// squared error of both children.
///
/// # Returns
///
/// * `None` when no split leaves `min_samples_leaf` rows on each side or no split
///   improves on the parent
pub(crate) fn best_split<const F: usize>(
    x: &[[f64; F]],
    y: &[f64],
    indices: &[usize],
    features: &[usize],
    min_samples_leaf: usize,
) -> Option<Split> {
    let n = indices.len();
    if n < 2 * min_samples_leaf.max(1) {
        return None;
    }
    let total: f64 = indices.iter().map(|i| y[*i]).sum();
    let parent_score = total * total / n as f64;

    let mut best: Option<(usize, f64, f64)> = None;
    for &feature in features.iter() {
        let mut sorted = indices.to_vec();
        sorted.sort_by(|a, b| x[*a][feature].total_cmp(&x[*b][feature]));
        let mut left_sum = 0.0;
        for pos in 1..n {
            left_sum += y[sorted[pos - 1]];
            if pos < min_samples_leaf || n - pos < min_samples_leaf {
                continue;
            }
            let lo = x[sorted[pos - 1]][feature];
            let hi = x[sorted[pos]][feature];
            if lo >= hi {
                continue;
            }
            let right_sum = total - left_sum;
            let score =
                left_sum * left_sum / pos as f64 + right_sum * right_sum / (n - pos) as f64;
            let improves = match best {
                None => true,
                Some((_, _, best_score)) => score > best_score,
            };
            if improves {
                best = Some((feature, lo + (hi - lo) / 2.0, score));
            }
        }
    }

    let (feature, threshold, score) = best?;
    let tolerance = 1e-9 * parent_score.abs().max(1.0);
    if score <= parent_score + tolerance {
        return None;
    }
    let (left, right): (Vec<usize>, Vec<usize>) =
        indices.iter().partition(|i| x[**i][feature] <= threshold);
    Some(Split {
        feature,
        threshold,
        left,
        right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_informative_feature() {
        // feature 0 is noise, feature 1 separates low from high targets
        let x = [[0.0, 1.0], [1.0, 2.0], [0.0, 8.0], [1.0, 9.0]];
        let y = [50.0, 50.0, 18.0, 18.0];
        let split = best_split(&x, &y, &[0, 1, 2, 3], &[0, 1], 1).unwrap();
        assert_eq!(split.feature, 1);
        assert_eq!(split.threshold, 5.0);
        assert_eq!(split.left, vec![0, 1]);
        assert_eq!(split.right, vec![2, 3]);
    }

    #[test]
    fn test_respects_min_samples_leaf() {
        let x = [[0.0], [1.0], [2.0], [3.0]];
        let y = [10.0, 20.0, 20.0, 20.0];
        let split = best_split(&x, &y, &[0, 1, 2, 3], &[0], 2).unwrap();
        assert_eq!(split.left.len(), 2);
        assert_eq!(split.right.len(), 2);
        assert!(best_split(&x, &y, &[0, 1, 2, 3], &[0], 3).is_none());
    }

    #[test]
    fn test_no_split_for_constant_features_or_targets() {
        let x = [[4.0], [4.0], [4.0]];
        let y = [1.0, 2.0, 3.0];
        assert!(best_split(&x, &y, &[0, 1, 2], &[0], 1).is_none());
        let x = [[1.0], [2.0], [3.0]];
        let y = [7.0, 7.0, 7.0];
        assert!(best_split(&x, &y, &[0, 1, 2], &[0], 1).is_none());
    }

    #[test]
    fn test_duplicate_rows_from_bootstrap() {
        let x = [[0.0], [5.0]];
        let y = [1.0, 9.0];
        let split = best_split(&x, &y, &[0, 0, 1, 1, 1], &[0], 1).unwrap();
        assert_eq!(split.left, vec![0, 0]);
        assert_eq!(split.right, vec![1, 1, 1]);
    }
}
