//! Helper functions for tree building.

use super::{Leaf, Node, TreeNode};
use crate::primitives::Matrix;
use std::collections::{BTreeMap, BTreeSet};

/// Stopping parameters threaded through the recursion.
pub(super) struct TreeParams {
    pub(super) max_depth: Option<usize>,
    pub(super) min_samples_split: usize,
}

fn class_counts(labels: &[usize]) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Calculate Gini impurity for a set of labels.
///
/// Formula: Gini = 1 - `Σ(p_i²)` where `p_i` is the proportion of class i
pub(super) fn gini_impurity(labels: &[usize]) -> f32 {
    if labels.is_empty() {
        return 0.0;
    }

    let n = labels.len() as f32;
    let mut gini = 1.0;
    for count in class_counts(labels).values() {
        let p = *count as f32 / n;
        gini -= p * p;
    }
    gini
}

/// Calculate weighted Gini impurity for a split.
pub(super) fn gini_split(left_labels: &[usize], right_labels: &[usize]) -> f32 {
    let n_left = left_labels.len() as f32;
    let n_right = right_labels.len() as f32;
    let n_total = n_left + n_right;

    if n_total == 0.0 {
        return 0.0;
    }

    (n_left / n_total) * gini_impurity(left_labels)
        + (n_right / n_total) * gini_impurity(right_labels)
}

/// Sorted unique values, merging values closer than 1e-10.
pub(super) fn sorted_unique_values(x: &[f32]) -> Vec<f32> {
    let mut sorted = x.to_vec();
    sorted.sort_by(f32::total_cmp);

    let mut unique_values: Vec<f32> = Vec::with_capacity(sorted.len());
    for value in sorted {
        match unique_values.last() {
            Some(&prev) if (value - prev).abs() <= 1e-10 => {}
            _ => unique_values.push(value),
        }
    }
    unique_values
}

/// Split labels into left (<= threshold) and right partitions.
///
/// Returns `None` when either side would be empty.
pub(super) fn split_labels_by_threshold(
    x: &[f32],
    y: &[usize],
    threshold: f32,
) -> Option<(Vec<usize>, Vec<usize>)> {
    let (left, right): (Vec<(f32, usize)>, Vec<(f32, usize)>) = x
        .iter()
        .copied()
        .zip(y.iter().copied())
        .partition(|&(val, _)| val <= threshold);

    if left.is_empty() || right.is_empty() {
        None
    } else {
        Some((
            left.into_iter().map(|(_, l)| l).collect(),
            right.into_iter().map(|(_, l)| l).collect(),
        ))
    }
}

/// Best `(threshold, gain)` for one feature, trying every midpoint between
/// consecutive unique values. `None` when no split improves impurity.
pub(super) fn find_best_split_for_feature(x: &[f32], y: &[usize]) -> Option<(f32, f32)> {
    if x.len() < 2 {
        return None;
    }

    let unique_values = sorted_unique_values(x);
    if unique_values.len() < 2 {
        return None;
    }

    let current_impurity = gini_impurity(y);
    let mut best: Option<(f32, f32)> = None;

    for pair in unique_values.windows(2) {
        let threshold = (pair[0] + pair[1]) / 2.0;
        if let Some((left, right)) = split_labels_by_threshold(x, y, threshold) {
            let gain = current_impurity - gini_split(&left, &right);
            if gain > best.map_or(0.0, |(_, g)| g) {
                best = Some((threshold, gain));
            }
        }
    }

    best
}

/// Best `(feature_idx, threshold, gain)` across all features.
pub(super) fn find_best_split(x: &Matrix<f32>, y: &[usize]) -> Option<(usize, f32, f32)> {
    let (n_samples, n_features) = x.shape();
    if n_samples < 2 {
        return None;
    }

    let mut best: Option<(usize, f32, f32)> = None;
    for feature_idx in 0..n_features {
        let column = x.column(feature_idx);
        if let Some((threshold, gain)) = find_best_split_for_feature(&column, y) {
            if gain > best.map_or(0.0, |(_, _, g)| g) {
                best = Some((feature_idx, threshold, gain));
            }
        }
    }
    best
}

/// Most frequent class; ties go to the smallest class index.
pub(super) fn majority_class(labels: &[usize]) -> usize {
    let mut best = (0, 0);
    for (label, count) in class_counts(labels) {
        if count > best.1 {
            best = (label, count);
        }
    }
    best.0
}

fn leaf(y: &[usize], class_label: usize) -> TreeNode {
    TreeNode::Leaf(Leaf {
        class_label,
        n_samples: y.len(),
    })
}

/// Leaf for this node if a stopping criterion holds.
pub(super) fn check_stopping_criteria(
    y: &[usize],
    depth: usize,
    params: &TreeParams,
) -> Option<TreeNode> {
    let unique_labels: BTreeSet<_> = y.iter().collect();
    if unique_labels.len() == 1 {
        return Some(leaf(y, y[0]));
    }

    let at_max_depth = params.max_depth.is_some_and(|max_d| depth >= max_d);
    if at_max_depth || y.len() < params.min_samples_split {
        return Some(leaf(y, majority_class(y)));
    }

    None
}

/// Row indices on each side of `threshold` for one feature.
pub(super) fn split_indices_by_threshold(
    x: &Matrix<f32>,
    feature_idx: usize,
    threshold: f32,
) -> Option<(Vec<usize>, Vec<usize>)> {
    let (left, right): (Vec<usize>, Vec<usize>) =
        (0..x.n_rows()).partition(|&row| x.get(row, feature_idx) <= threshold);

    if left.is_empty() || right.is_empty() {
        None
    } else {
        Some((left, right))
    }
}

/// Build a decision tree recursively.
pub(super) fn build_tree(
    x: &Matrix<f32>,
    y: &[usize],
    depth: usize,
    params: &TreeParams,
) -> TreeNode {
    if let Some(stop) = check_stopping_criteria(y, depth, params) {
        return stop;
    }

    let Some((feature_idx, threshold, _gain)) = find_best_split(x, y) else {
        return leaf(y, majority_class(y));
    };

    let Some((left_indices, right_indices)) =
        split_indices_by_threshold(x, feature_idx, threshold)
    else {
        return leaf(y, majority_class(y));
    };

    let left_labels: Vec<usize> = left_indices.iter().map(|&i| y[i]).collect();
    let right_labels: Vec<usize> = right_indices.iter().map(|&i| y[i]).collect();

    let left_child = build_tree(&x.select_rows(&left_indices), &left_labels, depth + 1, params);
    let right_child = build_tree(&x.select_rows(&right_indices), &right_labels, depth + 1, params);

    TreeNode::Node(Node {
        feature_idx,
        threshold,
        left: Box::new(left_child),
        right: Box::new(right_child),
    })
}

#[cfg(test)]
#[path = "helpers_tests_gini.rs"]
mod tests;
