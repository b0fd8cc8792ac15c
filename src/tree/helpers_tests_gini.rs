use super::*;

// ========================================================================
// Gini Impurity Tests
// ========================================================================

#[test]
fn test_gini_impurity_empty() {
    assert!((gini_impurity(&[]) - 0.0).abs() < 1e-7);
}

#[test]
fn test_gini_impurity_pure_single_class() {
    // All same class -> Gini = 0
    let labels = vec![0, 0, 0, 0];
    assert!((gini_impurity(&labels) - 0.0).abs() < 1e-7);
}

#[test]
fn test_gini_impurity_two_classes_balanced() {
    // 50/50 split -> Gini = 0.5
    let labels = vec![0, 1, 0, 1];
    assert!((gini_impurity(&labels) - 0.5).abs() < 1e-7);
}

#[test]
fn test_gini_impurity_two_classes_unbalanced() {
    // 1 - (0.75^2 + 0.25^2) = 0.375
    let labels = vec![0, 0, 0, 1];
    assert!((gini_impurity(&labels) - 0.375).abs() < 1e-7);
}

#[test]
fn test_gini_split_perfect() {
    assert!((gini_split(&[0, 0], &[1, 1]) - 0.0).abs() < 1e-7);
}

#[test]
fn test_gini_split_weighted() {
    // left pure (2 of 4), right 50/50 (2 of 4) -> 0.5 * 0 + 0.5 * 0.5
    assert!((gini_split(&[0, 0], &[0, 1]) - 0.25).abs() < 1e-7);
}

// ========================================================================
// Split Search Tests
// ========================================================================

#[test]
fn test_sorted_unique_values() {
    assert_eq!(sorted_unique_values(&[3.0, 1.0, 3.0, 2.0, 1.0]), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_split_labels_by_threshold() {
    let (left, right) =
        split_labels_by_threshold(&[1.0, 5.0, 2.0, 8.0], &[0, 1, 0, 1], 3.0).expect("valid split");
    assert_eq!(left, vec![0, 0]);
    assert_eq!(right, vec![1, 1]);
}

#[test]
fn test_split_labels_one_sided_is_none() {
    assert!(split_labels_by_threshold(&[1.0, 2.0], &[0, 1], 10.0).is_none());
}

#[test]
fn test_best_split_for_feature_midpoint() {
    let (threshold, gain) =
        find_best_split_for_feature(&[2.0, 2.0, 8.0], &[1, 1, 0]).expect("separable");
    assert!((threshold - 5.0).abs() < 1e-6);
    assert!(gain > 0.0);
}

#[test]
fn test_best_split_for_constant_feature_is_none() {
    assert!(find_best_split_for_feature(&[4.0, 4.0, 4.0], &[0, 1, 0]).is_none());
}

#[test]
fn test_best_split_prefers_first_feature_on_tie() {
    // Both columns separate the classes perfectly.
    let x = Matrix::from_vec(4, 2, vec![0.0, 10.0, 0.0, 10.0, 1.0, 20.0, 1.0, 20.0])
        .expect("valid matrix");
    let (feature, threshold, _) = find_best_split(&x, &[0, 0, 1, 1]).expect("split exists");
    assert_eq!(feature, 0);
    assert!((threshold - 0.5).abs() < 1e-6);
}

#[test]
fn test_majority_class_tie_goes_to_smallest() {
    assert_eq!(majority_class(&[2, 1, 2, 1]), 1);
    assert_eq!(majority_class(&[3, 3, 0]), 3);
}

#[test]
fn test_stopping_on_min_samples_split() {
    let params = TreeParams {
        max_depth: None,
        min_samples_split: 5,
    };
    let stop = check_stopping_criteria(&[0, 1, 1], 0, &params);
    assert!(matches!(
        stop,
        Some(TreeNode::Leaf(Leaf {
            class_label: 1,
            n_samples: 3
        }))
    ));
}
