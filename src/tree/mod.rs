//! Decision tree classifier.
//!
//! CART (Classification and Regression Trees) using Gini impurity. Class
//! labels are dense `usize` indices; callers map their own labels onto them.
//!
//! # Example
//!
//! ```
//! use bookmatch::primitives::Matrix;
//! use bookmatch::tree::DecisionTreeClassifier;
//!
//! // Training data (simple 2D binary classification)
//! let x = Matrix::from_vec(4, 2, vec![
//!     0.0, 0.0,  // class 0
//!     0.0, 1.0,  // class 0
//!     5.0, 0.0,  // class 1
//!     5.0, 1.0,  // class 1
//! ]).expect("4x2 matrix");
//! let y = vec![0, 0, 1, 1];
//!
//! let mut tree = DecisionTreeClassifier::new().with_max_depth(3);
//! tree.fit(&x, &y).expect("fit should succeed");
//!
//! assert_eq!(tree.predict_one(&[4.0, 0.5]).expect("fitted"), 1);
//! ```

mod helpers;

use crate::error::{BookmatchError, Result};
use crate::primitives::Matrix;
use helpers::{build_tree, TreeParams};
use serde::{Deserialize, Serialize};

/// Internal node in a decision tree.
///
/// Contains a split condition (feature and threshold) and pointers to
/// left and right subtrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f32,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Leaf node in a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    /// Predicted class label for this leaf
    pub class_label: usize,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// A node in a decision tree (either internal node or leaf).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal decision node with split condition
    Node(Node),
    /// Leaf node with class prediction
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth 1 + max(left, right).
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }

    /// Number of leaves under this node.
    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Node(node) => node.left.n_leaves() + node.right.n_leaves(),
        }
    }
}

/// Decision tree classifier using the CART algorithm.
///
/// Uses Gini impurity for splitting criterion and builds trees recursively.
/// Training is deterministic: features are scanned in order, ties keep the
/// first best split, and majority ties resolve to the smallest class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    tree: Option<TreeNode>,
    max_depth: Option<usize>,
    min_samples_split: usize,
    /// Number of features the model was trained on (for validation)
    n_features: Option<usize>,
}

impl DecisionTreeClassifier {
    /// Creates a new decision tree classifier with default parameters.
    pub fn new() -> Self {
        Self {
            tree: None,
            max_depth: None,
            min_samples_split: 2,
            n_features: None,
        }
    }

    /// Sets the maximum depth of the tree.
    ///
    /// # Arguments
    ///
    /// * `depth` - Maximum depth (root has depth 0)
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets or clears the maximum depth.
    pub fn with_optional_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the minimum number of samples required to split an internal node.
    ///
    /// # Arguments
    ///
    /// * `min_samples` - Minimum samples to split (clamped to >= 2)
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples.max(2);
        self
    }

    /// Fits the decision tree to training data.
    ///
    /// # Arguments
    ///
    /// * `x` - Training features (n_samples × n_features)
    /// * `y` - Training labels (n_samples class indices)
    ///
    /// # Errors
    ///
    /// Returns an error if the sample counts disagree or there are no samples.
    pub fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        let (n_rows, n_cols) = x.shape();
        if n_rows != y.len() {
            return Err(BookmatchError::DimensionMismatch {
                expected: n_rows,
                actual: y.len(),
            });
        }
        if n_rows == 0 {
            return Err(BookmatchError::untrainable("cannot fit with zero samples"));
        }

        let params = TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
        };
        let tree = build_tree(x, y, 0, &params);
        tracing::debug!(
            samples = n_rows,
            features = n_cols,
            depth = tree.depth(),
            leaves = tree.n_leaves(),
            "decision tree fitted"
        );

        self.n_features = Some(n_cols);
        self.tree = Some(tree);
        Ok(())
    }

    /// Predicts class labels for samples.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::NotFitted`] before `fit`, and
    /// [`BookmatchError::DimensionMismatch`] if the feature count differs
    /// from the training data.
    pub fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        let expected = self.n_features.ok_or(BookmatchError::NotFitted)?;
        if x.n_cols() != expected {
            return Err(BookmatchError::DimensionMismatch {
                expected,
                actual: x.n_cols(),
            });
        }
        (0..x.n_rows()).map(|row| self.predict_one(x.row(row))).collect()
    }

    /// Predicts the class label for a single sample.
    ///
    /// # Errors
    ///
    /// See [`DecisionTreeClassifier::predict`].
    pub fn predict_one(&self, sample: &[f32]) -> Result<usize> {
        let tree = self.tree.as_ref().ok_or(BookmatchError::NotFitted)?;
        if let Some(expected) = self.n_features {
            if sample.len() != expected {
                return Err(BookmatchError::DimensionMismatch {
                    expected,
                    actual: sample.len(),
                });
            }
        }

        let mut node = tree;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return Ok(leaf.class_label),
                TreeNode::Node(internal) => {
                    if sample[internal.feature_idx] <= internal.threshold {
                        node = &internal.left;
                    } else {
                        node = &internal.right;
                    }
                }
            }
        }
    }

    /// Computes the accuracy score on test data.
    ///
    /// # Errors
    ///
    /// See [`DecisionTreeClassifier::predict`] and [`crate::metrics::accuracy`].
    pub fn score(&self, x: &Matrix<f32>, y: &[usize]) -> Result<f32> {
        let predictions = self.predict(x)?;
        crate::metrics::accuracy(&predictions, y)
    }

    /// Root of the fitted tree.
    #[must_use]
    pub fn root(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    /// Depth of the fitted tree (0 for a single leaf), `None` before `fit`.
    #[must_use]
    pub fn depth(&self) -> Option<usize> {
        self.tree.as_ref().map(TreeNode::depth)
    }

    /// Number of leaves in the fitted tree, `None` before `fit`.
    #[must_use]
    pub fn n_leaves(&self) -> Option<usize> {
        self.tree.as_ref().map(TreeNode::n_leaves)
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}
