//! Decision tree training targets and held-out evaluation.

use super::label::{LabelEncoder, LabelRule};
use crate::catalog::Catalog;
use crate::config::TreeConfig;
use crate::error::{BookmatchError, Result};
use crate::primitives::Matrix;
use crate::tree::DecisionTreeClassifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// What the decision tree learns to predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierTarget {
    /// The label derived by the configured [`LabelRule`]
    Label,
    /// Each record's title as its own class
    Title,
}

impl fmt::Display for ClassifierTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label => write!(f, "label"),
            Self::Title => write!(f, "title"),
        }
    }
}

/// Held-out accuracy of the decision tree on one catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Target the tree was trained on
    pub target: ClassifierTarget,
    /// Fraction of test records predicted correctly
    pub accuracy: f32,
    /// Records used for training
    pub n_train: usize,
    /// Records held out for testing
    pub n_test: usize,
}

/// Encoded training targets for one catalog.
pub(crate) struct TrainingSet {
    pub(crate) x: Matrix<f32>,
    pub(crate) y: Vec<usize>,
    pub(crate) encoder: Option<LabelEncoder>,
}

impl TrainingSet {
    /// Builds features and class indices for `target`.
    pub(crate) fn build(
        catalog: &Catalog,
        target: ClassifierTarget,
        rule: &LabelRule,
    ) -> Result<Self> {
        let x = catalog.feature_matrix();
        match target {
            ClassifierTarget::Label => {
                let labels = rule.derive_labels(catalog)?;
                let (encoder, y) = LabelEncoder::fit(&labels);
                Ok(Self {
                    x,
                    y,
                    encoder: Some(encoder),
                })
            }
            ClassifierTarget::Title => Ok(Self {
                x,
                y: (0..catalog.len()).collect(),
                encoder: None,
            }),
        }
    }
}

/// Refuses training sets a tree cannot meaningfully fit: fewer than two
/// samples or fewer than two distinct classes.
pub(crate) fn ensure_trainable(y: &[usize]) -> Result<()> {
    if y.len() < 2 {
        return Err(BookmatchError::untrainable(format!(
            "need at least 2 records, got {}",
            y.len()
        )));
    }
    let distinct: BTreeSet<_> = y.iter().collect();
    if distinct.len() < 2 {
        return Err(BookmatchError::untrainable(
            "all records share one class",
        ));
    }
    Ok(())
}

/// Fits a tree with the configured hyperparameters.
pub(crate) fn fit_tree(
    x: &Matrix<f32>,
    y: &[usize],
    config: &TreeConfig,
) -> Result<DecisionTreeClassifier> {
    ensure_trainable(y)?;
    let mut tree = DecisionTreeClassifier::new()
        .with_optional_max_depth(config.max_depth)
        .with_min_samples_split(config.min_samples_split);
    tree.fit(x, y)?;
    Ok(tree)
}
