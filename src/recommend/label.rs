//! Derived reader labels.

use crate::catalog::Catalog;
use crate::error::{BookmatchError, Result};
use crate::features::FICTION;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Coarse reader category predicted by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLabel(String);

impl CategoryLabel {
    /// Wraps a label string.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Threshold rule deriving a training label from one feature.
///
/// `label = above if value > threshold else otherwise`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelRule {
    /// Feature the rule reads
    pub feature: String,
    /// Values strictly above this get `above`
    pub threshold: f32,
    /// Label for values above the threshold
    pub above: String,
    /// Label for every other value
    pub otherwise: String,
}

impl Default for LabelRule {
    fn default() -> Self {
        Self {
            feature: FICTION.to_string(),
            threshold: 6.0,
            above: "Fiction Lover".to_string(),
            otherwise: "Balanced Reader".to_string(),
        }
    }
}

impl LabelRule {
    /// Label for a single feature value.
    #[must_use]
    pub fn label_for(&self, value: f32) -> CategoryLabel {
        if value > self.threshold {
            CategoryLabel::new(self.above.as_str())
        } else {
            CategoryLabel::new(self.otherwise.as_str())
        }
    }

    /// Labels for every record, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::InvalidConfig`] if the rule's feature is not
    /// part of the catalog's feature set.
    pub fn derive_labels(&self, catalog: &Catalog) -> Result<Vec<CategoryLabel>> {
        let idx = catalog.features().index_of(&self.feature).ok_or_else(|| {
            BookmatchError::invalid_config(format!(
                "label rule feature {} is not in the catalog's feature set",
                self.feature
            ))
        })?;
        Ok(catalog
            .iter()
            .map(|record| self.label_for(record.features[idx]))
            .collect())
    }
}

/// Maps labels to dense class indices in order of first appearance.
#[derive(Debug, Clone, Default)]
pub(crate) struct LabelEncoder {
    classes: Vec<CategoryLabel>,
}

impl LabelEncoder {
    /// Encodes `labels`, returning the encoder and one class index per label.
    pub(crate) fn fit(labels: &[CategoryLabel]) -> (Self, Vec<usize>) {
        let mut index: HashMap<&CategoryLabel, usize> = HashMap::new();
        let mut classes = Vec::new();
        let encoded = labels
            .iter()
            .map(|label| {
                *index.entry(label).or_insert_with(|| {
                    classes.push(label.clone());
                    classes.len() - 1
                })
            })
            .collect();
        (Self { classes }, encoded)
    }

    pub(crate) fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub(crate) fn decode(&self, class: usize) -> Option<&CategoryLabel> {
        self.classes.get(class)
    }
}
