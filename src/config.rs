//! Recommender configuration.
//!
//! Everything that varies by deployment: the feature set, the accepted
//! catalog language, column names, the label rule and tree hyperparameters.
//! Every field has a default, so an empty JSON object is a valid config.

use crate::error::{BookmatchError, Result};
use crate::features::FeatureSet;
use crate::recommend::LabelRule;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Ordered feature set shared by catalog and queries
    pub features: FeatureSet,
    /// Catalog loading options
    pub catalog: CatalogConfig,
    /// Rule deriving the classifier's training label
    pub label_rule: LabelRule,
    /// Decision tree hyperparameters
    pub tree: TreeConfig,
    /// Held-out evaluation options
    pub evaluation: EvaluationConfig,
    /// Re-check query values against feature bounds
    pub validate_ranges: bool,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            features: FeatureSet::default(),
            catalog: CatalogConfig::default(),
            label_rule: LabelRule::default(),
            tree: TreeConfig::default(),
            evaluation: EvaluationConfig::default(),
            validate_ranges: true,
        }
    }
}

impl RecommenderConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::InvalidConfig`] for malformed JSON or a
    /// config that fails [`RecommenderConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BookmatchError::invalid_config(format!("malformed JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::DataLoad`] when the file cannot be read,
    /// otherwise as [`RecommenderConfig::from_json_str`].
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            BookmatchError::data_load(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::InvalidConfig`] describing the first
    /// violated constraint.
    pub fn validate(&self) -> Result<()> {
        self.features.validate()?;
        self.catalog.validate()?;
        if self.features.index_of(&self.label_rule.feature).is_none() {
            return Err(BookmatchError::invalid_config(format!(
                "label rule feature {} is not in the feature set",
                self.label_rule.feature
            )));
        }
        if !self.label_rule.threshold.is_finite() {
            return Err(BookmatchError::invalid_config(
                "label rule threshold must be finite",
            ));
        }
        if self.label_rule.above == self.label_rule.otherwise {
            return Err(BookmatchError::invalid_config(
                "label rule must produce two different labels",
            ));
        }
        if self.tree.min_samples_split < 2 {
            return Err(BookmatchError::invalid_config(
                "tree.min_samples_split must be >= 2",
            ));
        }
        let test_size = self.evaluation.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(BookmatchError::invalid_config(format!(
                "evaluation.test_size must be between 0 and 1, got {test_size}"
            )));
        }
        Ok(())
    }
}

/// Catalog loading options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Only rows with exactly this language are kept
    pub accepted_language: String,
    /// Upper bound on retained rows
    pub max_records: usize,
    /// Source column names
    pub columns: CatalogColumns,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            accepted_language: "English".to_string(),
            max_records: 10_000,
            columns: CatalogColumns::default(),
        }
    }
}

impl CatalogConfig {
    fn validate(&self) -> Result<()> {
        if self.max_records == 0 {
            return Err(BookmatchError::invalid_config(
                "catalog.max_records must be positive",
            ));
        }
        let c = &self.columns;
        if [&c.title, &c.language, &c.description, &c.cover_image]
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(BookmatchError::invalid_config(
                "catalog column names cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Column headers in the catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogColumns {
    /// Title column
    pub title: String,
    /// Language column
    pub language: String,
    /// Description column
    pub description: String,
    /// Cover image column (optional in the source)
    pub cover_image: String,
}

impl Default for CatalogColumns {
    fn default() -> Self {
        Self {
            title: "Book".to_string(),
            language: "language".to_string(),
            description: "description".to_string(),
            cover_image: "image_url".to_string(),
        }
    }
}

/// Decision tree hyperparameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Maximum depth, unlimited when absent
    pub max_depth: Option<usize>,
    /// Minimum samples needed to split a node
    pub min_samples_split: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

/// Held-out evaluation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Fraction of records held out for testing
    pub test_size: f32,
    /// Shuffle seed, random when absent
    pub random_state: Option<u64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            random_state: Some(42),
        }
    }
}
