//! Preference matching.
//!
//! Two independent views over the same catalog and query:
//!
//! - **Ranking**: every record ordered by Euclidean distance from the query.
//! - **Classification**: a decision tree trained on the full catalog against
//!   a derived label predicts the reader's category.
//!
//! # Quick Start
//!
//! ```
//! use bookmatch::catalog::{BookRecord, Catalog};
//! use bookmatch::config::RecommenderConfig;
//! use bookmatch::features::{FeatureSet, PreferenceVector};
//! use bookmatch::recommend::Recommender;
//!
//! let book = |title: &str, features: [f32; 7]| BookRecord {
//!     title: title.to_string(),
//!     features: features.to_vec(),
//!     language: "English".to_string(),
//!     description: String::new(),
//!     cover_image: String::new(),
//!     external_link: None,
//! };
//! let catalog = Catalog::from_records(
//!     vec![
//!         book("A", [8.0, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0]),
//!         book("B", [2.0, 8.0, 2.0, 2.0, 40.0, 5.0, 2.0]),
//!         book("C", [2.0, 2.0, 8.0, 2.0, 50.0, 3.0, 8.0]),
//!     ],
//!     &FeatureSet::default(),
//! )
//! .expect("valid records");
//!
//! let recommender = Recommender::new(RecommenderConfig::default()).expect("valid config");
//! let query = PreferenceVector::from_slice(&[8.0, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0]);
//!
//! let ranked = recommender.rank(&catalog, &query).expect("ranked");
//! assert_eq!(ranked.best().map(|b| b.record.title.as_str()), Some("A"));
//!
//! let label = recommender.classify(&catalog, &query).expect("classified");
//! assert_eq!(label.as_str(), "Fiction Lover");
//! ```

mod classify;
mod label;
mod ranking;

pub use classify::{ClassifierTarget, EvaluationReport};
pub use label::{CategoryLabel, LabelRule};
pub use ranking::{euclidean_distance, rank, RankedBook, RankedResult};

use crate::catalog::{BookRecord, Catalog};
use crate::config::RecommenderConfig;
use crate::error::{BookmatchError, Result};
use crate::features::PreferenceVector;
use crate::model_selection::train_test_split;
use classify::{ensure_trainable, fit_tree, TrainingSet};

/// Stateless matcher over an externally owned catalog.
///
/// Holds only configuration; every call is a pure function of
/// (config, catalog, query).
#[derive(Debug, Clone)]
pub struct Recommender {
    config: RecommenderConfig,
}

impl Recommender {
    /// Creates a recommender from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::InvalidConfig`] if the configuration fails
    /// validation.
    pub fn new(config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Empty catalog, then dimension, then (optionally) range checks.
    fn check_query(&self, catalog: &Catalog, query: &PreferenceVector) -> Result<()> {
        if catalog.is_empty() {
            return Err(BookmatchError::EmptyCatalog);
        }
        if self.config.validate_ranges {
            query.validate(catalog.features())
        } else {
            query.check_dimensions(catalog.features())
        }
    }

    /// Ranks every catalog record by distance from `query`.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::EmptyCatalog`],
    /// [`BookmatchError::DimensionMismatch`] or, when range validation is
    /// enabled, [`BookmatchError::OutOfRange`].
    pub fn rank<'c>(
        &self,
        catalog: &'c Catalog,
        query: &PreferenceVector,
    ) -> Result<RankedResult<'c>> {
        self.check_query(catalog, query)?;
        rank(catalog, query)
    }

    /// Predicts the reader's category for `query`.
    ///
    /// Labels every record with the configured [`LabelRule`], fits a
    /// decision tree on the whole catalog and classifies the query.
    ///
    /// # Errors
    ///
    /// Query errors as for [`Recommender::rank`], and
    /// [`BookmatchError::Untrainable`] when the catalog has fewer than two
    /// records or fewer than two distinct labels.
    pub fn classify(&self, catalog: &Catalog, query: &PreferenceVector) -> Result<CategoryLabel> {
        self.check_query(catalog, query)?;

        let training =
            TrainingSet::build(catalog, ClassifierTarget::Label, &self.config.label_rule)?;
        let tree = fit_tree(&training.x, &training.y, &self.config.tree)?;
        let class = tree.predict_one(query.as_slice())?;

        let encoder = training
            .encoder
            .as_ref()
            .ok_or_else(|| BookmatchError::untrainable("labels were not encoded"))?;
        let label = encoder
            .decode(class)
            .cloned()
            .ok_or_else(|| BookmatchError::untrainable(format!("unknown class index {class}")))?;

        tracing::debug!(
            label = %label,
            classes = encoder.n_classes(),
            records = catalog.len(),
            "classified query"
        );
        Ok(label)
    }

    /// Predicts a single book by training the tree on titles.
    ///
    /// Every record is its own class, so the tree partitions the catalog
    /// until each title sits in its own leaf.
    ///
    /// # Errors
    ///
    /// Query errors as for [`Recommender::rank`], and
    /// [`BookmatchError::Untrainable`] for catalogs with fewer than two
    /// records.
    pub fn predict_title<'c>(
        &self,
        catalog: &'c Catalog,
        query: &PreferenceVector,
    ) -> Result<&'c BookRecord> {
        self.check_query(catalog, query)?;

        let training =
            TrainingSet::build(catalog, ClassifierTarget::Title, &self.config.label_rule)?;
        let tree = fit_tree(&training.x, &training.y, &self.config.tree)?;
        let class = tree.predict_one(query.as_slice())?;

        let record = catalog
            .get(class)
            .ok_or_else(|| BookmatchError::untrainable(format!("unknown class index {class}")))?;
        tracing::debug!(title = %record.title, "predicted title");
        Ok(record)
    }

    /// Held-out accuracy of the decision tree on `catalog`.
    ///
    /// Splits with the configured `test_size` and `random_state`, fits on
    /// the training part and scores the test part. With
    /// [`ClassifierTarget::Title`] the test titles never occur in training,
    /// so accuracy is 0 by construction.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::EmptyCatalog`] for an empty catalog and
    /// [`BookmatchError::Untrainable`] if a split side would be empty or the
    /// training part holds a single class.
    pub fn evaluate(
        &self,
        catalog: &Catalog,
        target: ClassifierTarget,
    ) -> Result<EvaluationReport> {
        if catalog.is_empty() {
            return Err(BookmatchError::EmptyCatalog);
        }

        let training = TrainingSet::build(catalog, target, &self.config.label_rule)?;
        ensure_trainable(&training.y)?;

        let evaluation = &self.config.evaluation;
        let (x_train, x_test, y_train, y_test) = train_test_split(
            &training.x,
            &training.y,
            evaluation.test_size,
            evaluation.random_state,
        )?;

        let tree = fit_tree(&x_train, &y_train, &self.config.tree)?;
        let accuracy = tree.score(&x_test, &y_test)?;

        let report = EvaluationReport {
            target,
            accuracy,
            n_train: y_train.len(),
            n_test: y_test.len(),
        };
        tracing::info!(
            target = %target,
            accuracy = report.accuracy,
            n_train = report.n_train,
            n_test = report.n_test,
            "evaluated classifier"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests;
