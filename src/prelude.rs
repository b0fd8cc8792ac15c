//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use bookmatch::prelude::*;
//! ```

pub use crate::catalog::{BookRecord, Catalog, CatalogHandle, CatalogSlot, LinkTable};
pub use crate::config::RecommenderConfig;
pub use crate::error::{BookmatchError, Result};
pub use crate::features::{FeatureSet, FeatureSpec, PreferenceVector};
pub use crate::primitives::Matrix;
pub use crate::recommend::{
    CategoryLabel, ClassifierTarget, EvaluationReport, LabelRule, RankedBook, RankedResult,
    Recommender,
};
pub use crate::tree::DecisionTreeClassifier;
