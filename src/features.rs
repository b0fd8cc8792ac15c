//! Feature set and preference vectors.
//!
//! A [`FeatureSet`] fixes the identity and order of every numeric dimension.
//! Catalog records and query vectors are both laid out in this order, and the
//! feature names double as the catalog's column headers.

use crate::error::{BookmatchError, Result};
use serde::{Deserialize, Serialize};

/// Name of the fiction rating feature.
pub const FICTION: &str = "Fiction";
/// Name of the mystery rating feature.
pub const MYSTERY: &str = "Mystery";
/// Name of the sci-fi rating feature.
pub const SCIFI: &str = "SciFi";
/// Name of the romance rating feature.
pub const ROMANCE: &str = "Romance";
/// Name of the reader age feature.
pub const AGE: &str = "Age";
/// Name of the mood level feature.
pub const MOOD: &str = "Mood";
/// Name of the non-fiction rating feature.
pub const NON_FICTION: &str = "NonFiction";

/// One named numeric dimension with inclusive bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// Feature name, also the catalog column header
    pub name: String,
    /// Inclusive lower bound for query values
    pub min: f32,
    /// Inclusive upper bound for query values
    pub max: f32,
}

impl FeatureSpec {
    /// Creates a feature with the given bounds.
    pub fn new(name: impl Into<String>, min: f32, max: f32) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// A 1-10 rating feature.
    pub fn rating(name: impl Into<String>) -> Self {
        Self::new(name, 1.0, 10.0)
    }

    /// Whether `value` is finite and within bounds.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Ordered, named list of numeric dimensions.
///
/// # Examples
///
/// ```
/// use bookmatch::features::FeatureSet;
///
/// let features = FeatureSet::default();
/// assert_eq!(features.len(), 7);
/// assert_eq!(features.index_of("Age"), Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet {
    specs: Vec<FeatureSpec>,
}

impl FeatureSet {
    /// Builds a feature set, rejecting empty, duplicate or inverted specs.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::InvalidConfig`] when the set is empty, a
    /// name is blank or repeated, or a bound pair is inverted.
    pub fn new(specs: Vec<FeatureSpec>) -> Result<Self> {
        let set = Self { specs };
        set.validate()?;
        Ok(set)
    }

    /// Checks the invariants enforced by [`FeatureSet::new`].
    ///
    /// Deserialized sets bypass the constructor, so configuration loading
    /// calls this explicitly.
    ///
    /// # Errors
    ///
    /// See [`FeatureSet::new`].
    pub fn validate(&self) -> Result<()> {
        if self.specs.is_empty() {
            return Err(BookmatchError::invalid_config(
                "feature set must have at least one feature",
            ));
        }
        for (i, spec) in self.specs.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(BookmatchError::invalid_config(format!(
                    "feature {i} has an empty name"
                )));
            }
            if !(spec.min.is_finite() && spec.max.is_finite()) || spec.min > spec.max {
                return Err(BookmatchError::invalid_config(format!(
                    "feature {} has invalid bounds {}..={}",
                    spec.name, spec.min, spec.max
                )));
            }
            if self.specs[..i].iter().any(|s| s.name == spec.name) {
                return Err(BookmatchError::invalid_config(format!(
                    "duplicate feature name: {}",
                    spec.name
                )));
            }
        }
        Ok(())
    }

    /// Number of dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the set has no dimensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Position of the named feature.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.name == name)
    }

    /// Feature names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.name.as_str())
    }

    /// Feature specs in order.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureSpec> {
        self.specs.iter()
    }
}

impl Default for FeatureSet {
    /// Fiction, Mystery, SciFi, Romance, Age, Mood, NonFiction.
    fn default() -> Self {
        Self {
            specs: vec![
                FeatureSpec::rating(FICTION),
                FeatureSpec::rating(MYSTERY),
                FeatureSpec::rating(SCIFI),
                FeatureSpec::rating(ROMANCE),
                FeatureSpec::new(AGE, 5.0, 100.0),
                FeatureSpec::rating(MOOD),
                FeatureSpec::rating(NON_FICTION),
            ],
        }
    }
}

/// A single query: one value per feature, in feature-set order.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceVector {
    values: Vec<f32>,
}

impl PreferenceVector {
    /// Wraps raw values. Shape and bounds are checked by [`Self::validate`].
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Builds a vector from a slice.
    pub fn from_slice(values: &[f32]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in feature-set order.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Checks the dimension count against the feature set.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::DimensionMismatch`] on a length mismatch.
    pub fn check_dimensions(&self, features: &FeatureSet) -> Result<()> {
        if self.values.len() != features.len() {
            return Err(BookmatchError::DimensionMismatch {
                expected: features.len(),
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    /// Checks dimension count, then every value against its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::DimensionMismatch`] on a length mismatch and
    /// [`BookmatchError::OutOfRange`] for the first value outside its bounds.
    pub fn validate(&self, features: &FeatureSet) -> Result<()> {
        self.check_dimensions(features)?;
        for (spec, &value) in features.iter().zip(&self.values) {
            if !spec.contains(value) {
                return Err(BookmatchError::OutOfRange {
                    feature: spec.name.clone(),
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<f32>> for PreferenceVector {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}
