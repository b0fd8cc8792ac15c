//! Error types for bookmatch operations.
//!
//! Every failure the core can produce is a distinct variant so the
//! presentation layer can decide how to word it.

use thiserror::Error;

/// Main error type for bookmatch operations.
///
/// # Examples
///
/// ```
/// use bookmatch::error::BookmatchError;
///
/// let err = BookmatchError::DimensionMismatch {
///     expected: 7,
///     actual: 6,
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Error, Debug)]
pub enum BookmatchError {
    /// Catalog source is unreadable, malformed, or missing required columns.
    #[error("data load error: {message}")]
    DataLoad {
        /// What went wrong, including the line when known
        message: String,
    },

    /// Query vector length does not match the feature set.
    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch {
        /// Number of features in the feature set
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// The catalog holds no records.
    #[error("catalog is empty")]
    EmptyCatalog,

    /// The classifier cannot be fit on the given catalog.
    #[error("classifier cannot be trained: {reason}")]
    Untrainable {
        /// Why training was refused
        reason: String,
    },

    /// A query value lies outside the documented bounds of its feature.
    #[error("value out of range: {feature} = {value}, expected {min}..={max}")]
    OutOfRange {
        /// Feature name
        feature: String,
        /// Supplied value
        value: f32,
        /// Inclusive lower bound
        min: f32,
        /// Inclusive upper bound
        max: f32,
    },

    /// A model was used for prediction before `fit`.
    #[error("model not fitted: call fit() first")]
    NotFitted,

    /// Configuration failed validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Constraint that was violated
        message: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BookmatchError {
    /// Create a data load error from anything displayable.
    #[must_use]
    pub fn data_load(message: impl Into<String>) -> Self {
        Self::DataLoad {
            message: message.into(),
        }
    }

    /// Create a data load error pinned to a source line.
    #[must_use]
    pub fn data_load_at(line: u64, message: impl std::fmt::Display) -> Self {
        Self::DataLoad {
            message: format!("line {line}: {message}"),
        }
    }

    /// Create an untrainable error.
    #[must_use]
    pub fn untrainable(reason: impl Into<String>) -> Self {
        Self::Untrainable {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, BookmatchError>;
