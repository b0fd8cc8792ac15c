//! Error types for bookmatch-cli

use bookmatch::BookmatchError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Bad command-line input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Catalog or link table could not be loaded
    #[error("{0}")]
    DataLoad(BookmatchError),

    /// Configuration rejected
    #[error("{0}")]
    Config(BookmatchError),

    /// Query rejected by the recommender
    #[error("{0}")]
    Query(BookmatchError),

    /// Classifier could not be trained or evaluated
    #[error("{0}")]
    Model(BookmatchError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidArgument(_) => ExitCode::from(2),
            Self::FileNotFound(_) => ExitCode::from(3),
            Self::DataLoad(_) => ExitCode::from(4),
            Self::Config(_) => ExitCode::from(5),
            Self::Query(_) => ExitCode::from(6),
            Self::Model(_) => ExitCode::from(7),
            Self::Io(_) => ExitCode::from(8),
            Self::Json(_) => ExitCode::from(1),
        }
    }
}

impl From<BookmatchError> for CliError {
    fn from(e: BookmatchError) -> Self {
        match e {
            BookmatchError::DataLoad { .. } => Self::DataLoad(e),
            BookmatchError::InvalidConfig { .. } => Self::Config(e),
            BookmatchError::DimensionMismatch { .. }
            | BookmatchError::OutOfRange { .. }
            | BookmatchError::EmptyCatalog => Self::Query(e),
            BookmatchError::Untrainable { .. } | BookmatchError::NotFitted => Self::Model(e),
            BookmatchError::Io(io) => Self::Io(io),
        }
    }
}
