//! Catalog store.
//!
//! Loads the book catalog once, keeps only rows in the accepted language,
//! attaches external links and exposes the result as an immutable, densely
//! indexed sequence of [`BookRecord`]s.
//!
//! # Example
//!
//! ```
//! use bookmatch::catalog::{Catalog, LinkTable};
//! use bookmatch::config::CatalogConfig;
//! use bookmatch::features::FeatureSet;
//!
//! let csv = "\
//! Book,language,description,Fiction,Mystery,SciFi,Romance,Age,Mood,NonFiction
//!  Dune ,English,Desert planet,8,3,9,2,30,6,1
//! Rayuela,Spanish,Hopscotch,7,2,1,6,35,5,1
//! ";
//! let links = LinkTable::from_pairs([("Dune", "https://example.org/dune.pdf")]);
//! let catalog = Catalog::load(
//!     csv.as_bytes(),
//!     &CatalogConfig::default(),
//!     &FeatureSet::default(),
//!     &links,
//! )
//! .expect("valid catalog");
//!
//! assert_eq!(catalog.len(), 1);
//! assert_eq!(catalog.records()[0].title, "Dune");
//! assert_eq!(catalog.records()[0].external_link.as_deref(), Some("https://example.org/dune.pdf"));
//! ```

mod links;
mod slot;

pub use links::LinkTable;
pub use slot::CatalogSlot;

use crate::config::CatalogConfig;
use crate::error::{BookmatchError, Result};
use crate::features::FeatureSet;
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Shared, immutable catalog reference held by the presentation layer.
pub type CatalogHandle = Arc<Catalog>;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Unique title, trimmed
    pub title: String,
    /// Values in feature-set order
    pub features: Vec<f32>,
    /// Source language
    pub language: String,
    /// Display description, passed through untouched
    pub description: String,
    /// Cover image reference, empty when the source has none
    pub cover_image: String,
    /// External link, absent when the title has no mapping entry
    pub external_link: Option<String>,
}

/// Immutable, ordered collection of book records.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    features: FeatureSet,
    records: Vec<BookRecord>,
}

/// Resolved column positions for one source header.
struct ColumnLayout {
    title: usize,
    language: usize,
    description: usize,
    cover_image: Option<usize>,
    features: Vec<usize>,
}

impl ColumnLayout {
    fn resolve(
        headers: &csv::StringRecord,
        config: &CatalogConfig,
        features: &FeatureSet,
    ) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                BookmatchError::data_load(format!(
                    "missing required column '{name}' (available: {:?})",
                    headers.iter().collect::<Vec<_>>()
                ))
            })
        };

        let columns = &config.columns;
        Ok(Self {
            title: require(&columns.title)?,
            language: require(&columns.language)?,
            description: require(&columns.description)?,
            cover_image: find(&columns.cover_image),
            features: features
                .names()
                .map(|name| require(name))
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

fn cell<'r>(record: &'r csv::StringRecord, idx: usize, line: u64) -> Result<&'r str> {
    record
        .get(idx)
        .ok_or_else(|| BookmatchError::data_load_at(line, format!("missing cell {idx}")))
}

impl Catalog {
    /// Loads a catalog from CSV data.
    ///
    /// Rows whose language differs from `config.accepted_language` are
    /// skipped. Retained rows keep their relative order, titles are trimmed
    /// and links are looked up leniently in `links`.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::DataLoad`] if the source cannot be parsed,
    /// lacks a required column, holds a non-numeric or non-finite feature
    /// value, an empty or duplicate title, or more than
    /// `config.max_records` retained rows.
    pub fn load<R: Read>(
        reader: R,
        config: &CatalogConfig,
        features: &FeatureSet,
        links: &LinkTable,
    ) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| BookmatchError::data_load(format!("failed to read header: {e}")))?
            .clone();
        let layout = ColumnLayout::resolve(&headers, config, features)?;

        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut skipped = 0_usize;

        for row in reader.records() {
            let row = row.map_err(|e| BookmatchError::data_load(format!("malformed row: {e}")))?;
            let line = row.position().map_or(0, csv::Position::line);

            let language = cell(&row, layout.language, line)?;
            if language != config.accepted_language {
                skipped += 1;
                continue;
            }

            let title = cell(&row, layout.title, line)?.trim();
            if title.is_empty() {
                tracing::warn!(line, "rejecting row with empty title");
                return Err(BookmatchError::data_load_at(line, "empty title"));
            }
            if !seen.insert(title.to_string()) {
                tracing::warn!(line, title, "rejecting duplicate title");
                return Err(BookmatchError::data_load_at(
                    line,
                    format!("duplicate title '{title}'"),
                ));
            }

            let mut values = Vec::with_capacity(layout.features.len());
            for (name, &idx) in features.names().zip(&layout.features) {
                let raw = cell(&row, idx, line)?.trim();
                let value = raw
                    .parse::<f32>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        tracing::warn!(line, feature = name, raw, "rejecting non-numeric feature");
                        BookmatchError::data_load_at(
                            line,
                            format!("feature '{name}' has non-numeric value '{raw}'"),
                        )
                    })?;
                values.push(value);
            }

            let cover_image = match layout.cover_image {
                Some(idx) => cell(&row, idx, line)?.to_string(),
                None => String::new(),
            };

            records.push(BookRecord {
                title: title.to_string(),
                features: values,
                language: language.to_string(),
                description: cell(&row, layout.description, line)?.to_string(),
                cover_image,
                external_link: links.get(title).map(str::to_string),
            });

            if records.len() > config.max_records {
                return Err(BookmatchError::data_load(format!(
                    "catalog exceeds max_records = {}",
                    config.max_records
                )));
            }
        }

        tracing::debug!(
            skipped,
            language = %config.accepted_language,
            "skipped rows in other languages"
        );
        if records.is_empty() {
            tracing::warn!("catalog loaded with zero records");
        }
        tracing::info!(records = records.len(), "catalog loaded");

        Ok(Self {
            features: features.clone(),
            records,
        })
    }

    /// Loads a catalog from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::DataLoad`] if the file cannot be opened,
    /// otherwise as [`Catalog::load`].
    pub fn load_path<P: AsRef<Path>>(
        path: P,
        config: &CatalogConfig,
        features: &FeatureSet,
        links: &LinkTable,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            BookmatchError::data_load(format!("cannot open {}: {e}", path.display()))
        })?;
        Self::load(std::io::BufReader::new(file), config, features, links)
    }

    /// Builds a catalog from records assembled by the caller.
    ///
    /// Titles are trimmed, as in [`Catalog::load`].
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::DataLoad`] if a record's vector length
    /// differs from the feature set, a feature value is not finite, or a
    /// title is empty or repeated after trimming.
    pub fn from_records(mut records: Vec<BookRecord>, features: &FeatureSet) -> Result<Self> {
        let mut seen = HashSet::new();
        for (i, record) in records.iter_mut().enumerate() {
            if record.features.len() != features.len() {
                return Err(BookmatchError::data_load(format!(
                    "record {i} has {} features, expected {}",
                    record.features.len(),
                    features.len()
                )));
            }
            if let Some((name, value)) = features
                .names()
                .zip(&record.features)
                .find(|(_, v)| !v.is_finite())
            {
                return Err(BookmatchError::data_load(format!(
                    "record {i} has non-finite value {value} for feature '{name}'"
                )));
            }

            let trimmed = record.title.trim();
            if trimmed.is_empty() {
                return Err(BookmatchError::data_load(format!("record {i} has an empty title")));
            }
            if trimmed.len() != record.title.len() {
                record.title = trimmed.to_string();
            }
            if !seen.insert(record.title.clone()) {
                return Err(BookmatchError::data_load(format!(
                    "duplicate title '{}'",
                    record.title
                )));
            }
        }
        Ok(Self {
            features: features.clone(),
            records,
        })
    }

    /// Wraps the catalog in a shareable handle.
    #[must_use]
    pub fn into_handle(self) -> CatalogHandle {
        Arc::new(self)
    }

    /// Feature set the records are laid out in.
    #[must_use]
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in catalog order.
    #[must_use]
    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    /// Record at `idx`.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&BookRecord> {
        self.records.get(idx)
    }

    /// Record with the given title.
    #[must_use]
    pub fn find(&self, title: &str) -> Option<&BookRecord> {
        self.records.iter().find(|r| r.title == title)
    }

    /// Iterates records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &BookRecord> {
        self.records.iter()
    }

    /// Feature vectors stacked into an (n_records × n_features) matrix.
    #[must_use]
    pub fn feature_matrix(&self) -> Matrix<f32> {
        let rows: Vec<&[f32]> = self.records.iter().map(|r| r.features.as_slice()).collect();
        Matrix::from_rows(&rows, self.features.len())
            .expect("Internal error: record lengths are checked at construction")
    }
}

#[cfg(test)]
mod tests;
