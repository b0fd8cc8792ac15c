//! Fixed title-to-link mapping.

use crate::error::{BookmatchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Maps book titles to external links (e.g. a PDF URL).
///
/// Lookups are lenient: a title without an entry yields `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkTable {
    links: BTreeMap<String, String>,
}

impl LinkTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(title, link)` pairs. Titles are trimmed.
    pub fn from_pairs<I, T, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, L)>,
        T: Into<String>,
        L: Into<String>,
    {
        let mut table = Self::new();
        for (title, link) in pairs {
            table.insert(title, link);
        }
        table
    }

    /// Parses a JSON object of `"title": "link"` entries.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::DataLoad`] for anything but a flat object
    /// of strings.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)
            .map_err(|e| BookmatchError::data_load(format!("invalid link table: {e}")))?;
        Ok(Self::from_pairs(raw))
    }

    /// Reads a JSON link table from disk.
    ///
    /// # Errors
    ///
    /// Returns [`BookmatchError::DataLoad`] if the file cannot be read or
    /// parsed.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            BookmatchError::data_load(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, title: impl Into<String>, link: impl Into<String>) {
        let title: String = title.into();
        self.links.insert(title.trim().to_string(), link.into());
    }

    /// Link for `title`, if any.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&str> {
        self.links.get(title.trim()).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
