//! Distance ranking over the whole catalog.

use crate::catalog::{BookRecord, Catalog};
use crate::error::{BookmatchError, Result};
use crate::features::PreferenceVector;
use serde::Serialize;

/// Euclidean distance: `sqrt(sum((a_i - b_i)^2))`.
///
/// Dimensions are unweighted and unnormalized, so wide-range features such
/// as age dominate narrow 1-10 ratings.
///
/// # Examples
///
/// ```
/// use bookmatch::recommend::euclidean_distance;
///
/// assert!((euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum::<f32>()
        .sqrt()
}

/// One ranked catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedBook<'c> {
    /// Position of the record in the catalog
    pub index: usize,
    /// The matched record
    pub record: &'c BookRecord,
    /// Distance from the query
    pub distance: f32,
}

/// Every catalog record ordered by ascending distance from a query.
///
/// Equal distances keep catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedResult<'c> {
    entries: Vec<RankedBook<'c>>,
}

impl<'c> RankedResult<'c> {
    /// Number of ranked entries (always the catalog size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ranking is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Closest entry.
    #[must_use]
    pub fn best(&self) -> Option<&RankedBook<'c>> {
        self.entries.first()
    }

    /// The `k` closest entries (fewer if the catalog is smaller).
    #[must_use]
    pub fn top(&self, k: usize) -> &[RankedBook<'c>] {
        &self.entries[..k.min(self.entries.len())]
    }

    /// All entries in rank order.
    #[must_use]
    pub fn as_slice(&self) -> &[RankedBook<'c>] {
        &self.entries
    }

    /// Iterates entries in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &RankedBook<'c>> {
        self.entries.iter()
    }
}

impl<'c> IntoIterator for RankedResult<'c> {
    type Item = RankedBook<'c>;
    type IntoIter = std::vec::IntoIter<RankedBook<'c>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Ranks every record in `catalog` by distance from `query`.
///
/// Only the query's shape is checked here; bounds checking is left to
/// [`crate::recommend::Recommender::rank`].
///
/// # Errors
///
/// Returns [`BookmatchError::EmptyCatalog`] for an empty catalog and
/// [`BookmatchError::DimensionMismatch`] when the query length differs from
/// the catalog's feature set.
pub fn rank<'c>(catalog: &'c Catalog, query: &PreferenceVector) -> Result<RankedResult<'c>> {
    if catalog.is_empty() {
        return Err(BookmatchError::EmptyCatalog);
    }
    query.check_dimensions(catalog.features())?;

    let mut entries: Vec<RankedBook<'c>> = catalog
        .iter()
        .enumerate()
        .map(|(index, record)| RankedBook {
            index,
            record,
            distance: euclidean_distance(query.as_slice(), &record.features),
        })
        .collect();

    // Stable sort keeps catalog order among equal distances.
    entries.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    tracing::debug!(
        records = entries.len(),
        best = ?entries.first().map(|e| e.record.title.as_str()),
        "ranked catalog"
    );

    Ok(RankedResult { entries })
}
