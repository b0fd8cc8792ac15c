//! Atomically replaceable catalog reference.

use super::{Catalog, CatalogHandle};
use std::sync::{PoisonError, RwLock};

/// Holds the live catalog for a long-running presentation layer.
///
/// Readers take a [`CatalogHandle`] snapshot and keep using it for the whole
/// request; [`CatalogSlot::replace`] swaps in a fully built catalog, so a
/// request never observes a partially loaded one.
#[derive(Debug)]
pub struct CatalogSlot {
    current: RwLock<CatalogHandle>,
}

impl CatalogSlot {
    /// Creates a slot holding `catalog`.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(catalog.into_handle()),
        }
    }

    /// Current catalog.
    #[must_use]
    pub fn snapshot(&self) -> CatalogHandle {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs `catalog` and returns the one it replaced.
    pub fn replace(&self, catalog: Catalog) -> CatalogHandle {
        let next = catalog.into_handle();
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        tracing::info!(
            previous = previous.len(),
            current = guard.len(),
            "catalog replaced"
        );
        previous
    }
}
