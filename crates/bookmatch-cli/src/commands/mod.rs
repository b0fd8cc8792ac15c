//! Command implementations

pub(crate) mod catalog;
pub(crate) mod evaluate;
pub(crate) mod recommend;

use crate::error::{CliError, Result};
use bookmatch::catalog::{Catalog, LinkTable};
use bookmatch::config::RecommenderConfig;
use bookmatch::Recommender;
use std::path::Path;

/// Everything a command needs: validated config, loaded catalog, recommender.
pub(crate) struct Context {
    pub(crate) catalog: Catalog,
    pub(crate) recommender: Recommender,
}

impl Context {
    pub(crate) fn load(
        catalog_path: &Path,
        links_path: Option<&Path>,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                ensure_file(path)?;
                RecommenderConfig::from_json_path(path)?
            }
            None => RecommenderConfig::default(),
        };

        let links = match links_path {
            Some(path) => {
                ensure_file(path)?;
                LinkTable::from_json_path(path)?
            }
            None => LinkTable::new(),
        };

        ensure_file(catalog_path)?;
        let catalog =
            Catalog::load_path(catalog_path, &config.catalog, &config.features, &links)?;
        tracing::debug!(
            path = %catalog_path.display(),
            records = catalog.len(),
            links = links.len(),
            "catalog ready"
        );

        let recommender = Recommender::new(config)?;
        Ok(Self {
            catalog,
            recommender,
        })
    }
}

fn ensure_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::FileNotFound(path.to_path_buf()))
    }
}
