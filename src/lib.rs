//! Bookmatch: preference-based book recommendation in pure Rust.
//!
//! A reader describes their taste as a numeric preference vector (genre
//! ratings, age, mood). Bookmatch answers with the closest catalog entries
//! by Euclidean distance and a coarse reader category predicted by a
//! decision tree trained on the catalog.
//!
//! # Quick Start
//!
//! ```
//! use bookmatch::prelude::*;
//!
//! let csv = "Book,language,description,image_url,Fiction,Mystery,SciFi,Romance,Age,Mood,NonFiction\n\
//!            Dune,English,Desert planet,dune.jpg,8,3,10,2,30,6,1\n\
//!            Gone Girl,English,Missing wife,gone.jpg,6,9,1,5,35,4,1\n\
//!            Sapiens,English,Human history,sapiens.jpg,2,2,2,1,45,6,9";
//!
//! let config = RecommenderConfig::default();
//! let catalog = Catalog::load(
//!     csv.as_bytes(),
//!     &config.catalog,
//!     &config.features,
//!     &LinkTable::new(),
//! )
//! .expect("valid catalog");
//!
//! let recommender = Recommender::new(config).expect("valid config");
//! let query = PreferenceVector::from_slice(&[8.0, 3.0, 9.0, 2.0, 30.0, 6.0, 1.0]);
//!
//! let ranked = recommender.rank(&catalog, &query).expect("ranked");
//! assert_eq!(ranked.best().map(|b| b.record.title.as_str()), Some("Dune"));
//!
//! let label = recommender.classify(&catalog, &query).expect("classified");
//! assert_eq!(label.as_str(), "Fiction Lover");
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: CSV catalog loading, external links, swappable snapshots
//! - [`features`]: Feature set and preference vectors
//! - [`recommend`]: Distance ranking, classification and evaluation
//! - [`tree`]: CART decision tree classifier
//! - [`model_selection`]: Train/test splitting
//! - [`metrics`]: Classification metrics
//! - [`config`]: JSON-backed configuration
//! - [`primitives`]: Row-major matrix

pub mod catalog;
pub mod config;
pub mod error;
pub mod features;
pub mod metrics;
pub mod model_selection;
pub mod prelude;
pub mod primitives;
pub mod recommend;
pub mod tree;

pub use catalog::{BookRecord, Catalog, CatalogHandle};
pub use error::{BookmatchError, Result};
pub use features::{FeatureSet, PreferenceVector};
pub use recommend::Recommender;
