//! Integration tests for Bookmatch.
//!
//! These tests verify end-to-end workflows from catalog files to
//! recommendations.

use bookmatch::prelude::*;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const CATALOG_CSV: &str = "\
Book,language,description,image_url,Fiction,Mystery,SciFi,Romance,Age,Mood,NonFiction
A,English,First book,a.jpg,8,2,2,2,30,7,2
B,English,Second book,b.jpg,2,8,2,2,40,5,2
C,English,Third book,c.jpg,2,2,8,2,50,3,8
Rayuela,Spanish,Hopscotch,rayuela.jpg,9,3,1,6,40,6,1
";

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn load_catalog(config: &RecommenderConfig, links: &LinkTable) -> Catalog {
    let csv = write_temp(CATALOG_CSV);
    Catalog::load_path(csv.path(), &config.catalog, &config.features, links)
        .expect("Failed to load catalog")
}

#[test]
fn test_recommend_workflow() {
    let links = write_temp(r#"{"A": "https://example.org/a.pdf"}"#);
    let links = LinkTable::from_json_path(links.path()).expect("Failed to load links");

    let config = RecommenderConfig::default();
    let catalog = load_catalog(&config, &links);
    assert_eq!(catalog.len(), 3, "Spanish row should be filtered out");

    let recommender = Recommender::new(config).expect("Default config should be valid");
    let query = PreferenceVector::from_slice(&[8.0, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0]);

    let ranked = recommender.rank(&catalog, &query).expect("Failed to rank");
    let titles: Vec<&str> = ranked.iter().map(|e| e.record.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);

    let best = ranked.best().expect("Ranking should not be empty");
    assert_eq!(best.distance, 0.0);
    assert_eq!(
        best.record.external_link.as_deref(),
        Some("https://example.org/a.pdf")
    );
    assert_eq!(ranked.as_slice()[1].record.external_link, None);

    let label = recommender
        .classify(&catalog, &query)
        .expect("Failed to classify");
    assert_eq!(label.as_str(), "Fiction Lover");
}

#[test]
fn test_config_file_workflow() {
    let config_file = write_temp(
        r#"{
            "label_rule": {"feature": "SciFi", "threshold": 5.0, "above": "Space Cadet", "otherwise": "Earthbound"},
            "tree": {"max_depth": 3}
        }"#,
    );
    let config =
        RecommenderConfig::from_json_path(config_file.path()).expect("Failed to load config");
    assert_eq!(config.tree.max_depth, Some(3));
    assert_eq!(config.catalog.accepted_language, "English");

    let catalog = load_catalog(&config, &LinkTable::new());
    let recommender = Recommender::new(config).expect("Config should be valid");

    let query = PreferenceVector::from_slice(&[2.0, 2.0, 9.0, 2.0, 50.0, 3.0, 8.0]);
    let label = recommender
        .classify(&catalog, &query)
        .expect("Failed to classify");
    assert_eq!(label.as_str(), "Space Cadet");
}

#[test]
fn test_query_errors_leave_catalog_untouched() {
    let config = RecommenderConfig::default();
    let catalog = load_catalog(&config, &LinkTable::new());
    let snapshot = catalog.clone();
    let recommender = Recommender::new(config).expect("Default config should be valid");

    let short = PreferenceVector::from_slice(&[8.0, 2.0, 2.0, 2.0, 30.0, 7.0]);
    assert!(matches!(
        recommender.rank(&catalog, &short),
        Err(BookmatchError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        recommender.classify(&catalog, &short),
        Err(BookmatchError::DimensionMismatch { .. })
    ));
    assert_eq!(catalog, snapshot);
}

#[test]
fn test_catalog_swap_keeps_in_flight_snapshot() {
    let config = RecommenderConfig::default();
    let slot = CatalogSlot::new(load_catalog(&config, &LinkTable::new()));
    let recommender = Recommender::new(config.clone()).expect("Default config should be valid");
    let query = PreferenceVector::from_slice(&[8.0, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0]);

    let before = slot.snapshot();

    let replacement = "\
Book,language,description,Fiction,Mystery,SciFi,Romance,Age,Mood,NonFiction
Z,English,Replacement,8,2,2,2,30,7,2
";
    let next = Catalog::load(
        replacement.as_bytes(),
        &config.catalog,
        &config.features,
        &LinkTable::new(),
    )
    .expect("Failed to load replacement");
    let previous = slot.replace(next);

    assert!(Arc::ptr_eq(&before, &previous));
    let ranked = recommender.rank(&before, &query).expect("Failed to rank");
    assert_eq!(ranked.len(), 3);

    let after = slot.snapshot();
    let ranked = recommender.rank(&after, &query).expect("Failed to rank");
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked.as_slice()[0].record.title, "Z");
    assert_eq!(ranked.as_slice()[0].record.cover_image, "");
}

#[test]
fn test_evaluate_workflow() {
    let mut csv = String::from(
        "Book,language,description,image_url,Fiction,Mystery,SciFi,Romance,Age,Mood,NonFiction\n",
    );
    for i in 0..20 {
        let fiction = if i % 3 == 0 { 9 } else { 3 };
        csv.push_str(&format!(
            "Book {i},English,Generated,cover.jpg,{fiction},4,4,4,{},5,4\n",
            20 + i
        ));
    }

    let config = RecommenderConfig::default();
    let catalog = Catalog::load(
        csv.as_bytes(),
        &config.catalog,
        &config.features,
        &LinkTable::new(),
    )
    .expect("Failed to load catalog");
    let recommender = Recommender::new(config).expect("Default config should be valid");

    let report = recommender
        .evaluate(&catalog, ClassifierTarget::Label)
        .expect("Failed to evaluate");
    assert_eq!(report.n_train + report.n_test, 20);
    assert_eq!(report.n_test, 4);
    assert!((0.0..=1.0).contains(&report.accuracy));

    let titles = recommender
        .evaluate(&catalog, ClassifierTarget::Title)
        .expect("Failed to evaluate");
    assert_eq!(titles.accuracy, 0.0);
}
