use super::*;
use crate::config::RecommenderConfig;
use crate::features::FeatureSet;

fn book(title: &str, features: [f32; 7]) -> BookRecord {
    BookRecord {
        title: title.to_string(),
        features: features.to_vec(),
        language: "English".to_string(),
        description: format!("About {title}"),
        cover_image: String::new(),
        external_link: None,
    }
}

fn abc_catalog() -> Catalog {
    Catalog::from_records(
        vec![
            book("A", [8.0, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0]),
            book("B", [2.0, 8.0, 2.0, 2.0, 40.0, 5.0, 2.0]),
            book("C", [2.0, 2.0, 8.0, 2.0, 50.0, 3.0, 8.0]),
        ],
        &FeatureSet::default(),
    )
    .expect("valid records")
}

fn recommender() -> Recommender {
    Recommender::new(RecommenderConfig::default()).expect("default config is valid")
}

fn query(values: &[f32]) -> PreferenceVector {
    PreferenceVector::from_slice(values)
}

const QUERY_A: [f32; 7] = [8.0, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0];

#[test]
fn test_rank_orders_by_distance() {
    let catalog = abc_catalog();
    let ranked = recommender()
        .rank(&catalog, &query(&QUERY_A))
        .expect("rank succeeds");

    let titles: Vec<&str> = ranked.iter().map(|e| e.record.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert_eq!(ranked.len(), catalog.len());

    let distances: Vec<f32> = ranked.iter().map(|e| e.distance).collect();
    assert!(distances[0].abs() < 1e-6);
    assert!((distances[1] - 176.0_f32.sqrt()).abs() < 1e-4);
    assert!((distances[2] - 524.0_f32.sqrt()).abs() < 1e-4);
}

#[test]
fn test_rank_keeps_catalog_order_on_ties() {
    let catalog = Catalog::from_records(
        vec![
            book("First", [5.0, 5.0, 5.0, 5.0, 30.0, 5.0, 6.0]),
            book("Second", [5.0, 5.0, 5.0, 5.0, 30.0, 5.0, 4.0]),
        ],
        &FeatureSet::default(),
    )
    .expect("valid records");

    let ranked = recommender()
        .rank(&catalog, &query(&[5.0, 5.0, 5.0, 5.0, 30.0, 5.0, 5.0]))
        .expect("rank succeeds");
    let indices: Vec<usize> = ranked.iter().map(|e| e.index).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn test_rank_top_is_clamped() {
    let catalog = abc_catalog();
    let ranked = recommender()
        .rank(&catalog, &query(&QUERY_A))
        .expect("rank succeeds");
    assert_eq!(ranked.top(2).len(), 2);
    assert_eq!(ranked.top(10).len(), 3);
}

#[test]
fn test_rank_empty_catalog() {
    let catalog =
        Catalog::from_records(Vec::new(), &FeatureSet::default()).expect("empty is valid");
    let err = recommender()
        .rank(&catalog, &query(&QUERY_A))
        .expect_err("empty catalog");
    assert!(matches!(err, BookmatchError::EmptyCatalog));
}

#[test]
fn test_empty_catalog_checked_before_dimensions() {
    let catalog =
        Catalog::from_records(Vec::new(), &FeatureSet::default()).expect("empty is valid");
    let err = recommender()
        .classify(&catalog, &query(&[1.0]))
        .expect_err("empty catalog");
    assert!(matches!(err, BookmatchError::EmptyCatalog));
}

#[test]
fn test_rank_rejects_short_query() {
    let catalog = abc_catalog();
    let before = catalog.clone();
    let err = recommender()
        .rank(&catalog, &query(&QUERY_A[..6]))
        .expect_err("six values");
    assert!(matches!(
        err,
        BookmatchError::DimensionMismatch {
            expected: 7,
            actual: 6
        }
    ));
    assert_eq!(catalog, before);
}

#[test]
fn test_rank_rejects_out_of_range_value() {
    let catalog = abc_catalog();
    let mut values = QUERY_A;
    values[4] = 120.0;
    let err = recommender()
        .rank(&catalog, &query(&values))
        .expect_err("age above 100");
    match err {
        BookmatchError::OutOfRange { feature, .. } => assert_eq!(feature, "Age"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_range_validation_can_be_disabled() {
    let catalog = abc_catalog();
    let config = RecommenderConfig {
        validate_ranges: false,
        ..RecommenderConfig::default()
    };
    let recommender = Recommender::new(config).expect("valid config");
    let mut values = QUERY_A;
    values[4] = 120.0;
    let ranked = recommender
        .rank(&catalog, &query(&values))
        .expect("bounds are not checked");
    assert_eq!(ranked.len(), 3);
}

#[test]
fn test_classify_fiction_lover() {
    let catalog = abc_catalog();
    let label = recommender()
        .classify(&catalog, &query(&QUERY_A))
        .expect("classify succeeds");
    assert_eq!(label.as_str(), "Fiction Lover");
}

#[test]
fn test_classify_balanced_reader() {
    let catalog = abc_catalog();
    let label = recommender()
        .classify(&catalog, &query(&[2.0, 2.0, 8.0, 2.0, 50.0, 3.0, 8.0]))
        .expect("classify succeeds");
    assert_eq!(label.as_str(), "Balanced Reader");
}

#[test]
fn test_classify_is_deterministic() {
    let catalog = abc_catalog();
    let recommender = recommender();
    let q = query(&[5.0, 5.0, 5.0, 5.0, 35.0, 5.0, 5.0]);
    let first = recommender.classify(&catalog, &q).expect("classify");
    for _ in 0..5 {
        assert_eq!(recommender.classify(&catalog, &q).expect("classify"), first);
    }
}

#[test]
fn test_classify_single_record_untrainable() {
    let catalog = Catalog::from_records(
        vec![book("Only", [8.0, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0])],
        &FeatureSet::default(),
    )
    .expect("valid records");

    let recommender = recommender();
    let err = recommender
        .classify(&catalog, &query(&QUERY_A))
        .expect_err("one record");
    assert!(matches!(err, BookmatchError::Untrainable { .. }));

    // Ranking still works on the same catalog.
    assert_eq!(
        recommender
            .rank(&catalog, &query(&QUERY_A))
            .expect("rank")
            .len(),
        1
    );
}

#[test]
fn test_classify_single_label_untrainable() {
    let catalog = Catalog::from_records(
        vec![
            book("Low", [2.0, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0]),
            book("Lower", [1.0, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0]),
        ],
        &FeatureSet::default(),
    )
    .expect("valid records");

    let err = recommender()
        .classify(&catalog, &query(&QUERY_A))
        .expect_err("every record is a Balanced Reader");
    assert!(matches!(err, BookmatchError::Untrainable { .. }));
}

#[test]
fn test_classify_with_custom_rule() {
    let catalog = abc_catalog();
    let mut config = RecommenderConfig::default();
    config.label_rule = LabelRule {
        feature: "Mystery".to_string(),
        threshold: 6.0,
        above: "Sleuth".to_string(),
        otherwise: "Casual".to_string(),
    };
    let recommender = Recommender::new(config).expect("valid config");

    let label = recommender
        .classify(&catalog, &query(&[2.0, 8.0, 2.0, 2.0, 40.0, 5.0, 2.0]))
        .expect("classify succeeds");
    assert_eq!(label.as_str(), "Sleuth");
}

#[test]
fn test_predict_title_returns_nearest_leaf() {
    let catalog = abc_catalog();
    let record = recommender()
        .predict_title(&catalog, &query(&[2.0, 8.0, 2.0, 2.0, 40.0, 5.0, 2.0]))
        .expect("predict succeeds");
    assert_eq!(record.title, "B");
}

#[test]
fn test_predict_title_needs_two_records() {
    let catalog = Catalog::from_records(
        vec![book("Only", [8.0, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0])],
        &FeatureSet::default(),
    )
    .expect("valid records");
    let err = recommender()
        .predict_title(&catalog, &query(&QUERY_A))
        .expect_err("one record");
    assert!(matches!(err, BookmatchError::Untrainable { .. }));
}

fn ten_book_catalog() -> Catalog {
    let records = (0..10)
        .map(|i| {
            let fiction = if i % 2 == 0 { 9.0 } else { 2.0 };
            book(
                &format!("Book {i}"),
                [fiction, 3.0, 3.0, 3.0, 20.0 + i as f32, 5.0, 3.0],
            )
        })
        .collect();
    Catalog::from_records(records, &FeatureSet::default()).expect("valid records")
}

#[test]
fn test_evaluate_label_target() {
    let catalog = ten_book_catalog();
    let report = recommender()
        .evaluate(&catalog, ClassifierTarget::Label)
        .expect("evaluate succeeds");

    assert_eq!(report.target, ClassifierTarget::Label);
    assert_eq!(report.n_train, 8);
    assert_eq!(report.n_test, 2);
    // Fiction alone separates the labels.
    assert!((report.accuracy - 1.0).abs() < 1e-6);
}

#[test]
fn test_evaluate_title_target_scores_zero() {
    let catalog = ten_book_catalog();
    let report = recommender()
        .evaluate(&catalog, ClassifierTarget::Title)
        .expect("evaluate succeeds");
    assert_eq!(report.target, ClassifierTarget::Title);
    assert!(report.accuracy.abs() < 1e-6);
}

#[test]
fn test_evaluate_is_reproducible_with_seed() {
    let catalog = ten_book_catalog();
    let recommender = recommender();
    let first = recommender
        .evaluate(&catalog, ClassifierTarget::Label)
        .expect("evaluate");
    let second = recommender
        .evaluate(&catalog, ClassifierTarget::Label)
        .expect("evaluate");
    assert_eq!(first, second);
}

#[test]
fn test_evaluate_empty_catalog() {
    let catalog =
        Catalog::from_records(Vec::new(), &FeatureSet::default()).expect("empty is valid");
    let err = recommender()
        .evaluate(&catalog, ClassifierTarget::Label)
        .expect_err("empty catalog");
    assert!(matches!(err, BookmatchError::EmptyCatalog));
}

#[test]
fn test_new_rejects_invalid_config() {
    let mut config = RecommenderConfig::default();
    config.label_rule.feature = "Poetry".to_string();
    let err = Recommender::new(config).expect_err("unknown feature");
    assert!(matches!(err, BookmatchError::InvalidConfig { .. }));
}
