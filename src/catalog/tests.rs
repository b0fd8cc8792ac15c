use super::*;
use crate::config::CatalogColumns;
use crate::features::FeatureSpec;
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str =
    "Book,language,description,image_url,Fiction,Mystery,SciFi,Romance,Age,Mood,NonFiction";

fn sample_csv() -> String {
    [
        HEADER,
        "  The Hobbit ,English,There and back again,hobbit.jpg,9,3,4,2,20,8,1",
        "Cien años de soledad,Spanish,Macondo,cien.jpg,9,2,1,6,40,5,1",
        "Gone Girl,English,Missing wife,gone.jpg,6,9,1,5,35,4,1",
        "Sapiens,English,Human history,sapiens.jpg,2,2,2,1,45,6,9",
    ]
    .join("\n")
}

fn load_str(csv: &str, links: &LinkTable) -> Result<Catalog> {
    Catalog::load(
        csv.as_bytes(),
        &CatalogConfig::default(),
        &FeatureSet::default(),
        links,
    )
}

#[test]
fn test_load_filters_language_and_reindexes() {
    let catalog = load_str(&sample_csv(), &LinkTable::new()).expect("valid catalog");

    let titles: Vec<&str> = catalog.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["The Hobbit", "Gone Girl", "Sapiens"]);
    assert!(catalog.iter().all(|r| r.language == "English"));
    assert_eq!(catalog.get(1).map(|r| r.title.as_str()), Some("Gone Girl"));
}

#[test]
fn test_load_trims_titles() {
    let catalog = load_str(&sample_csv(), &LinkTable::new()).expect("valid catalog");
    assert!(catalog.find("The Hobbit").is_some());
}

#[test]
fn test_load_parses_features_in_set_order() {
    let catalog = load_str(&sample_csv(), &LinkTable::new()).expect("valid catalog");
    let sapiens = catalog.find("Sapiens").expect("Sapiens retained");
    assert_eq!(sapiens.features, vec![2.0, 2.0, 2.0, 1.0, 45.0, 6.0, 9.0]);
    assert_eq!(sapiens.description, "Human history");
    assert_eq!(sapiens.cover_image, "sapiens.jpg");
}

#[test]
fn test_feature_columns_may_be_reordered_in_source() {
    let csv = "NonFiction,Mood,Age,Romance,SciFi,Mystery,Fiction,Book,language,description\n\
               7,6,5,4,3,2,1,Reversed,English,desc";
    let catalog = load_str(csv, &LinkTable::new()).expect("valid catalog");
    assert_eq!(
        catalog.records()[0].features,
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
    );
}

#[test]
fn test_links_attached_leniently() {
    let links = LinkTable::from_pairs([("The Hobbit", "https://example.org/hobbit.pdf")]);
    let catalog = load_str(&sample_csv(), &links).expect("missing links are not errors");

    assert_eq!(
        catalog.find("The Hobbit").and_then(|r| r.external_link.as_deref()),
        Some("https://example.org/hobbit.pdf")
    );
    assert_eq!(
        catalog.find("Gone Girl").map(|r| r.external_link.clone()),
        Some(None)
    );
}

#[test]
fn test_cover_image_column_optional() {
    let csv = "Book,language,description,Fiction,Mystery,SciFi,Romance,Age,Mood,NonFiction\n\
               Emma,English,Matchmaking,5,2,1,9,25,7,1";
    let catalog = load_str(csv, &LinkTable::new()).expect("valid catalog");
    assert_eq!(catalog.records()[0].cover_image, "");
}

#[test]
fn test_missing_feature_column_fails() {
    let csv = "Book,language,description,Fiction,Mystery,SciFi,Romance,Age,Mood\n\
               Emma,English,Matchmaking,5,2,1,9,25,7";
    let err = load_str(csv, &LinkTable::new()).expect_err("NonFiction is required");
    assert!(matches!(err, BookmatchError::DataLoad { .. }));
    assert!(err.to_string().contains("NonFiction"));
}

#[test]
fn test_missing_title_column_fails() {
    let csv = "Name,language,description,Fiction,Mystery,SciFi,Romance,Age,Mood,NonFiction\n\
               Emma,English,Matchmaking,5,2,1,9,25,7,1";
    let err = load_str(csv, &LinkTable::new()).expect_err("title column is required");
    assert!(err.to_string().contains("Book"));
}

#[test]
fn test_non_numeric_feature_rejected() {
    let csv = format!("{HEADER}\nEmma,English,Matchmaking,,five,2,1,9,25,7,1");
    let err = load_str(&csv, &LinkTable::new()).expect_err("non-numeric value");
    let msg = err.to_string();
    assert!(msg.contains("line 2"), "{msg}");
    assert!(msg.contains("Fiction"), "{msg}");
}

#[test]
fn test_non_numeric_feature_in_filtered_row_ignored() {
    let csv = format!("{HEADER}\nRayuela,Spanish,Hopscotch,,n/a,2,1,9,25,7,1\nEmma,English,Matchmaking,,5,2,1,9,25,7,1");
    let catalog = load_str(&csv, &LinkTable::new()).expect("filtered rows are not parsed");
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_duplicate_title_rejected() {
    let csv = format!("{HEADER}\nEmma,English,a,,5,2,1,9,25,7,1\n Emma ,English,b,,5,2,1,9,25,7,1");
    let err = load_str(&csv, &LinkTable::new()).expect_err("duplicate title");
    assert!(err.to_string().contains("duplicate title"));
}

#[test]
fn test_empty_title_rejected() {
    let csv = format!("{HEADER}\n   ,English,a,,5,2,1,9,25,7,1");
    assert!(load_str(&csv, &LinkTable::new()).is_err());
}

#[test]
fn test_ragged_row_rejected() {
    let csv = format!("{HEADER}\nEmma,English,a,,5,2");
    let err = load_str(&csv, &LinkTable::new()).expect_err("short row");
    assert!(matches!(err, BookmatchError::DataLoad { .. }));
}

#[test]
fn test_language_match_is_exact() {
    let csv = format!("{HEADER}\nEmma,english,a,,5,2,1,9,25,7,1\nDune,English ,b,,8,3,9,2,30,6,1");
    let catalog = load_str(&csv, &LinkTable::new()).expect("valid source");
    assert!(catalog.is_empty());
}

#[test]
fn test_max_records_enforced() {
    let config = CatalogConfig {
        max_records: 2,
        ..CatalogConfig::default()
    };
    let err = Catalog::load(
        sample_csv().as_bytes(),
        &config,
        &FeatureSet::default(),
        &LinkTable::new(),
    )
    .expect_err("three English rows exceed the bound");
    assert!(err.to_string().contains("max_records"));
}

#[test]
fn test_custom_columns_and_language() {
    let config = CatalogConfig {
        accepted_language: "Spanish".to_string(),
        max_records: 10,
        columns: CatalogColumns {
            title: "titulo".to_string(),
            language: "idioma".to_string(),
            description: "resumen".to_string(),
            cover_image: "portada".to_string(),
        },
    };
    let features = FeatureSet::new(vec![FeatureSpec::rating("Ficcion")]).expect("valid");
    let csv = "titulo,idioma,resumen,Ficcion\nRayuela,Spanish,Rayuela,7\nDune,English,Dune,8";
    let catalog =
        Catalog::load(csv.as_bytes(), &config, &features, &LinkTable::new()).expect("valid");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.records()[0].features, vec![7.0]);
}

#[test]
fn test_load_is_idempotent() {
    let links = LinkTable::from_pairs([("Sapiens", "sapiens.pdf")]);
    let first = load_str(&sample_csv(), &links).expect("first load");
    let second = load_str(&sample_csv(), &links).expect("second load");
    assert_eq!(first, second);
}

#[test]
fn test_load_path_roundtrip() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{}", sample_csv()).expect("write csv");

    let catalog = Catalog::load_path(
        file.path(),
        &CatalogConfig::default(),
        &FeatureSet::default(),
        &LinkTable::new(),
    )
    .expect("load from disk");
    assert_eq!(catalog.len(), 3);
}

#[test]
fn test_load_path_missing_file() {
    let err = Catalog::load_path(
        "/nonexistent/book.csv",
        &CatalogConfig::default(),
        &FeatureSet::default(),
        &LinkTable::new(),
    )
    .expect_err("missing file");
    assert!(matches!(err, BookmatchError::DataLoad { .. }));
}

#[test]
fn test_from_records_checks_lengths() {
    let record = BookRecord {
        title: "Short".to_string(),
        features: vec![1.0, 2.0],
        language: "English".to_string(),
        description: String::new(),
        cover_image: String::new(),
        external_link: None,
    };
    let err = Catalog::from_records(vec![record], &FeatureSet::default()).expect_err("short");
    assert!(matches!(err, BookmatchError::DataLoad { .. }));
}

fn record(title: &str, features: [f32; 7]) -> BookRecord {
    BookRecord {
        title: title.to_string(),
        features: features.to_vec(),
        language: "English".to_string(),
        description: String::new(),
        cover_image: String::new(),
        external_link: None,
    }
}

#[test]
fn test_from_records_rejects_non_finite_values() {
    for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        let records = vec![
            record("A", [bad, 2.0, 2.0, 2.0, 30.0, 7.0, 2.0]),
            record("B", [2.0, 8.0, 2.0, 2.0, 40.0, 5.0, 2.0]),
        ];
        let err = Catalog::from_records(records, &FeatureSet::default()).expect_err("non-finite");
        match err {
            BookmatchError::DataLoad { message } => assert!(message.contains("Fiction")),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn test_from_records_trims_titles() {
    let catalog = Catalog::from_records(
        vec![record("  Dune ", [8.0, 3.0, 9.0, 2.0, 30.0, 6.0, 1.0])],
        &FeatureSet::default(),
    )
    .expect("valid records");
    assert_eq!(catalog.records()[0].title, "Dune");
    assert!(catalog.find("Dune").is_some());
}

#[test]
fn test_from_records_rejects_duplicates_after_trimming() {
    let records = vec![
        record(" B ", [2.0, 8.0, 2.0, 2.0, 40.0, 5.0, 2.0]),
        record("B", [2.0, 8.0, 2.0, 2.0, 40.0, 5.0, 2.0]),
    ];
    let err = Catalog::from_records(records, &FeatureSet::default()).expect_err("duplicate");
    match err {
        BookmatchError::DataLoad { message } => assert!(message.contains("duplicate")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_feature_matrix_shape() {
    let catalog = load_str(&sample_csv(), &LinkTable::new()).expect("valid catalog");
    let matrix = catalog.feature_matrix();
    assert_eq!(matrix.shape(), (3, 7));
    assert!((matrix.get(2, 6) - 9.0).abs() < 1e-6);
}
