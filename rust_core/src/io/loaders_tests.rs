use std::io::Write;

use super::loaders::DatasetLoader;

const DATASET: &str = r#"[
    {
        "given_name": "Ada",
        "subfields": {"2018": {"AI": 1}, "2020": {"AI": 2}}
    },
    {
        "given_name": "Grace",
        "subfields": {"2021": {"Software": 4}}
    }
]"#;

#[test]
fn load_from_str_builds_caches_and_year_range() {
    let dataset = DatasetLoader::load_from_str(DATASET).unwrap();
    assert_eq!(dataset.authors.len(), 2);
    assert_eq!(dataset.caches.len(), 2);
    assert_eq!((dataset.min_year, dataset.max_year), (2018, 2021));

    // Cumulative snapshot for Ada at her last active year.
    let ada_entire = dataset.caches[0].entire.get(&2020).unwrap();
    assert_eq!(ada_entire.get("AI"), Some(&3));
}

#[test]
fn load_from_file_round_trips() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DATASET.as_bytes()).unwrap();

    let dataset = DatasetLoader::load_from_file(file.path()).unwrap();
    assert_eq!(dataset.authors.len(), 2);
    assert_eq!(dataset.authors[1].given_name, "Grace");
}

#[test]
fn missing_file_is_a_load_failure() {
    let err = DatasetLoader::load_from_file(std::path::Path::new("/nonexistent/dataset.json"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read dataset file"));
}

#[test]
fn empty_document_is_a_load_failure() {
    assert!(DatasetLoader::load_from_str("[]").is_err());
    assert!(DatasetLoader::load_from_str("{ bad json").is_err());
}

#[test]
fn dataset_without_yearly_data_gets_a_degenerate_range() {
    let dataset = DatasetLoader::load_from_str(r#"[{"given_name": "Inert"}]"#).unwrap();
    assert_eq!((dataset.min_year, dataset.max_year), (0, 0));
}
