//! # Dataset Loading Tests

use showmeta::dataset::{load_dataset, sample_rows, DatasetError, DatasetRow};
use std::fs;

fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("catalog.csv");
    fs::write(&path, contents).expect("write csv");
    (dir, path)
}

#[test]
fn test_load_dataset_reads_title_description_and_type() {
    let (_dir, path) = write_csv(
        "Title,Description,Type\n\
         21,A blackjack heist.,\"Dramas, Thrillers\"\n\
         9,Rag-doll robots survive.,Animation\n",
    );

    let rows = load_dataset(&path).expect("dataset should load");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "21");
    assert_eq!(rows[0].description, "A blackjack heist.");
    assert_eq!(rows[0].genre_label, "Dramas, Thrillers");
}

#[test]
fn test_load_dataset_matches_headers_case_insensitively() {
    let (_dir, path) = write_csv("title,DESCRIPTION,type\nX,Something happens.,Dramas\n");

    let rows = load_dataset(&path).expect("dataset should load");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "X");
}

#[test]
fn test_load_dataset_skips_rows_without_title_or_description() {
    let (_dir, path) = write_csv(
        "Title,Description,Type\n\
         Kept,Has a description.,Dramas\n\
         ,Orphaned description.,Dramas\n\
         No Description,,Dramas\n",
    );

    let rows = load_dataset(&path).expect("dataset should load");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Kept");
}

#[test]
fn test_load_dataset_requires_the_label_column() {
    let (_dir, path) = write_csv("Title,Description\nX,Something happens.\n");

    let err = load_dataset(&path).expect_err("missing Type column must fail");
    assert!(matches!(err, DatasetError::MissingColumn("Type")));
}

#[test]
fn test_sample_rows_is_deterministic_for_a_seed() {
    let rows: Vec<DatasetRow> = (0..20)
        .map(|i| DatasetRow {
            title: format!("Title {i}"),
            description: "A description.".to_string(),
            genre_label: "Dramas".to_string(),
        })
        .collect();

    let first = sample_rows(&rows, 5, 42);
    let second = sample_rows(&rows, 5, 42);
    assert_eq!(first.len(), 5);
    let titles = |sample: &[DatasetRow]| sample.iter().map(|r| r.title.clone()).collect::<Vec<_>>();
    assert_eq!(titles(&first), titles(&second));
}

#[test]
fn test_sample_rows_returns_everything_when_n_exceeds_len() {
    let rows = vec![DatasetRow {
        title: "Only".to_string(),
        description: "A description.".to_string(),
        genre_label: "Dramas".to_string(),
    }];
    assert_eq!(sample_rows(&rows, 50, 42).len(), 1);
}
