//! # Evaluation Scorer Tests

mod common;

use common::setup_tracing;
use serde_json::json;
use showmeta::annotations::Annotation;
use showmeta::dataset::DatasetRow;
use showmeta::evaluation::{
    genre_accuracy, jaccard, manual_accuracy, overall_success_rate, retry_rate, run_evaluation,
    schema_compliance_rate, FieldScoreLists,
};
use showmeta::{ContentMetadata, Extraction, ExtractionResult, Extractor};
use showmeta_test_utils::MockAiProvider;

fn metadata(genres: &[&str], mood: &str, target_audience: &str) -> ContentMetadata {
    ContentMetadata {
        genres: genres.iter().map(|s| s.to_string()).collect(),
        themes: vec!["survival".to_string()],
        mood: mood.to_string(),
        target_audience: target_audience.to_string(),
        content_warnings: Vec::new(),
    }
}

fn success_result(title: &str, retries: u32, metadata: ContentMetadata) -> ExtractionResult {
    ExtractionResult {
        title: title.to_string(),
        description: "a description".to_string(),
        extraction: Extraction {
            metadata: Some(metadata),
            raw_response: Some("{}".to_string()),
            retries,
            success: true,
            error: None,
        },
    }
}

fn failed_result(title: &str) -> ExtractionResult {
    ExtractionResult {
        title: title.to_string(),
        description: "a description".to_string(),
        extraction: Extraction {
            metadata: None,
            raw_response: Some("garbage".to_string()),
            retries: 2,
            success: false,
            error: Some("Invalid JSON response".to_string()),
        },
    }
}

// --- Rate Metrics ---

#[test]
fn test_rate_metrics_partition_the_batch() {
    let results = vec![
        success_result("a", 0, metadata(&["Drama"], "dark", "adults")),
        success_result("b", 1, metadata(&["Comedy"], "comedic", "teens")),
        failed_result("c"),
        success_result("d", 0, metadata(&["Horror"], "eerie", "adults")),
    ];

    assert_eq!(schema_compliance_rate(&results), 50.0);
    assert_eq!(overall_success_rate(&results), 75.0);
    assert_eq!(retry_rate(&results), 25.0);
}

#[test]
fn test_rate_metrics_on_empty_batch_are_zero() {
    assert_eq!(schema_compliance_rate(&[]), 0.0);
    assert_eq!(overall_success_rate(&[]), 0.0);
    assert_eq!(retry_rate(&[]), 0.0);
}

// --- Jaccard Similarity ---

#[test]
fn test_jaccard_identical_sets() {
    let extracted = vec!["Drama".to_string(), "Thriller".to_string()];
    let expected = vec!["drama".to_string(), "thriller".to_string()];
    assert_eq!(jaccard(&extracted, &expected), 1.0);
}

#[test]
fn test_jaccard_disjoint_sets() {
    let extracted = vec!["Drama".to_string()];
    let expected = vec!["Comedy".to_string()];
    assert_eq!(jaccard(&extracted, &expected), 0.0);
}

#[test]
fn test_jaccard_both_empty_is_vacuous_agreement() {
    assert_eq!(jaccard(&[], &[]), 1.0);
}

#[test]
fn test_jaccard_partial_overlap() {
    let extracted = vec!["Drama".to_string()];
    let expected = vec!["Drama".to_string(), "Comedy".to_string()];
    assert_eq!(jaccard(&extracted, &expected), 0.5);
}

// --- Genre Accuracy vs the Dataset Label ---

fn row(title: &str, genre_label: &str) -> DatasetRow {
    DatasetRow {
        title: title.to_string(),
        description: "a description".to_string(),
        genre_label: genre_label.to_string(),
    }
}

#[test]
fn test_genre_accuracy_matches_on_set_intersection() {
    let rows = vec![
        row("Hit", "Dramas, International Movies"),
        row("Miss", "Comedies"),
    ];
    let results = vec![
        success_result("Hit", 0, metadata(&["Drama", "Dramas"], "dark", "adults")),
        success_result("Miss", 0, metadata(&["Horror"], "eerie", "adults")),
    ];

    let acc = genre_accuracy(&results, &rows);
    assert_eq!(acc.matches, 1);
    assert_eq!(acc.total, 2);
    assert_eq!(acc.accuracy, 50.0);
    assert!(acc.details[0].matched);
    assert!(!acc.details[1].matched);
}

#[test]
fn test_genre_accuracy_excludes_unmatched_titles_and_failures() {
    let rows = vec![row("Known", "Dramas")];
    let results = vec![
        success_result("Known", 0, metadata(&["dramas"], "dark", "adults")),
        // No dataset row for this title: excluded from the denominator.
        success_result("Unknown", 0, metadata(&["Drama"], "dark", "adults")),
        // Failures never enter the comparison.
        failed_result("Known"),
    ];

    let acc = genre_accuracy(&results, &rows);
    assert_eq!(acc.total, 1);
    assert_eq!(acc.matches, 1);
    assert_eq!(acc.accuracy, 100.0);
}

#[test]
fn test_genre_accuracy_with_no_comparable_rows_is_zero() {
    let acc = genre_accuracy(&[], &[]);
    assert_eq!(acc.accuracy, 0.0);
    assert_eq!(acc.total, 0);
}

// --- Manual Accuracy vs the Curated Annotations ---

fn annotation(title: &str, expected: ContentMetadata) -> Annotation {
    Annotation {
        title: title.to_string(),
        description: "a description".to_string(),
        expected,
    }
}

#[test]
fn test_manual_accuracy_scores_fields_independently() {
    let annotations = vec![annotation(
        "21",
        ContentMetadata {
            genres: vec!["Drama".to_string(), "Thriller".to_string()],
            themes: vec!["survival".to_string()],
            mood: "Thrilling".to_string(),
            target_audience: "adults".to_string(),
            content_warnings: Vec::new(),
        },
    )];
    let results = vec![success_result(
        "21",
        0,
        metadata(&["drama", "thriller"], "thrilling", "teens"),
    )];

    let acc = manual_accuracy(&results, &annotations);
    let scores = &acc.average_scores;
    assert_eq!(scores.genres, 100.0);
    assert_eq!(scores.themes, 100.0);
    // Mood matches case-insensitively; audience does not match at all.
    assert_eq!(scores.mood, 100.0);
    assert_eq!(scores.target_audience, 0.0);
    // Both warning sets empty: vacuous agreement.
    assert_eq!(scores.content_warnings, 100.0);
    assert_eq!(scores.overall, 80.0);
    assert_eq!(acc.details.len(), 1);
}

#[test]
fn test_manual_accuracy_excludes_annotations_without_a_successful_result() {
    let annotations = vec![
        annotation("Scored", metadata(&["Drama"], "dark", "adults")),
        annotation("Failed", metadata(&["Comedy"], "comedic", "teens")),
        annotation("Absent", metadata(&["Horror"], "eerie", "adults")),
    ];
    let results = vec![
        success_result("Scored", 0, metadata(&["Drama"], "dark", "adults")),
        failed_result("Failed"),
    ];

    let acc = manual_accuracy(&results, &annotations);
    assert_eq!(acc.details.len(), 1);
    assert_eq!(acc.average_scores.genres, 100.0);
    assert_eq!(acc.average_scores.overall, 100.0);
}

#[test]
fn test_overall_is_the_unweighted_mean_of_field_averages() {
    // Field sample counts deliberately differ; the overall score still
    // averages the five field means equally.
    let lists = FieldScoreLists {
        genres: vec![1.0, 0.0],
        themes: vec![1.0, 1.0, 1.0],
        mood: vec![0.0],
        target_audience: vec![1.0],
        content_warnings: Vec::new(),
    };
    let scores = lists.averages();
    assert_eq!(scores.genres, 50.0);
    assert_eq!(scores.themes, 100.0);
    assert_eq!(scores.mood, 0.0);
    assert_eq!(scores.target_audience, 100.0);
    assert_eq!(scores.content_warnings, 0.0);
    assert_eq!(scores.overall, 50.0);
}

// --- Full Evaluation Run ---

#[tokio::test]
async fn test_run_evaluation_builds_and_writes_the_report() {
    setup_tracing();
    let annotations = vec![annotation("Annotated", metadata(&["Drama"], "dark", "adults"))];
    let rows = vec![row("Sampled", "Dramas")];

    // One response for the annotated item, one for the sampled row.
    let provider = MockAiProvider::new(vec![
        json!({
            "genres": ["Drama"],
            "themes": ["survival"],
            "mood": "dark",
            "target_audience": "adults",
            "content_warnings": []
        })
        .to_string(),
        json!({
            "genres": ["Dramas"],
            "themes": ["family"],
            "mood": "tense",
            "target_audience": "adults",
            "content_warnings": []
        })
        .to_string(),
    ]);
    let extractor = Extractor::new(Box::new(provider));

    let dir = tempfile::tempdir().expect("tempdir");
    let report_path = dir.path().join("reports/evaluation_report.json");

    let report = run_evaluation(&extractor, &rows, &annotations, 1, Some(&report_path))
        .await
        .expect("evaluation should run");

    assert_eq!(report.total_samples, 2);
    assert_eq!(report.failure_count, 0);
    assert_eq!(report.metrics.overall_success_rate, 100.0);
    assert_eq!(report.metrics.schema_compliance_first_try, 100.0);
    assert_eq!(report.metrics.retry_rate, 0.0);
    assert_eq!(report.metrics.genre_accuracy, 100.0);
    assert_eq!(report.metrics.manual_accuracy.overall, 100.0);

    // The persisted report round-trips as JSON with the documented fields.
    let written = std::fs::read_to_string(&report_path).expect("report file exists");
    let value: serde_json::Value = serde_json::from_str(&written).expect("report is valid JSON");
    assert!(value["timestamp"].is_string());
    assert_eq!(value["total_samples"], json!(2));
    assert_eq!(value["failure_count"], json!(0));
    assert!(value["metrics"]["manual_accuracy"]["overall"].is_number());
    assert_eq!(value["failures"], json!([]));
}

#[tokio::test]
async fn test_run_evaluation_reports_failures_per_title() {
    setup_tracing();
    let annotations = vec![annotation("Doomed", metadata(&["Drama"], "dark", "adults"))];

    // Every attempt returns garbage, so the single annotated item fails.
    let provider = MockAiProvider::new(vec![
        "garbage".to_string(),
        "garbage".to_string(),
        "garbage".to_string(),
    ]);
    let extractor = Extractor::new(Box::new(provider));

    let report = run_evaluation(&extractor, &[], &annotations, 0, None)
        .await
        .expect("evaluation should run");

    assert_eq!(report.total_samples, 1);
    assert_eq!(report.failure_count, 1);
    assert_eq!(report.failures[0].title, "Doomed");
    assert!(report.failures[0].error.contains("Invalid JSON response"));
}
