//! # Evaluation Scoring
//!
//! Aggregate quality metrics over a batch of extraction results, scored
//! against two ground-truth sources: the dataset's genre label column and
//! the curated annotation list. All metric functions are pure with respect
//! to their inputs; `run_evaluation` orchestrates the batches and builds the
//! persisted report.

use crate::{
    annotations::Annotation,
    dataset::{self, CatalogItem, DatasetRow},
    extractor::{ExtractionResult, Extractor},
    schema::ContentMetadata,
};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Fixed seed for the evaluation sample, so runs are comparable.
const SAMPLE_SEED: u64 = 42;

/// Custom error types for evaluation report persistence.
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Failed to write evaluation report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize evaluation report: {0}")]
    Serialize(#[from] serde_json::Error),
}

// --- Rate Metrics ---

/// The % of extractions that passed validation without any retry.
pub fn schema_compliance_rate(results: &[ExtractionResult]) -> f64 {
    percentage(results, |r| r.extraction.success && r.extraction.retries == 0)
}

/// The % of extractions that ultimately succeeded, with or without retry.
pub fn overall_success_rate(results: &[ExtractionResult]) -> f64 {
    percentage(results, |r| r.extraction.success)
}

/// The % of extractions that succeeded but needed at least one retry.
pub fn retry_rate(results: &[ExtractionResult]) -> f64 {
    percentage(results, |r| r.extraction.success && r.extraction.retries > 0)
}

fn percentage(results: &[ExtractionResult], predicate: impl Fn(&ExtractionResult) -> bool) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let count = results.iter().filter(|r| predicate(r)).count();
    count as f64 / results.len() as f64 * 100.0
}

// --- Genre Accuracy vs the Dataset Label ---

/// Per-title detail for the genre-accuracy comparison.
#[derive(Debug, Clone, Serialize)]
pub struct GenreComparison {
    pub title: String,
    pub extracted: Vec<String>,
    pub actual: Vec<String>,
    pub matched: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreAccuracy {
    /// % of comparable results whose genres intersect the dataset label.
    pub accuracy: f64,
    pub matches: usize,
    pub total: usize,
    pub details: Vec<GenreComparison>,
}

/// Compares extracted genres against the dataset's comma-separated genre
/// label, case-folded on both sides. A match is any set intersection.
/// Successful results without a dataset row for their title are excluded
/// from the denominator, not counted as failures.
pub fn genre_accuracy(results: &[ExtractionResult], rows: &[DatasetRow]) -> GenreAccuracy {
    let mut matches = 0;
    let mut total = 0;
    let mut details = Vec::new();

    for result in results {
        let Some(metadata) = successful_metadata(result) else {
            continue;
        };
        let Some(row) = rows.iter().find(|row| row.title == result.title) else {
            continue;
        };

        let extracted: Vec<String> = metadata.genres.iter().map(|g| g.to_lowercase()).collect();
        let actual: Vec<String> = row
            .genre_label
            .to_lowercase()
            .split(',')
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();

        let extracted_set: HashSet<&String> = extracted.iter().collect();
        let matched = actual.iter().any(|g| extracted_set.contains(g));

        if matched {
            matches += 1;
        }
        total += 1;

        details.push(GenreComparison {
            title: result.title.clone(),
            extracted,
            actual,
            matched,
        });
    }

    GenreAccuracy {
        accuracy: if total > 0 {
            matches as f64 / total as f64 * 100.0
        } else {
            0.0
        },
        matches,
        total,
        details,
    }
}

// --- Manual Accuracy vs the Curated Annotations ---

/// Jaccard similarity of two case-folded string sets: intersection size over
/// union size. Two empty sets agree vacuously and score 1.0.
pub fn jaccard(extracted: &[String], expected: &[String]) -> f64 {
    let ext: HashSet<String> = extracted.iter().map(|s| s.to_lowercase()).collect();
    let exp: HashSet<String> = expected.iter().map(|s| s.to_lowercase()).collect();
    if ext.is_empty() && exp.is_empty() {
        return 1.0;
    }
    let intersection = ext.intersection(&exp).count() as f64;
    let union = ext.union(&exp).count() as f64;
    intersection / union
}

fn exact_match(extracted: &str, expected: &str) -> f64 {
    if extracted.to_lowercase() == expected.to_lowercase() {
        1.0
    } else {
        0.0
    }
}

/// Raw 0..1 scores for one compared annotation.
#[derive(Debug, Clone, Serialize)]
pub struct ItemScores {
    pub genres: f64,
    pub themes: f64,
    pub mood: f64,
    pub target_audience: f64,
    pub content_warnings: f64,
}

/// Per-item audit record for the manual-accuracy comparison.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationComparison {
    pub title: String,
    pub extracted: ContentMetadata,
    pub expected: ContentMetadata,
    pub scores: ItemScores,
}

/// Accumulated per-field score lists across compared annotations.
#[derive(Debug, Clone, Default)]
pub struct FieldScoreLists {
    pub genres: Vec<f64>,
    pub themes: Vec<f64>,
    pub mood: Vec<f64>,
    pub target_audience: Vec<f64>,
    pub content_warnings: Vec<f64>,
}

impl FieldScoreLists {
    fn push(&mut self, scores: &ItemScores) {
        self.genres.push(scores.genres);
        self.themes.push(scores.themes);
        self.mood.push(scores.mood);
        self.target_audience.push(scores.target_audience);
        self.content_warnings.push(scores.content_warnings);
    }

    /// Per-field means in percent, plus the overall score.
    ///
    /// The overall score is the unweighted mean of the five field averages:
    /// each field contributes equally no matter how many items it aggregated.
    /// A field with no samples averages 0.0 and still weighs one fifth.
    pub fn averages(&self) -> FieldScores {
        let genres = mean_percent(&self.genres);
        let themes = mean_percent(&self.themes);
        let mood = mean_percent(&self.mood);
        let target_audience = mean_percent(&self.target_audience);
        let content_warnings = mean_percent(&self.content_warnings);
        let overall = (genres + themes + mood + target_audience + content_warnings) / 5.0;
        FieldScores {
            genres,
            themes,
            mood,
            target_audience,
            content_warnings,
            overall,
        }
    }
}

fn mean_percent(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64 * 100.0
}

/// Per-field average scores in percent.
#[derive(Debug, Clone, Serialize)]
pub struct FieldScores {
    pub genres: f64,
    pub themes: f64,
    pub mood: f64,
    pub target_audience: f64,
    pub content_warnings: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManualAccuracy {
    pub average_scores: FieldScores,
    pub details: Vec<AnnotationComparison>,
}

/// Compares extraction results against the curated annotations.
///
/// `genres`, `themes`, and `content_warnings` score by Jaccard similarity;
/// `mood` and `target_audience` by case-insensitive exact match. Annotations
/// with no matching successful result are excluded from every field.
pub fn manual_accuracy(results: &[ExtractionResult], annotations: &[Annotation]) -> ManualAccuracy {
    let mut field_scores = FieldScoreLists::default();
    let mut details = Vec::new();

    for annotation in annotations {
        let Some(result) = results.iter().find(|r| r.title == annotation.title) else {
            continue;
        };
        let Some(extracted) = successful_metadata(result) else {
            continue;
        };

        let expected = &annotation.expected;
        let scores = ItemScores {
            genres: jaccard(&extracted.genres, &expected.genres),
            themes: jaccard(&extracted.themes, &expected.themes),
            mood: exact_match(&extracted.mood, &expected.mood),
            target_audience: exact_match(&extracted.target_audience, &expected.target_audience),
            content_warnings: jaccard(&extracted.content_warnings, &expected.content_warnings),
        };

        field_scores.push(&scores);
        details.push(AnnotationComparison {
            title: annotation.title.clone(),
            extracted: extracted.clone(),
            expected: expected.clone(),
            scores,
        });
    }

    ManualAccuracy {
        average_scores: field_scores.averages(),
        details,
    }
}

fn successful_metadata(result: &ExtractionResult) -> Option<&ContentMetadata> {
    if result.extraction.success {
        result.extraction.metadata.as_ref()
    } else {
        None
    }
}

// --- Evaluation Report ---

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetrics {
    pub schema_compliance_first_try: f64,
    pub overall_success_rate: f64,
    pub retry_rate: f64,
    pub genre_accuracy: f64,
    pub manual_accuracy: FieldScores,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub title: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub timestamp: String,
    pub total_samples: usize,
    pub metrics: ReportMetrics,
    pub failure_count: usize,
    pub failures: Vec<FailureEntry>,
}

/// Runs the full evaluation pipeline.
///
/// Extracts the annotated examples, then a seeded random sample of
/// `n_samples` labeled dataset rows, computes all metrics, and partitions
/// failures. When `report_path` is given, the report is written there as
/// pretty-printed JSON.
pub async fn run_evaluation(
    extractor: &Extractor,
    rows: &[DatasetRow],
    annotations: &[Annotation],
    n_samples: usize,
    report_path: Option<&Path>,
) -> Result<EvaluationReport, EvaluationError> {
    info!("Evaluating on {} annotated examples.", annotations.len());
    let annotated_items: Vec<CatalogItem> = annotations
        .iter()
        .map(|a| CatalogItem {
            title: a.title.clone(),
            description: a.description.clone(),
        })
        .collect();
    let annotated_results = extractor.extract_batch(&annotated_items).await;

    let labeled: Vec<DatasetRow> = rows
        .iter()
        .filter(|row| !row.genre_label.is_empty())
        .cloned()
        .collect();
    let sample = dataset::sample_rows(&labeled, n_samples, SAMPLE_SEED);
    info!("Evaluating on {} sampled descriptions.", sample.len());
    let sample_items: Vec<CatalogItem> = sample.iter().map(DatasetRow::to_item).collect();
    let sample_results = extractor.extract_batch(&sample_items).await;

    let mut all_results = annotated_results.clone();
    all_results.extend(sample_results.iter().cloned());

    let genre_acc = genre_accuracy(&sample_results, rows);
    let manual_acc = manual_accuracy(&annotated_results, annotations);

    let failures: Vec<FailureEntry> = all_results
        .iter()
        .filter(|r| !r.extraction.success)
        .map(|r| FailureEntry {
            title: r.title.clone(),
            error: r.extraction.error.clone().unwrap_or_default(),
        })
        .collect();

    let report = EvaluationReport {
        timestamp: Utc::now().to_rfc3339(),
        total_samples: all_results.len(),
        metrics: ReportMetrics {
            schema_compliance_first_try: schema_compliance_rate(&all_results),
            overall_success_rate: overall_success_rate(&all_results),
            retry_rate: retry_rate(&all_results),
            genre_accuracy: genre_acc.accuracy,
            manual_accuracy: manual_acc.average_scores,
        },
        failure_count: failures.len(),
        failures,
    };

    if let Some(path) = report_path {
        write_report(&report, path)?;
        info!("Report saved to {}.", path.display());
    }

    Ok(report)
}

/// Writes the report as pretty-printed JSON, creating parent directories as
/// needed.
pub fn write_report(report: &EvaluationReport, path: &Path) -> Result<(), EvaluationError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(report)?)?;
    Ok(())
}
