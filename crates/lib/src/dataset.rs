//! # Labeled Dataset Loading
//!
//! Reads the catalog CSV (`Title`, `Description`, `Type` columns) that
//! supplies extraction inputs and the genre labels used by the evaluation
//! scorer, plus deterministic sampling for evaluation runs.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Custom error types for dataset loading.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse dataset CSV: {0}")]
    Parse(#[from] csv::Error),
    #[error("Missing required column: '{0}'")]
    MissingColumn(&'static str),
}

/// One extraction input: a title and its description.
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub title: String,
    pub description: String,
}

/// One row of the labeled dataset. `genre_label` is the raw `Type` column,
/// possibly a comma-separated list, possibly empty.
#[derive(Debug, Clone)]
pub struct DatasetRow {
    pub title: String,
    pub description: String,
    pub genre_label: String,
}

impl DatasetRow {
    pub fn to_item(&self) -> CatalogItem {
        CatalogItem {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// Loads the dataset CSV, matching the `Title`, `Description`, and `Type`
/// headers case-insensitively. Rows with an empty title or description are
/// skipped.
pub fn load_dataset(path: &Path) -> Result<Vec<DatasetRow>, DatasetError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    let find_idx = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let title_idx = find_idx("Title").ok_or(DatasetError::MissingColumn("Title"))?;
    let description_idx =
        find_idx("Description").ok_or(DatasetError::MissingColumn("Description"))?;
    let type_idx = find_idx("Type").ok_or(DatasetError::MissingColumn("Type"))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let title = record.get(title_idx).unwrap_or("").trim().to_string();
        let description = record.get(description_idx).unwrap_or("").trim().to_string();
        let genre_label = record.get(type_idx).unwrap_or("").trim().to_string();

        if title.is_empty() || description.is_empty() {
            warn!("Skipping row with empty title or description.");
            continue;
        }

        rows.push(DatasetRow {
            title,
            description,
            genre_label,
        });
    }

    info!("Loaded {} rows from dataset at {}.", rows.len(), path.display());
    Ok(rows)
}

/// Draws `n` rows with a seeded RNG so evaluation runs are repeatable.
/// Returns all rows when `n` is at least the row count.
pub fn sample_rows(rows: &[DatasetRow], n: usize, seed: u64) -> Vec<DatasetRow> {
    let mut rng = StdRng::seed_from_u64(seed);
    rows.choose_multiple(&mut rng, n).cloned().collect()
}
