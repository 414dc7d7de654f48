//! # CLI Configuration
//!
//! Environment-backed configuration, read once at startup after `.env`
//! loading and passed explicitly into the core. The library itself never
//! looks anything up in the process environment.

use std::env;
use std::path::PathBuf;

const DEFAULT_DATASET_PATH: &str = "data/netflix_dataset.csv";
const DEFAULT_REPORT_PATH: &str = "data/evaluation_report.json";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// The API credential is missing; no extraction may begin.
    MissingApiKey,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingApiKey => {
                write!(f, "ANTHROPIC_API_KEY is not set. Add it to your .env file.")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The Anthropic API credential. Loaded from `ANTHROPIC_API_KEY`.
    pub api_key: String,
    /// The model to extract with. Loaded from `AI_MODEL`.
    pub model: String,
    /// The labeled dataset CSV. Loaded from `DATASET_PATH`.
    pub dataset_path: PathBuf,
    /// Where `evaluate` writes its JSON report. Loaded from `REPORT_PATH`.
    pub report_path: PathBuf,
}

/// Builds the configuration from the process environment.
///
/// Fails with [`ConfigError::MissingApiKey`] when the credential is absent,
/// so callers can exit with a clear message before any extraction starts.
pub fn get_config() -> Result<Config, ConfigError> {
    let api_key = env::var("ANTHROPIC_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    let model = env::var("AI_MODEL")
        .unwrap_or_else(|_| showmeta::providers::ai::anthropic::DEFAULT_MODEL.to_string());
    let dataset_path =
        PathBuf::from(env::var("DATASET_PATH").unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string()));
    let report_path =
        PathBuf::from(env::var("REPORT_PATH").unwrap_or_else(|_| DEFAULT_REPORT_PATH.to_string()));

    Ok(Config {
        api_key,
        model,
        dataset_path,
        report_path,
    })
}
