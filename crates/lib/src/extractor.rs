//! # Extraction Engine
//!
//! Orchestrates the call-parse-validate cycle for one description with a
//! bounded retry budget, and applies it sequentially over a batch of catalog
//! items. All failure is captured in the result envelope; `extract` never
//! returns an error to the caller.

use crate::{
    dataset::CatalogItem,
    errors::AttemptError,
    prompts,
    providers::ai::AiProvider,
    response,
    schema::{self, ContentMetadata},
};
use serde::Serialize;
use tracing::{info, warn};

/// Extra attempts allowed after the first, i.e. 3 attempts total.
const MAX_RETRIES: u32 = 2;
/// Output-length cap passed to the provider.
const MAX_TOKENS: u32 = 500;
/// Deterministic decoding.
const TEMPERATURE: f32 = 0.0;

/// The envelope returned for one `extract` call.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    /// The validated record. Present iff `success`.
    pub metadata: Option<ContentMetadata>,
    /// The last raw text any model call produced. `None` only when no
    /// attempt returned text at all (e.g. every call failed in transport).
    pub raw_response: Option<String>,
    /// Retry attempts consumed; 0 means first-try success.
    pub retries: u32,
    pub success: bool,
    /// Human-readable failure description. Present iff not `success`.
    pub error: Option<String>,
}

/// A batch item's result: the original input carried through for reporting,
/// plus the extraction envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extraction: Extraction,
}

/// Runs metadata extraction against an AI provider with bounded retry.
#[derive(Debug)]
pub struct Extractor {
    provider: Box<dyn AiProvider>,
    max_retries: u32,
    max_tokens: u32,
    temperature: f32,
}

impl Extractor {
    /// Creates an extractor with the default retry budget (2), output cap
    /// (500 tokens), and deterministic decoding.
    pub fn new(provider: Box<dyn AiProvider>) -> Self {
        Self {
            provider,
            max_retries: MAX_RETRIES,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    /// Extracts metadata from one description.
    ///
    /// Attempt 0 uses the extraction prompt. When an attempt fails on
    /// parsing or validation, the next attempt switches to the corrective
    /// retry template built from the error message. A provider failure also
    /// consumes an attempt from the same budget, but re-sends the previous
    /// prompt unchanged since there is no model output to correct.
    pub async fn extract(&self, description: &str) -> Extraction {
        let mut prompt = prompts::build_extraction_prompt(description, schema::SCHEMA_DESCRIPTION);
        let mut last_error: Option<AttemptError> = None;
        let mut last_raw: Option<String> = None;

        for attempt in 0..=self.max_retries {
            match self.run_attempt(&prompt, &mut last_raw).await {
                Ok(metadata) => {
                    return Extraction {
                        metadata: Some(metadata),
                        raw_response: last_raw,
                        retries: attempt,
                        success: true,
                        error: None,
                    };
                }
                Err(err) => {
                    warn!(
                        "Attempt {}/{} failed: {err}",
                        attempt + 1,
                        self.max_retries + 1
                    );
                    if attempt < self.max_retries
                        && matches!(err, AttemptError::Parse(_) | AttemptError::Validation(_))
                    {
                        prompt = prompts::build_retry_prompt(&err.to_string(), description);
                    }
                    last_error = Some(err);
                }
            }
        }

        Extraction {
            metadata: None,
            raw_response: last_raw,
            retries: self.max_retries,
            success: false,
            error: last_error.map(|err| err.to_string()),
        }
    }

    /// One call-parse-validate cycle. Records the raw response text into
    /// `last_raw` as soon as the model call returns it, so the envelope
    /// keeps the last text obtained even when parsing or validation fails.
    async fn run_attempt(
        &self,
        prompt: &str,
        last_raw: &mut Option<String>,
    ) -> Result<ContentMetadata, AttemptError> {
        let raw = self
            .provider
            .generate(prompt, self.max_tokens, self.temperature)
            .await?;
        *last_raw = Some(raw.clone());
        let value = response::parse_response(&raw)?;
        Ok(schema::validate_metadata(&value)?)
    }

    /// Applies `extract` to an ordered sequence of catalog items,
    /// sequentially, producing one result per item in input order.
    ///
    /// Items are independent: a failure on one never aborts the batch.
    /// Calls are issued one at a time as a deliberate throttling choice
    /// toward the rate-limited provider.
    pub async fn extract_batch(&self, items: &[CatalogItem]) -> Vec<ExtractionResult> {
        let mut results = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            info!("[{}/{}] Extracting: {}", i + 1, items.len(), item.title);
            let extraction = self.extract(&item.description).await;
            if extraction.success {
                info!("  Success (retries: {})", extraction.retries);
            } else {
                warn!(
                    "  FAILED: {}",
                    extraction.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(ExtractionResult {
                title: item.title.clone(),
                description: item.description.clone(),
                extraction,
            });
        }
        results
    }
}
