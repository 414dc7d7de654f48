//! # showmeta
//!
//! This crate extracts structured catalog metadata (genres, themes, mood,
//! target audience, content warnings) from movie/show descriptions using a
//! configurable AI provider, validates the model's JSON output against the
//! metadata record shape, retries with a corrective prompt on malformed
//! output, and scores extraction quality against ground truth.

pub mod annotations;
pub mod dataset;
pub mod errors;
pub mod evaluation;
pub mod extractor;
pub mod prompts;
pub mod providers;
pub mod response;
pub mod schema;

pub use errors::{AttemptError, ParseError, ProviderError, ValidationError};
pub use extractor::{Extraction, ExtractionResult, Extractor};
pub use schema::ContentMetadata;
