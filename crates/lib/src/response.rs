//! # Model Response Parsing
//!
//! Converts raw model text into a loosely-typed JSON value, tolerating the
//! formatting noise models add despite being told not to.

use crate::errors::ParseError;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

// The model sometimes wraps output in fenced code blocks at arbitrary
// positions, so markers are stripped anywhere in the text, not only at the
// boundaries.
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*").expect("code fence pattern is valid"));

/// Strips fenced code-block markers and surrounding whitespace from a raw
/// model response.
pub fn clean_response(response: &str) -> String {
    CODE_FENCE.replace_all(response, "").trim().to_string()
}

/// Cleans a raw model response and parses it as JSON.
///
/// Fails with [`ParseError`] when the cleaned text is not syntactically
/// valid JSON, including truncated payloads. The error carries the cleaned
/// text for diagnostics and for the corrective retry prompt.
pub fn parse_response(response: &str) -> Result<Value, ParseError> {
    let cleaned = clean_response(response);
    serde_json::from_str(&cleaned).map_err(|source| ParseError { source, cleaned })
}
