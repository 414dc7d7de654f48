//! # Metadata Record Schema
//!
//! Defines [`ContentMetadata`], the validated output of one extraction, the
//! statically rendered schema description embedded into prompts, and the
//! validator that turns a loosely-typed JSON value into a record.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The validated metadata extracted from one movie/show description.
///
/// Immutable once constructed; produced once per extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
    /// Applicable genres, e.g. `["Drama", "Thriller"]`. Order preserved.
    pub genres: Vec<String>,
    /// Key themes, e.g. `["family", "redemption"]`.
    pub themes: Vec<String>,
    /// Overall tone, e.g. `"dark"`, `"lighthearted"`.
    pub mood: String,
    /// Intended audience. Expected to be one of kids, teens, adults, family,
    /// but membership is prompt-level guidance, not validated here.
    pub target_audience: String,
    /// Potentially sensitive content. Empty when none apply.
    #[serde(default)]
    pub content_warnings: Vec<String>,
}

/// A human/machine-readable rendering of the record shape, appended to the
/// extraction prompt. Defined statically and passed into the prompt builder;
/// the core never introspects its own types.
pub const SCHEMA_DESCRIPTION: &str = r#"Required JSON schema: {
  "type": "object",
  "properties": {
    "genres": {
      "type": "array",
      "items": { "type": "string" },
      "description": "List of genres, e.g., ['Drama', 'Thriller']"
    },
    "themes": {
      "type": "array",
      "items": { "type": "string" },
      "description": "List of themes, e.g., ['family', 'redemption']"
    },
    "mood": {
      "type": "string",
      "description": "Overall mood, e.g., 'dark', 'lighthearted', 'suspenseful'"
    },
    "target_audience": {
      "type": "string",
      "description": "Intended audience, one of: kids, teens, adults, family"
    },
    "content_warnings": {
      "type": "array",
      "items": { "type": "string" },
      "description": "Content warnings, e.g., ['violence', 'language']. Defaults to an empty list."
    }
  },
  "required": ["genres", "themes", "mood", "target_audience"]
}"#;

/// Validates a parsed model response against the record shape.
///
/// Required fields are `genres`, `themes` (arrays of strings) and `mood`,
/// `target_audience` (strings). `content_warnings` defaults to an empty list
/// when absent. Only presence and types are checked; cardinality bounds and
/// the audience enumeration are prompt-level guidance.
pub fn validate_metadata(value: &Value) -> Result<ContentMetadata, ValidationError> {
    let map = value.as_object().ok_or(ValidationError::NotAnObject)?;

    Ok(ContentMetadata {
        genres: require_string_list(map, "genres")?,
        themes: require_string_list(map, "themes")?,
        mood: require_string(map, "mood")?,
        target_audience: require_string(map, "target_audience")?,
        content_warnings: optional_string_list(map, "content_warnings")?,
    })
}

fn string_list(items: &[Value], field: &'static str) -> Result<Vec<String>, ValidationError> {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            _ => Err(ValidationError::WrongType {
                field,
                expected: "a list of strings",
            }),
        })
        .collect()
}

fn require_string_list(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, ValidationError> {
    match map.get(field) {
        None => Err(ValidationError::MissingField(field)),
        Some(Value::Array(items)) => string_list(items, field),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "a list of strings",
        }),
    }
}

fn require_string(map: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    match map.get(field) {
        None => Err(ValidationError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn optional_string_list(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, ValidationError> {
    match map.get(field) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => string_list(items, field),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "a list of strings",
        }),
    }
}
