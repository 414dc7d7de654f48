use thiserror::Error;

/// Errors from the AI provider layer.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Failed to send request to the model API: {0}")]
    Request(reqwest::Error),
    #[error("Failed to deserialize model API response: {0}")]
    Deserialization(reqwest::Error),
    #[error("Model API returned an error: {0}")]
    Api(String),
    #[error("Model response contained no text content")]
    EmptyResponse,
    #[error("API key is missing")]
    MissingApiKey,
}

/// The cleaned model response was not syntactically valid JSON.
///
/// Carries the original syntax error and the cleaned text so both can be
/// echoed back to the model in the corrective retry prompt.
#[derive(Error, Debug)]
#[error("Invalid JSON response: {source}. Response was: {cleaned}")]
pub struct ParseError {
    pub source: serde_json::Error,
    pub cleaned: String,
}

/// The parsed response did not match the metadata record shape.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("response must be a JSON object")]
    NotAnObject,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Everything that can go wrong during a single call-parse-validate attempt.
///
/// The extraction engine inspects this to decide whether the next attempt
/// should use the corrective retry prompt (the model produced malformed
/// output) or re-send the previous prompt unchanged (the call itself failed).
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
