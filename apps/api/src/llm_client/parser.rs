//! Response parser: pulls the JSON object out of a free-text model reply.
//!
//! Models wrap their JSON in prose or code fences. The object is taken to span
//! from the first `{` to the last `}`; nothing else about the reply is trusted.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unable to parse AI response: no JSON object found")]
    NoJsonObject,

    #[error("Unable to parse AI response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Returns the outermost brace-delimited region of `raw`, if any.
pub fn locate_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Locates the embedded JSON object and deserializes it into `T`.
pub fn parse_json_object<T: DeserializeOwned>(raw: &str) -> Result<T, ParseError> {
    let candidate = locate_json_object(raw).ok_or(ParseError::NoJsonObject)?;
    Ok(serde_json::from_str(candidate)?)
}
