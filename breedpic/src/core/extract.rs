//! Pull the image URL out of a decoded API response.

use serde_json::Value;

use crate::error::PipelineError;

/// Top-level key holding the image URL.
pub const MESSAGE_FIELD: &str = "message";

/// Read the top-level `message` string.
///
/// A missing, null, or non-string `message` fails with
/// [`PipelineError::MissingField`] so nothing downstream writes a placeholder.
pub fn extract_message(payload: &Value) -> Result<String, PipelineError> {
    payload
        .get(MESSAGE_FIELD)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(PipelineError::MissingField)
}
