/// Error classification: heterogeneous API failures into one `CliError::Api`.
use serde_json::Value;

use super::CliError;
use crate::api::ApiError;

/// Pass a successful result through; classify a failure.
///
/// # Errors
///
/// Returns `CliError::Api` carrying the extracted detail for any `ApiError`.
pub fn classify<T>(result: Result<T, ApiError>) -> Result<T, CliError> {
    result.map_err(classify_error)
}

/// Classify a single API failure.
#[must_use]
pub fn classify_error(err: ApiError) -> CliError {
    let detail = match &err {
        ApiError::RateLimited { body } => body_detail(body),
        ApiError::RequestFailed { status, body } => {
            if body.is_null() {
                format!("request failed with status {status}")
            } else {
                body_detail(body)
            }
        }
        ApiError::Transport(message) => message.clone(),
    };
    tracing::debug!(error = %err, "classified API failure");
    CliError::Api { detail }
}

/// The `detail` field of a structured body, or the whole body if it has none.
fn body_detail(body: &Value) -> String {
    match body.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => match body {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}
