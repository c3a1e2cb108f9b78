//! Values the scenario reads back from responses.

use crate::error::HarnessError;
use auth_contract::ApiResponse;
use serde_json::Value;
use tracing::warn;

/// Id used when a response did not carry the one the scenario needs.
pub const PLACEHOLDER_ID: &str = "0";

/// Text of a JSON scalar as it is spliced into later payloads and bodies.
///
/// Strings yield their raw content, numbers and booleans their JSON text.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse(response: &ApiResponse, endpoint: &str) -> Result<Value, HarnessError> {
    response
        .json::<Value>()
        .map_err(|e| HarnessError::unexpected_payload(endpoint, format!("body is not JSON: {e}")))
}

/// Scalar at a JSON pointer, e.g. `/0/1`.
///
/// # Errors
///
/// Returns [`HarnessError::UnexpectedPayload`] if the body is not JSON or
/// has no scalar there.
pub fn json_scalar(response: &ApiResponse, endpoint: &str, pointer: &str) -> Result<String, HarnessError> {
    let body = parse(response, endpoint)?;
    body.pointer(pointer)
        .and_then(scalar_text)
        .ok_or_else(|| HarnessError::unexpected_payload(endpoint, format!("no scalar at {pointer}")))
}

/// Scalar in the given column of the last row of a JSON array of rows.
///
/// # Errors
///
/// Returns [`HarnessError::UnexpectedPayload`] if the body is not a
/// non-empty array or the row has no scalar in that column.
pub fn last_row_scalar(response: &ApiResponse, endpoint: &str, column: usize) -> Result<String, HarnessError> {
    let body = parse(response, endpoint)?;
    body.as_array()
        .and_then(|rows| rows.last())
        .and_then(|row| row.get(column))
        .and_then(scalar_text)
        .ok_or_else(|| {
            HarnessError::unexpected_payload(endpoint, format!("no last row with column {column}"))
        })
}

/// Fall back to a placeholder for payload errors; pass fatal errors on.
///
/// # Errors
///
/// Returns the original error if it is fatal.
pub fn or_placeholder(result: Result<String, HarnessError>, placeholder: &str) -> Result<String, HarnessError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if !e.is_fatal() => {
            warn!(error = %e, placeholder, "Using placeholder value");
            Ok(placeholder.to_string())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!(42)), Some("42".to_string()));
        assert_eq!(scalar_text(&json!("2025-01-01 10:00:00")), Some("2025-01-01 10:00:00".to_string()));
        assert_eq!(scalar_text(&json!(null)), None);
        assert_eq!(scalar_text(&json!([1])), None);
    }

    #[test]
    fn test_last_row() {
        let response = ApiResponse::new(200, "[[3,\"old\"],[9,\"tester_intezmeny\"]]");
        assert_eq!(last_row_scalar(&response, "/get_intezmenys", 0).unwrap(), "9");

        let empty = ApiResponse::new(200, "[]");
        assert!(matches!(
            last_row_scalar(&empty, "/get_intezmenys", 0),
            Err(HarnessError::UnexpectedPayload { .. })
        ));
    }

    #[test]
    fn test_pointer() {
        let response = ApiResponse::new(200, "[12,\"tester\",\"tester_teacher@test.com\",\"123456789012345\"]");
        assert_eq!(json_scalar(&response, "/user/profile", "/0").unwrap(), "12");
        assert!(json_scalar(&ApiResponse::new(403, "Unauthorised"), "/user/profile", "/0").is_err());
    }

    #[test]
    fn test_placeholder_only_for_payload_errors() {
        let payload_error = Err(HarnessError::unexpected_payload("/user/profile", "no uid"));
        assert_eq!(or_placeholder(payload_error, PLACEHOLDER_ID).unwrap(), "0");

        let fatal = Err(HarnessError::Transport(rust_common::PlatformError::timeout("slow")));
        assert!(or_placeholder(fatal, PLACEHOLDER_ID).is_err());
    }
}
