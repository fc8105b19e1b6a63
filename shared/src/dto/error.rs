//! # Error DTOs

use serde::{Deserialize, Serialize};

/// Error body returned by the backend on non-success responses.
///
/// `detail` is usually a string, but validation failures return a structured
/// value, so it is kept as raw JSON and narrowed with [`ErrorResponse::message`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Human-readable description, if the backend provided one.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Null => None,
            serde_json::Value::String(_) => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let err: ErrorResponse = serde_json::from_str(r#"{"detail":"Insufficient gems"}"#).unwrap();
        assert_eq!(err.message().as_deref(), Some("Insufficient gems"));
    }

    #[test]
    fn test_missing_detail() {
        let err: ErrorResponse = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert_eq!(err.message(), None);
    }

    #[test]
    fn test_structured_detail_is_stringified() {
        let err: ErrorResponse = serde_json::from_str(r#"{"detail":[{"msg":"field required"}]}"#).unwrap();
        assert!(err.message().unwrap().contains("field required"));
    }
}
