//! # Swap DTOs
//!
//! Swap tasks are created by the client and mutated only by the backend worker.
//! The client observes progress by polling `GET /swaps/{id}`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::template::MediaKind;

/// Backend-side lifecycle of a swap task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    /// Any status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// True once the backend will no longer change the task.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Processing => "PROCESSING",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Swap task as returned by `POST /swaps/`, `GET /swaps/{id}` and `GET /swaps/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapTask {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub status: TaskStatus,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub template_url: Option<String>,
    /// Result reference, absolute or relative to the backend origin
    #[serde(default)]
    pub result_url: Option<String>,
    /// Failure reason reported by the worker
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Gems charged for this task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<i64>,
}

/// Request body for `POST /swaps/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSwapRequest {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub source_url: String,
    pub template_url: String,
}

/// Response body of `POST /swaps/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_uses_type_field() {
        let request = CreateSwapRequest {
            kind: MediaKind::Image,
            source_url: "X".to_string(),
            template_url: "T".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "IMAGE");
        assert_eq!(json["source_url"], "X");
        assert_eq!(json["template_url"], "T");
    }

    #[test]
    fn test_task_status_terminal() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Processing.is_terminal());
        assert!(!TaskStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_unknown_status_does_not_fail_parsing() {
        let body = r#"{"id":7,"type":"IMAGE","status":"RETRYING"}"#;
        let task: SwapTask = serde_json::from_str(body).unwrap();
        assert_eq!(task.status, TaskStatus::Unknown);
        assert!(task.result_url.is_none());
    }

    #[test]
    fn test_failed_task_carries_error_message() {
        let body = r#"{"id":7,"type":"VIDEO","status":"FAILED","error_message":"bad face","result_url":null}"#;
        let task: SwapTask = serde_json::from_str(body).unwrap();
        assert_eq!(task.status, TaskStatus::Failed);
        assert_eq!(task.error_message.as_deref(), Some("bad face"));
    }
}
