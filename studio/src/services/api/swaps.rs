//! # Swap Endpoints
//!
//! Source upload, task creation, status reads and history.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use shared::{CreateSwapRequest, SwapTask, UploadResponse};

use super::client::ApiClient;
use crate::core::{AppError, Result};

/// Message for any rejected upload.
pub const UPLOAD_FAILED: &str = "File upload failed";

/// Upload the source face as the multipart field `file`.
///
/// Any non-success status reads [`UPLOAD_FAILED`] regardless of the body.
#[tracing::instrument(skip(client, path, token), fields(path = %path.display()))]
pub async fn upload_source(client: &ApiClient, path: &Path, token: &str) -> Result<UploadResponse> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Upload(format!("Could not read {}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("source")
        .to_string();

    tracing::info!(bytes = bytes.len(), %file_name, "Uploading source face");

    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(path))
        .map_err(|e| AppError::Upload(e.to_string()))?;
    let form = Form::new().part("file", part);

    let response = client
        .request(Method::POST, "/swaps/upload", Some(token))
        .multipart(form)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Upload network error");
            AppError::Network(e.to_string())
        })?;

    if !response.status().is_success() {
        tracing::warn!(status = response.status().as_u16(), "Upload rejected");
        return Err(AppError::Upload(UPLOAD_FAILED.to_string()));
    }

    response.json::<UploadResponse>().await.map_err(AppError::from)
}

/// Queue a swap task. The backend debits gems here and answers 402 when the
/// balance is short.
#[tracing::instrument(skip(client, token), fields(kind = %request.kind))]
pub async fn create_swap(client: &ApiClient, request: &CreateSwapRequest, token: &str) -> Result<SwapTask> {
    let task: SwapTask = client
        .send(client.request(Method::POST, "/swaps/", Some(token)).json(request))
        .await?;
    tracing::info!(task_id = task.id, status = ?task.status, "Swap task created");
    Ok(task)
}

pub async fn get_swap(client: &ApiClient, id: i64, token: &str) -> Result<SwapTask> {
    client
        .send(client.request(Method::GET, &format!("/swaps/{}", id), Some(token)))
        .await
}

/// Past tasks in the order the backend returns them (oldest first).
pub async fn swap_history(client: &ApiClient, token: &str) -> Result<Vec<SwapTask>> {
    client
        .send(client.request(Method::GET, "/swaps/history", Some(token)))
        .await
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
