//! # Template Endpoints
//!
//! Public catalog reads. No session token is attached.

use reqwest::Method;
use shared::Template;

use super::client::ApiClient;
use crate::core::{AppError, Result};

/// List every template in the catalog.
#[tracing::instrument(skip(client))]
pub async fn list_templates(client: &ApiClient) -> Result<Vec<Template>> {
    let templates: Vec<Template> = client
        .send(client.request(Method::GET, "/templates/", None))
        .await?;
    tracing::debug!(count = templates.len(), "Fetched templates");
    Ok(templates)
}

/// Fetch one template. A 404 becomes `NotFound("Template not found")`.
#[tracing::instrument(skip(client))]
pub async fn get_template(client: &ApiClient, id: i64) -> Result<Template> {
    client
        .send(client.request(Method::GET, &format!("/templates/{}", id), None))
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("Template not found".to_string()),
            other => other,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::stub::StubServer;

    #[tokio::test]
    async fn test_missing_template_is_not_found() {
        let server = StubServer::respond(404, r#"{"detail":"Not Found"}"#).await;
        let client = ApiClient::new(server.base_url.clone());

        let err = get_template(&client, 7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Template not found"));

        let request = server.request().await;
        assert!(request.starts_with("GET /api/v1/templates/7 HTTP/1.1"));
        assert!(!request.to_ascii_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_list_server_error_uses_detail() {
        let server = StubServer::respond(503, r#"{"detail":"Catalog offline"}"#).await;
        let client = ApiClient::new(server.base_url.clone());

        let err = list_templates(&client).await.unwrap_err();
        assert!(matches!(err, AppError::Api(msg) if msg == "Catalog offline"));
    }
}
