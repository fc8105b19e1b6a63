//! # API Client
//!
//! Main HTTP client for backend API communication.
//!
//! All endpoint modules build on [`ApiClient::send`], which attaches the bearer
//! token, checks the status and turns error bodies into [`AppError`]s.

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    CheckoutSessionRequest, CheckoutSessionResponse, CreateOrderRequest, CreateSwapRequest,
    ErrorResponse, GemBalance, OrderResponse, SwapTask, Template, UploadResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};

use crate::config::{StudioConfig, DEFAULT_API_URL};
use crate::core::service::ApiService;
use crate::core::{AppError, Result};

/// HTTP client for communicating with the face swap backend.
///
/// Keeps one connection pool for the lifetime of the app.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with the default 10 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::with_timeout(config.api_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/templates/`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a prepared request and decode a successful JSON body.
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "API request failed to send");
            AppError::Network(e.to_string())
        })?;

        let response = Self::check_status(response).await?;
        response.json::<T>().await.map_err(AppError::from)
    }

    /// Pass successful responses through, map everything else to an error.
    pub(crate) async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = describe_error_body(status, &body);
        tracing::debug!(status = status.as_u16(), %message, "API error response");

        Err(match status {
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            _ => AppError::Api(message),
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Message for a non-success response body.
///
/// An unparseable body reads "Unknown error". A JSON body without a usable
/// `detail` falls back to the status code.
pub fn describe_error_body(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error) => error
            .message()
            .unwrap_or_else(|| format!("API request failed with status {}", status.as_u16())),
        Err(_) => "Unknown error".to_string(),
    }
}

#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn list_templates(&self) -> Result<Vec<Template>> {
        super::templates::list_templates(self).await
    }

    async fn get_template(&self, id: i64) -> Result<Template> {
        super::templates::get_template(self, id).await
    }

    async fn get_balance(&self, token: &str) -> Result<GemBalance> {
        super::users::get_balance(self, token).await
    }

    async fn swap_history(&self, token: &str) -> Result<Vec<SwapTask>> {
        super::swaps::swap_history(self, token).await
    }

    async fn upload_source(&self, path: &Path, token: &str) -> Result<UploadResponse> {
        super::swaps::upload_source(self, path, token).await
    }

    async fn create_swap(&self, request: CreateSwapRequest, token: &str) -> Result<SwapTask> {
        super::swaps::create_swap(self, &request, token).await
    }

    async fn get_swap(&self, id: i64, token: &str) -> Result<SwapTask> {
        super::swaps::get_swap(self, id, token).await
    }

    async fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
        token: &str,
    ) -> Result<CheckoutSessionResponse> {
        super::payments::create_checkout_session(self, &request, token).await
    }

    async fn create_order(&self, request: CreateOrderRequest, token: &str) -> Result<OrderResponse> {
        super::payments::create_order(self, &request, token).await
    }

    async fn verify_payment(
        &self,
        request: VerifyPaymentRequest,
        token: &str,
    ) -> Result<VerifyPaymentResponse> {
        super::payments::verify_payment(self, &request, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::stub::StubServer;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:8000/api/v1/");
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.url("/templates/"), "http://localhost:8000/api/v1/templates/");
    }

    #[test]
    fn test_error_body_uses_detail() {
        let msg = describe_error_body(StatusCode::PAYMENT_REQUIRED, r#"{"detail":"Insufficient gems"}"#);
        assert_eq!(msg, "Insufficient gems");
    }

    #[test]
    fn test_error_body_without_detail_uses_status() {
        let msg = describe_error_body(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#);
        assert_eq!(msg, "API request failed with status 500");
    }

    #[test]
    fn test_unparseable_error_body() {
        let msg = describe_error_body(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>");
        assert_eq!(msg, "Unknown error");
        assert_eq!(describe_error_body(StatusCode::BAD_GATEWAY, ""), "Unknown error");
    }

    #[tokio::test]
    async fn test_send_decodes_success_body() {
        let server = StubServer::respond(200, r#"{"gem_balance": 12}"#).await;
        let client = ApiClient::new(server.base_url.clone());

        let balance: GemBalance = client
            .send(client.request(Method::GET, "/users/balance", Some("tok")))
            .await
            .unwrap();
        assert_eq!(balance.gem_balance, 12);

        let request = server.request().await;
        assert!(request.starts_with("GET /api/v1/users/balance HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer tok"));
    }

    #[tokio::test]
    async fn test_public_request_has_no_authorization() {
        let server = StubServer::respond(200, "[]").await;
        let client = ApiClient::new(server.base_url.clone());

        let templates: Vec<Template> = client
            .send(client.request(Method::GET, "/templates/", None))
            .await
            .unwrap();
        assert!(templates.is_empty());

        let request = server.request().await;
        assert!(!request.to_ascii_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_not_found_status_maps_to_not_found() {
        let server = StubServer::respond(404, r#"{"detail":"Swap not found"}"#).await;
        let client = ApiClient::new(server.base_url.clone());

        let err = client
            .send::<SwapTask>(client.request(Method::GET, "/swaps/3", Some("tok")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Swap not found"));
    }

    #[tokio::test]
    async fn test_error_status_without_detail_reports_code() {
        let server = StubServer::respond(500, r#"{"error":"boom"}"#).await;
        let client = ApiClient::new(server.base_url.clone());

        let err = client
            .send::<SwapTask>(client.request(Method::GET, "/swaps/3", Some("tok")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Api(msg) if msg == "API request failed with status 500"));
    }
}
