//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.

use std::path::Path;

use async_trait::async_trait;
use shared::{
    CheckoutSessionRequest, CheckoutSessionResponse, CreateOrderRequest, CreateSwapRequest,
    GemBalance, OrderResponse, SwapTask, Template, UploadResponse, VerifyPaymentRequest,
    VerifyPaymentResponse,
};

use super::error::Result;

/// Trait for backend API operations.
///
/// [`crate::services::api::ApiClient`] is the production implementation. Tests use the
/// `MockApiService` generated by `mockall`.
///
/// Every authenticated call takes the session's bearer token explicitly. The
/// service itself holds no session state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiService: Send + Sync {
    /// `GET /templates/`
    async fn list_templates(&self) -> Result<Vec<Template>>;

    /// `GET /templates/{id}`
    async fn get_template(&self, id: i64) -> Result<Template>;

    /// `GET /users/balance`
    async fn get_balance(&self, token: &str) -> Result<GemBalance>;

    /// `GET /swaps/history`
    async fn swap_history(&self, token: &str) -> Result<Vec<SwapTask>>;

    /// `POST /swaps/upload` (multipart)
    async fn upload_source(&self, path: &Path, token: &str) -> Result<UploadResponse>;

    /// `POST /swaps/`
    async fn create_swap(&self, request: CreateSwapRequest, token: &str) -> Result<SwapTask>;

    /// `GET /swaps/{id}`
    async fn get_swap(&self, id: i64, token: &str) -> Result<SwapTask>;

    /// `POST /payments/create-checkout-session`
    async fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
        token: &str,
    ) -> Result<CheckoutSessionResponse>;

    /// `POST /payments/create-order`
    async fn create_order(&self, request: CreateOrderRequest, token: &str) -> Result<OrderResponse>;

    /// `POST /payments/verify-payment`
    async fn verify_payment(
        &self,
        request: VerifyPaymentRequest,
        token: &str,
    ) -> Result<VerifyPaymentResponse>;
}
