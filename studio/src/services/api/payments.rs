//! # Payment Endpoints
//!
//! Hosted checkout sessions, provider orders for the embedded widget, and
//! completion verification.

use reqwest::Method;
use shared::{
    CheckoutSessionRequest, CheckoutSessionResponse, CreateOrderRequest, OrderResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};

use super::client::ApiClient;
use crate::core::Result;

#[tracing::instrument(skip(client, token), fields(package = %request.package_name))]
pub async fn create_checkout_session(
    client: &ApiClient,
    request: &CheckoutSessionRequest,
    token: &str,
) -> Result<CheckoutSessionResponse> {
    client
        .send(
            client
                .request(Method::POST, "/payments/create-checkout-session", Some(token))
                .json(request),
        )
        .await
}

#[tracing::instrument(skip(client, token), fields(package = %request.package_name))]
pub async fn create_order(
    client: &ApiClient,
    request: &CreateOrderRequest,
    token: &str,
) -> Result<OrderResponse> {
    client
        .send(client.request(Method::POST, "/payments/create-order", Some(token)).json(request))
        .await
}

#[tracing::instrument(skip(client, token, request), fields(order = %request.provider_order_id))]
pub async fn verify_payment(
    client: &ApiClient,
    request: &VerifyPaymentRequest,
    token: &str,
) -> Result<VerifyPaymentResponse> {
    client
        .send(client.request(Method::POST, "/payments/verify-payment", Some(token)).json(request))
        .await
}
