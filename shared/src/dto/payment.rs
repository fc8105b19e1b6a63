//! # Payment DTOs
//!
//! Two checkout flows exist:
//!
//! - **Hosted redirect**: `POST /payments/create-checkout-session` returns a provider URL
//! - **Embedded widget**: `POST /payments/create-order` returns an order the provider
//!   widget is opened with; the widget's completion data is sent to
//!   `POST /payments/verify-payment`

use serde::{Deserialize, Serialize};

/// Request body for `POST /payments/create-checkout-session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    pub package_name: String,
    pub gems: i64,
    /// Price in US cents, e.g. 2900 for $29
    pub price_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionResponse {
    pub url: String,
}

/// Request body for `POST /payments/create-order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub package_name: String,
    pub gems: i64,
    pub price_inr: i64,
}

/// Provider order issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    /// Amount in the currency's minor unit
    pub amount: i64,
    pub currency: String,
}

/// Request body for `POST /payments/verify-payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub provider_order_id: String,
    pub provider_payment_id: String,
    pub provider_signature: String,
    pub gems: i64,
}

/// Response body of `POST /payments/verify-payment`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub new_balance: Option<i64>,
}

impl VerifyPaymentResponse {
    /// The backend signals success either with a status or with the new balance.
    pub fn is_success(&self) -> bool {
        self.new_balance.is_some()
            || matches!(self.status.as_deref(), Some("success") | Some("ok") | Some("verified"))
    }
}
