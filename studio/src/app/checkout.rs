//! # Gem Checkout
//!
//! Static package catalog and the two purchase flows:
//!
//! - [`CheckoutFlow::HostedRedirect`]: create a checkout session and send the
//!   user to the provider's hosted page.
//! - [`CheckoutFlow::EmbeddedWidget`]: create a provider order, open the
//!   provider widget, then verify the completion it reports.
//!
//! Configuration picks one flow. [`CheckoutPhase`] tracks the single purchase
//! that may be in progress.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{
    CheckoutSessionRequest, CreateOrderRequest, OrderResponse, VerifyPaymentRequest,
    VerifyPaymentResponse,
};

use crate::core::service::ApiService;
use crate::core::{AppError, Result};
use crate::services::payment_widget::PaymentCompletion;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutFlow {
    #[default]
    #[serde(rename = "redirect")]
    HostedRedirect,
    #[serde(rename = "widget")]
    EmbeddedWidget,
}

impl FromStr for CheckoutFlow {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redirect" | "hosted" => Ok(CheckoutFlow::HostedRedirect),
            "widget" | "embedded" => Ok(CheckoutFlow::EmbeddedWidget),
            other => Err(AppError::Config(format!("unknown checkout flow '{}'", other))),
        }
    }
}

impl fmt::Display for CheckoutFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutFlow::HostedRedirect => write!(f, "redirect"),
            CheckoutFlow::EmbeddedWidget => write!(f, "widget"),
        }
    }
}

/// A gem package offered on the Buy Gems screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    pub name: &'static str,
    pub gems: i64,
    /// Whole US dollars.
    pub price: i64,
    /// Whole rupees, charged by the embedded widget flow.
    pub price_inr: i64,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
}

pub static PACKAGES: [Package; 3] = [
    Package {
        name: "Starter",
        gems: 10,
        price: 9,
        price_inr: 799,
        description: "Perfect for trying out",
        features: &["10 Image Swaps", "1 Video Swap", "Standard Support"],
        popular: false,
    },
    Package {
        name: "Pro",
        gems: 50,
        price: 29,
        price_inr: 2499,
        description: "Most popular choice",
        features: &["50 Image Swaps", "5 Video Swaps", "Priority Support", "HD Quality"],
        popular: true,
    },
    Package {
        name: "Elite",
        gems: 200,
        price: 79,
        price_inr: 6499,
        description: "For power users",
        features: &[
            "200 Image Swaps",
            "20 Video Swaps",
            "24/7 Support",
            "4K Quality",
            "Early Access",
        ],
        popular: false,
    },
];

impl Package {
    pub fn by_name(name: &str) -> Option<&'static Package> {
        PACKAGES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn price_cents(&self) -> i64 {
        self.price * 100
    }

    /// Price label for the active flow.
    pub fn price_label(&self, flow: CheckoutFlow) -> String {
        match flow {
            CheckoutFlow::HostedRedirect => shared::format_price(self.price, "USD"),
            CheckoutFlow::EmbeddedWidget => shared::format_price(self.price_inr, "INR"),
        }
    }

    pub fn session_request(&self) -> CheckoutSessionRequest {
        CheckoutSessionRequest {
            package_name: self.name.to_string(),
            gems: self.gems,
            price_cents: self.price_cents(),
        }
    }

    pub fn order_request(&self) -> CreateOrderRequest {
        CreateOrderRequest {
            package_name: self.name.to_string(),
            gems: self.gems,
            price_inr: self.price_inr,
        }
    }
}

/// State of the one purchase that may be in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    /// Waiting for the checkout session or provider order.
    Starting { package: &'static str },
    /// Hosted checkout page opened in the browser.
    Redirected { package: &'static str, url: String },
    /// Widget open, waiting for the completion values.
    AwaitingCompletion { package: &'static str, order: OrderResponse },
    Verifying { package: &'static str },
    Verified { gems: i64, new_balance: Option<i64> },
    Failed { message: String },
}

impl CheckoutPhase {
    /// A purchase is in flight and another one may not start.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            CheckoutPhase::Starting { .. }
                | CheckoutPhase::AwaitingCompletion { .. }
                | CheckoutPhase::Verifying { .. }
        )
    }

    pub fn package(&self) -> Option<&'static str> {
        match self {
            CheckoutPhase::Starting { package }
            | CheckoutPhase::Redirected { package, .. }
            | CheckoutPhase::AwaitingCompletion { package, .. }
            | CheckoutPhase::Verifying { package } => Some(*package),
            _ => None,
        }
    }
}

/// Create a hosted checkout session and return the page URL.
pub async fn request_hosted_session(
    api: Arc<dyn ApiService>,
    token: &str,
    package: &Package,
) -> Result<String> {
    tracing::info!(package = package.name, price_cents = package.price_cents(), "Creating checkout session");
    let session = api
        .create_checkout_session(package.session_request(), token)
        .await
        .map_err(into_payment_init)?;

    if session.url.trim().is_empty() {
        return Err(AppError::PaymentInit("checkout session has no URL".to_string()));
    }
    Ok(session.url)
}

/// Create a provider order for the embedded widget.
pub async fn request_order(
    api: Arc<dyn ApiService>,
    token: &str,
    package: &Package,
) -> Result<OrderResponse> {
    tracing::info!(package = package.name, price_inr = package.price_inr, "Creating payment order");
    api.create_order(package.order_request(), token)
        .await
        .map_err(into_payment_init)
}

/// Submit a widget completion for verification.
pub async fn verify_completion(
    api: Arc<dyn ApiService>,
    token: &str,
    package: &Package,
    completion: PaymentCompletion,
) -> Result<VerifyPaymentResponse> {
    completion.validate()?;

    let request = VerifyPaymentRequest {
        provider_order_id: completion.order_id,
        provider_payment_id: completion.payment_id,
        provider_signature: completion.signature,
        gems: package.gems,
    };

    let response = api.verify_payment(request, token).await.map_err(|e| match e {
        AppError::AuthRequired | AppError::Network(_) => e,
        other => AppError::PaymentVerification(other.user_message()),
    })?;

    if !response.is_success() {
        let status = response.status.clone().unwrap_or_else(|| "unknown".to_string());
        return Err(AppError::PaymentVerification(format!("provider reported '{}'", status)));
    }

    tracing::info!(package = package.name, new_balance = ?response.new_balance, "Payment verified");
    Ok(response)
}

fn into_payment_init(err: AppError) -> AppError {
    match err {
        AppError::AuthRequired | AppError::Network(_) => err,
        other => AppError::PaymentInit(other.user_message()),
    }
}
