//! # Embedded Payment Widget
//!
//! The widget flow creates a provider order on the backend, hands the order to
//! a provider-hosted widget, and later receives a completion (payment id and
//! signature) that the backend verifies.
//!
//! On desktop the widget page opens in the system browser. The page shows the
//! completion values once payment succeeds and the user pastes them back into
//! the Buy Gems screen.

use reqwest::Url;
use shared::OrderResponse;

use crate::core::{AppError, Result};

/// Merchant name shown inside the widget.
pub const MERCHANT_NAME: &str = "Face Swap Studio";

/// Everything the widget needs to collect a payment for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub key: String,
    pub order_id: String,
    /// Smallest currency unit, as returned by the order.
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
}

impl WidgetOptions {
    pub fn for_order(key: &str, order: &OrderResponse, description: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            order_id: order.id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: MERCHANT_NAME.to_string(),
            description: description.into(),
        }
    }

    /// Widget page URL with the options encoded as query parameters.
    pub fn launch_url(&self, page: &str) -> Result<Url> {
        let amount = self.amount.to_string();
        Url::parse_with_params(
            page,
            &[
                ("key", self.key.as_str()),
                ("order_id", self.order_id.as_str()),
                ("amount", amount.as_str()),
                ("currency", self.currency.as_str()),
                ("name", self.name.as_str()),
                ("description", self.description.as_str()),
            ],
        )
        .map_err(|e| AppError::PaymentInit(format!("Invalid widget page '{}': {}", page, e)))
    }
}

/// Values the provider reports when the user finishes paying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentCompletion {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl PaymentCompletion {
    pub fn validate(&self) -> Result<()> {
        if self.payment_id.trim().is_empty() || self.signature.trim().is_empty() {
            return Err(AppError::Validation(
                "Payment id and signature are both required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Launches the provider widget for an order.
#[cfg_attr(test, mockall::automock)]
pub trait PaymentWidget: Send + Sync {
    fn open(&self, options: &WidgetOptions) -> Result<()>;
}

/// Opens the widget page in the system browser.
pub struct BrowserWidget {
    page_url: String,
}

impl BrowserWidget {
    pub fn new(page_url: impl Into<String>) -> Self {
        Self { page_url: page_url.into() }
    }
}

impl PaymentWidget for BrowserWidget {
    fn open(&self, options: &WidgetOptions) -> Result<()> {
        let url = options.launch_url(&self.page_url)?;
        tracing::info!(order = %options.order_id, "Opening payment widget");
        open::that(url.as_str())
            .map_err(|e| AppError::PaymentInit(format!("Could not open browser: {}", e)))
    }
}
