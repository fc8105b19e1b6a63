//! # Application Events
//!
//! Event types for async task communication between background tasks and the main thread.

use shared::{OrderResponse, SwapTask, Template, VerifyPaymentResponse};

use crate::app::workflow::SwapPhase;

/// Async task results sent to main thread
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Template catalog fetched (empty on failure)
    TemplatesLoaded(Vec<Template>),
    /// Single template fetched for the swap screen
    TemplateLoaded { id: i64, result: Result<Template, String> },
    /// Swap run progress, tagged with the workflow generation that started it
    SwapPhaseChanged { generation: u64, phase: SwapPhase },
    /// Swap history fetched
    HistoryLoaded(Result<Vec<SwapTask>, String>),
    /// Hosted checkout session created
    CheckoutSessionCreated { package: &'static str, result: Result<String, String> },
    /// Provider order created for the embedded widget
    OrderCreated { package: &'static str, result: Result<OrderResponse, String> },
    /// Widget completion verified
    PaymentVerified { package: &'static str, result: Result<VerifyPaymentResponse, String> },
}
