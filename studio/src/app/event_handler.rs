//! # Event Handler
//!
//! Applies async task results to application state.
//!
//! Every result is checked against the state that asked for it. Results for a
//! torn-down swap run, a replaced template request, or an abandoned purchase are
//! dropped.

use shared::{OrderResponse, SwapTask, Template, VerifyPaymentResponse};

use crate::app::checkout::{CheckoutPhase, Package};
use crate::app::workflow::SwapPhase;
use crate::app::{App, AppEvent, Notice};
use crate::services::payment_widget::WidgetOptions;

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent);
}

impl AppEventHandler for App {
    fn handle_event_impl(&mut self, event: AppEvent) {
        match event {
            AppEvent::TemplatesLoaded(templates) => self.handle_templates_loaded(templates),
            AppEvent::TemplateLoaded { id, result } => self.handle_template_loaded(id, result),
            AppEvent::SwapPhaseChanged { generation, phase } => {
                self.handle_swap_phase(generation, phase)
            }
            AppEvent::HistoryLoaded(result) => self.handle_history_loaded(result),
            AppEvent::CheckoutSessionCreated { package, result } => {
                self.handle_checkout_session(package, result)
            }
            AppEvent::OrderCreated { package, result } => self.handle_order_created(package, result),
            AppEvent::PaymentVerified { package, result } => {
                self.handle_payment_verified(package, result)
            }
        }
    }
}

impl App {
    fn handle_templates_loaded(&mut self, templates: Vec<Template>) {
        tracing::info!(event = "TemplatesLoaded", count = templates.len(), "Processing templates");
        let mut state = self.state.write();
        state.catalog.templates = templates;
        state.catalog.loading = false;
        state.catalog.loaded = true;
    }

    fn handle_template_loaded(&mut self, id: i64, result: Result<Template, String>) {
        let mut state = self.state.write();
        state.swap.template_loaded(id, result);
    }

    fn handle_swap_phase(&mut self, generation: u64, phase: SwapPhase) {
        let mut state = self.state.write();
        if !state.swap.apply(generation, phase.clone()) {
            return;
        }

        tracing::info!(event = "SwapPhaseChanged", generation, phase = ?phase, "Swap progressed");
        match phase {
            // Gems are debited when the task is created.
            SwapPhase::Queued { .. } => state.balance.refresh_now(),
            SwapPhase::Completed(_) => state.notify(Notice::success("Swap complete!")),
            SwapPhase::Failed { message } => state.notify(Notice::error(message)),
            SwapPhase::Idle | SwapPhase::Uploading | SwapPhase::Polling { .. } => {}
        }
    }

    fn handle_history_loaded(&mut self, result: Result<Vec<SwapTask>, String>) {
        let mut state = self.state.write();
        state.history.loading = false;
        if !state.is_authenticated() {
            return;
        }
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "History loaded");
                state.history.items = items;
                state.history.error = None;
            }
            Err(message) => state.history.error = Some(message),
        }
    }

    fn handle_checkout_session(&mut self, package: &'static str, result: Result<String, String>) {
        let mut state = self.state.write();
        if state.checkout.phase != (CheckoutPhase::Starting { package }) {
            tracing::debug!(package, "Dropping stale checkout session");
            return;
        }

        match result {
            Ok(url) => {
                tracing::info!(package, "Redirecting to hosted checkout");
                if !crate::services::open_in_browser(&url) {
                    state.notify(Notice::warning(format!("Open this link to pay: {}", url)));
                }
                state.checkout.phase = CheckoutPhase::Redirected { package, url };
            }
            Err(message) => {
                state.notify(Notice::error(message.clone()));
                state.checkout.phase = CheckoutPhase::Failed { message };
            }
        }
    }

    fn handle_order_created(&mut self, package: &'static str, result: Result<OrderResponse, String>) {
        let mut state = self.state.write();
        if state.checkout.phase != (CheckoutPhase::Starting { package }) {
            tracing::debug!(package, "Dropping stale payment order");
            return;
        }

        let order = match result {
            Ok(order) => order,
            Err(message) => {
                state.notify(Notice::error(message.clone()));
                state.checkout.phase = CheckoutPhase::Failed { message };
                return;
            }
        };

        let Some(key) = state.config.payment_key.clone() else {
            let message = "Payment key is not configured".to_string();
            state.notify(Notice::error(message.clone()));
            state.checkout.phase = CheckoutPhase::Failed { message };
            return;
        };

        let gems = Package::by_name(package).map(|p| p.gems).unwrap_or_default();
        let options = WidgetOptions::for_order(&key, &order, format!("{} Gems", gems));
        match state.payment_widget.open(&options) {
            Ok(()) => {
                tracing::info!(package, order = %order.id, "Payment widget opened");
                state.checkout.payment_id_input.clear();
                state.checkout.signature_input.clear();
                state.checkout.phase = CheckoutPhase::AwaitingCompletion { package, order };
            }
            Err(e) => {
                let message = e.to_string();
                state.notify(Notice::error(message.clone()));
                state.checkout.phase = CheckoutPhase::Failed { message };
            }
        }
    }

    fn handle_payment_verified(
        &mut self,
        package: &'static str,
        result: Result<VerifyPaymentResponse, String>,
    ) {
        let mut state = self.state.write();
        if state.checkout.phase != (CheckoutPhase::Verifying { package }) {
            tracing::debug!(package, "Dropping stale verification");
            return;
        }

        match result {
            Ok(response) => {
                let gems = Package::by_name(package).map(|p| p.gems).unwrap_or_default();
                if let Some(balance) = response.new_balance {
                    state.balance.set(balance);
                }
                state.balance.refresh_now();
                state.notify(Notice::success(format!("Payment successful! {} gems added", gems)));
                state.checkout.phase = CheckoutPhase::Verified {
                    gems,
                    new_balance: response.new_balance,
                };
            }
            Err(message) => {
                tracing::warn!(package, %message, "Payment verification failed");
                state.notify(Notice::error(message.clone()));
                state.checkout.phase = CheckoutPhase::Failed { message };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::workflow::SwapResult;
    use crate::app::{NoticeLevel, Session};
    use crate::config::StudioConfig;
    use crate::core::service::MockApiService;
    use crate::core::AppError;
    use crate::services::payment_widget::MockPaymentWidget;
    use shared::MediaKind;
    use std::sync::Arc;

    fn app_with(widget: MockPaymentWidget, config: StudioConfig) -> App {
        App::with_services(config, Arc::new(MockApiService::new()), Arc::new(widget))
    }

    fn widget_config() -> StudioConfig {
        StudioConfig {
            payment_key: Some("pk_test".to_string()),
            checkout_flow: crate::app::checkout::CheckoutFlow::EmbeddedWidget,
            ..Default::default()
        }
    }

    fn order() -> OrderResponse {
        OrderResponse {
            id: "order_77".to_string(),
            amount: 249_900,
            currency: "INR".to_string(),
        }
    }

    #[test]
    fn test_stale_swap_phase_is_dropped() {
        let mut app = app_with(MockPaymentWidget::new(), StudioConfig::default());
        let (old_generation, _) = app.state.write().swap.begin();
        app.state.write().swap.teardown();

        app.handle_event_impl(AppEvent::SwapPhaseChanged {
            generation: old_generation,
            phase: SwapPhase::Completed(SwapResult {
                task_id: 1,
                url: "http://localhost:8000/static/r.png".to_string(),
                kind: MediaKind::Image,
            }),
        });

        let state = app.state.read();
        assert_eq!(state.swap.phase, SwapPhase::Idle);
        assert!(state.pending_notifications.is_empty());
    }

    #[test]
    fn test_swap_failure_notifies() {
        let mut app = app_with(MockPaymentWidget::new(), StudioConfig::default());
        let (generation, _) = app.state.write().swap.begin();

        app.handle_event_impl(AppEvent::SwapPhaseChanged {
            generation,
            phase: SwapPhase::Failed { message: "bad face".to_string() },
        });

        let state = app.state.read();
        assert_eq!(state.swap.phase, SwapPhase::Failed { message: "bad face".to_string() });
        assert_eq!(state.pending_notifications[0].level, NoticeLevel::Error);
        assert_eq!(state.pending_notifications[0].message, "bad face");
    }

    #[test]
    fn test_order_opens_widget() {
        let mut widget = MockPaymentWidget::new();
        widget
            .expect_open()
            .withf(|options| {
                options.key == "pk_test"
                    && options.order_id == "order_77"
                    && options.amount == 249_900
                    && options.currency == "INR"
                    && options.description == "50 Gems"
            })
            .times(1)
            .returning(|_| Ok(()));
        let mut app = app_with(widget, widget_config());
        app.state.write().checkout.phase = CheckoutPhase::Starting { package: "Pro" };

        app.handle_event_impl(AppEvent::OrderCreated { package: "Pro", result: Ok(order()) });

        assert_eq!(
            app.state.read().checkout.phase,
            CheckoutPhase::AwaitingCompletion { package: "Pro", order: order() }
        );
    }

    #[test]
    fn test_widget_failure_fails_checkout() {
        let mut widget = MockPaymentWidget::new();
        widget
            .expect_open()
            .returning(|_| Err(AppError::PaymentInit("Could not open browser: no display".to_string())));
        let mut app = app_with(widget, widget_config());
        app.state.write().checkout.phase = CheckoutPhase::Starting { package: "Pro" };

        app.handle_event_impl(AppEvent::OrderCreated { package: "Pro", result: Ok(order()) });

        assert!(matches!(app.state.read().checkout.phase, CheckoutPhase::Failed { .. }));
    }

    #[test]
    fn test_order_without_key_fails() {
        let mut widget = MockPaymentWidget::new();
        widget.expect_open().never();
        let mut app = app_with(widget, StudioConfig::default());
        app.state.write().checkout.phase = CheckoutPhase::Starting { package: "Pro" };

        app.handle_event_impl(AppEvent::OrderCreated { package: "Pro", result: Ok(order()) });

        assert_eq!(
            app.state.read().checkout.phase,
            CheckoutPhase::Failed { message: "Payment key is not configured".to_string() }
        );
    }

    #[test]
    fn test_verified_payment_updates_balance() {
        let mut app = app_with(MockPaymentWidget::new(), widget_config());
        {
            let mut state = app.state.write();
            state.session = Session::new("tok");
            state.checkout.phase = CheckoutPhase::Verifying { package: "Pro" };
        }

        app.handle_event_impl(AppEvent::PaymentVerified {
            package: "Pro",
            result: Ok(VerifyPaymentResponse {
                status: Some("success".to_string()),
                new_balance: Some(63),
            }),
        });

        let state = app.state.read();
        assert_eq!(state.balance.current(), Some(63));
        assert_eq!(
            state.checkout.phase,
            CheckoutPhase::Verified { gems: 50, new_balance: Some(63) }
        );
        assert_eq!(state.pending_notifications[0].message, "Payment successful! 50 gems added");
    }

    #[test]
    fn test_verification_error_is_shown() {
        let mut app = app_with(MockPaymentWidget::new(), widget_config());
        app.state.write().checkout.phase = CheckoutPhase::Verifying { package: "Pro" };

        app.handle_event_impl(AppEvent::PaymentVerified {
            package: "Pro",
            result: Err("Payment verification failed: Invalid signature".to_string()),
        });

        let state = app.state.read();
        assert_eq!(
            state.checkout.phase,
            CheckoutPhase::Failed { message: "Payment verification failed: Invalid signature".to_string() }
        );
        assert_eq!(state.balance.current(), None);
    }

    #[test]
    fn test_history_dropped_after_sign_out() {
        let mut app = app_with(MockPaymentWidget::new(), StudioConfig::default());
        app.state.write().history.loading = true;

        app.handle_event_impl(AppEvent::HistoryLoaded(Ok(Vec::new())));

        let state = app.state.read();
        assert!(!state.history.loading);
        assert!(state.history.items.is_empty());
    }
}
