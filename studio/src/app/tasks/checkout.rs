//! # Checkout Tasks
//!
//! Starts the configured purchase flow and submits widget completions.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use tokio::spawn;

use crate::app::checkout::{self, CheckoutFlow, CheckoutPhase, Package};
use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::core::{AppError, Result};
use crate::services::payment_widget::PaymentCompletion;

/// Begin buying `package` with the configured flow.
pub(crate) fn start_checkout(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    package: &'static Package,
) -> Result<()> {
    let (api, token, flow) = {
        let mut state = state.write();
        let token = state.token().ok_or(AppError::AuthRequired)?;
        if state.checkout.phase.is_busy() {
            return Err(AppError::Validation(
                "Finish the current purchase before starting another".to_string(),
            ));
        }
        state.checkout.phase = CheckoutPhase::Starting { package: package.name };
        (state.api_client.clone(), token, state.config.checkout_flow)
    };

    tracing::info!(package = package.name, %flow, "Starting checkout");

    spawn(async move {
        let event = match flow {
            CheckoutFlow::HostedRedirect => AppEvent::CheckoutSessionCreated {
                package: package.name,
                result: checkout::request_hosted_session(api, &token, package)
                    .await
                    .map_err(|e| e.to_string()),
            },
            CheckoutFlow::EmbeddedWidget => AppEvent::OrderCreated {
                package: package.name,
                result: checkout::request_order(api, &token, package)
                    .await
                    .map_err(|e| e.to_string()),
            },
        };
        let _ = event_tx.send(event).await;
    });

    Ok(())
}

/// Verify the completion values entered for the open widget order.
pub(crate) fn submit_completion(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) -> Result<()> {
    let (api, token, package, completion) = {
        let mut state = state.write();
        let token = state.token().ok_or(AppError::AuthRequired)?;

        let CheckoutPhase::AwaitingCompletion { package, order } = state.checkout.phase.clone() else {
            return Err(AppError::Validation("No payment is waiting for completion".to_string()));
        };
        let package = Package::by_name(package)
            .ok_or_else(|| AppError::Validation(format!("Unknown package '{}'", package)))?;

        let completion = PaymentCompletion {
            order_id: order.id,
            payment_id: state.checkout.payment_id_input.trim().to_string(),
            signature: state.checkout.signature_input.trim().to_string(),
        };
        completion.validate()?;

        state.checkout.phase = CheckoutPhase::Verifying { package: package.name };
        (state.api_client.clone(), token, package, completion)
    };

    spawn(async move {
        let result = checkout::verify_completion(api, &token, package, completion)
            .await
            .map_err(|e| e.to_string());
        let _ = event_tx
            .send(AppEvent::PaymentVerified { package: package.name, result })
            .await;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{test_state, Session};
    use crate::core::service::MockApiService;
    use shared::{CheckoutSessionResponse, OrderResponse, VerifyPaymentResponse};

    #[test]
    fn test_checkout_needs_session() {
        let mut api = MockApiService::new();
        api.expect_create_checkout_session().never();
        let state = test_state(api);
        let (tx, _rx) = async_channel::unbounded();

        let pro = Package::by_name("Pro").unwrap();
        assert_eq!(start_checkout(state.clone(), tx, pro), Err(AppError::AuthRequired));
        assert_eq!(state.read().checkout.phase, CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn test_redirect_flow_reports_session_url() {
        let mut api = MockApiService::new();
        api.expect_create_checkout_session()
            .withf(|req, _| req.price_cents == 2900)
            .times(1)
            .returning(|_, _| {
                Ok(CheckoutSessionResponse {
                    url: "https://pay.example.com/c/1".to_string(),
                })
            });
        let state = test_state(api);
        state.write().session = Session::new("tok");
        let (tx, rx) = async_channel::unbounded();

        let pro = Package::by_name("Pro").unwrap();
        start_checkout(state.clone(), tx.clone(), pro).unwrap();
        assert!(state.read().checkout.phase.is_busy());

        // Only one purchase at a time.
        assert!(matches!(start_checkout(state.clone(), tx, pro), Err(AppError::Validation(_))));

        match rx.recv().await.unwrap() {
            AppEvent::CheckoutSessionCreated { package, result } => {
                assert_eq!(package, "Pro");
                assert_eq!(result, Ok("https://pay.example.com/c/1".to_string()));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_completion_is_verified() {
        let mut api = MockApiService::new();
        api.expect_verify_payment()
            .withf(|req, token| {
                req.provider_order_id == "order_5" && req.provider_payment_id == "pay_5" && token == "tok"
            })
            .times(1)
            .returning(|_, _| {
                Ok(VerifyPaymentResponse {
                    status: Some("success".to_string()),
                    new_balance: Some(70),
                })
            });
        let state = test_state(api);
        {
            let mut s = state.write();
            s.session = Session::new("tok");
            s.checkout.phase = CheckoutPhase::AwaitingCompletion {
                package: "Pro",
                order: OrderResponse {
                    id: "order_5".to_string(),
                    amount: 249_900,
                    currency: "INR".to_string(),
                },
            };
            s.checkout.payment_id_input = " pay_5 ".to_string();
            s.checkout.signature_input = "sig".to_string();
        }
        let (tx, rx) = async_channel::unbounded();

        submit_completion(state.clone(), tx).unwrap();
        assert_eq!(state.read().checkout.phase, CheckoutPhase::Verifying { package: "Pro" });

        match rx.recv().await.unwrap() {
            AppEvent::PaymentVerified { result: Ok(response), .. } => {
                assert_eq!(response.new_balance, Some(70));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_completion_without_order_is_rejected() {
        let state = test_state(MockApiService::new());
        state.write().session = Session::new("tok");
        let (tx, _rx) = async_channel::unbounded();

        assert!(matches!(submit_completion(state, tx), Err(AppError::Validation(_))));
    }
}
