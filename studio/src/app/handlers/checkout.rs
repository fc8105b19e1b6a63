//! # Checkout Handlers

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;

use crate::app::checkout::{CheckoutPhase, Package};
use crate::app::events::AppEvent;
use crate::app::state::{AppState, Notice, Screen};
use crate::app::tasks;
use crate::core::AppError;

/// Buy a package. Without a session the user is sent to sign-in first.
pub(crate) fn handle_buy_click(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    package: &'static Package,
) {
    match tasks::checkout::start_checkout(state.clone(), event_tx, package) {
        Ok(()) => {}
        Err(AppError::AuthRequired) => {
            let mut state = state.write();
            state.sign_in.return_to = Screen::BuyGems;
            state.current_screen = Screen::SignIn;
            state.notify(Notice::info("Sign in to buy gems"));
        }
        Err(e) => state.write().notify(Notice::warning(e.user_message())),
    }
}

pub(crate) fn handle_completion_submit(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    if let Err(e) = tasks::checkout::submit_completion(state.clone(), event_tx) {
        state.write().notify(Notice::warning(e.user_message()));
    }
}

/// Abandon a widget payment that was never completed, or clear a finished one.
pub(crate) fn handle_checkout_dismiss(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    if matches!(state.checkout.phase, CheckoutPhase::Verifying { .. } | CheckoutPhase::Starting { .. }) {
        return;
    }
    state.checkout = Default::default();
}
