//! # Session Handlers
//!
//! Sign-in and sign-out. Token issuance happens outside the client, so signing
//! in only stores a bearer token.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;

use crate::app::checkout::CheckoutPhase;
use crate::app::events::AppEvent;
use crate::app::state::{AppState, HistoryState, Notice, Screen, Session};
use crate::app::tasks;

/// Store a session token and start the balance refresher.
///
/// Returns false when the token is blank.
pub(crate) fn handle_sign_in(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    token: String,
) -> bool {
    let return_to = {
        let mut state = state.write();
        let Some(session) = Session::new(token) else {
            state.sign_in.error = Some("Enter your access token".to_string());
            return false;
        };

        state.balance.start(state.api_client.clone(), session.token.clone());
        state.session = Some(session);
        let return_to = std::mem::take(&mut state.sign_in).return_to;
        state.notify(Notice::success("Signed in"));
        tracing::info!("Session started");

        if state.current_screen == Screen::SignIn {
            state.current_screen = return_to;
        }
        state.current_screen
    };

    if return_to == Screen::History {
        tasks::history::fetch_history(state, event_tx);
    }
    true
}

/// Clear the session, stop the balance refresher and cancel any swap run.
pub(crate) fn handle_sign_out(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    state.balance.stop();
    state.swap.teardown();
    state.session = None;
    state.history = HistoryState::default();
    if !state.checkout.phase.is_busy() {
        state.checkout.phase = CheckoutPhase::Idle;
    }
    if AppState::requires_auth(state.current_screen) {
        state.current_screen = Screen::Gallery;
    }
    state.notify(Notice::info("Signed out"));
    tracing::info!("Session ended");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::test_state;
    use crate::core::service::MockApiService;
    use shared::GemBalance;

    #[test]
    fn test_blank_token_is_rejected() {
        let state = test_state(MockApiService::new());
        let (tx, _rx) = async_channel::unbounded();

        assert!(!handle_sign_in(state.clone(), tx, "  ".to_string()));
        let state = state.read();
        assert!(state.session.is_none());
        assert!(state.sign_in.error.is_some());
        assert!(!state.balance.is_running());
    }

    #[tokio::test]
    async fn test_sign_in_then_out() {
        let mut api = MockApiService::new();
        api.expect_get_balance()
            .returning(|_| Ok(GemBalance { gem_balance: 5 }));
        let state = test_state(api);
        let (tx, _rx) = async_channel::unbounded();

        {
            let mut s = state.write();
            s.current_screen = Screen::SignIn;
            s.sign_in.return_to = Screen::BuyGems;
        }

        assert!(handle_sign_in(state.clone(), tx, "tok".to_string()));
        {
            let s = state.read();
            assert!(s.is_authenticated());
            assert!(s.balance.is_running());
            assert_eq!(s.current_screen, Screen::BuyGems);
        }

        handle_sign_out(state.clone());
        let s = state.read();
        assert!(!s.is_authenticated());
        assert!(!s.balance.is_running());
        assert_eq!(s.balance.display(), "...");
    }
}
