//! # Navigation Handlers
//!
//! Handlers for screen navigation and gallery filtering.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;

use crate::app::events::AppEvent;
use crate::app::state::{AppState, MediaFilter, Screen};
use crate::app::tasks;

/// Handle screen change with authentication guard
///
/// Internal handler function - use [`crate::app::App::handle_screen_change`] instead.
/// Leaving the swap screen tears its workflow down. Entering the gallery or
/// history loads them when needed.
pub(crate) fn handle_screen_change(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    screen: Screen,
) {
    let target = {
        let mut state = state.write();

        let target = if AppState::requires_auth(screen) && !state.is_authenticated() {
            tracing::info!("Access denied: {} requires a session, redirecting to sign-in", screen.title());
            state.sign_in.return_to = screen;
            Screen::SignIn
        } else {
            screen
        };

        if state.current_screen == Screen::Swap && target != Screen::Swap {
            state.swap.teardown();
        }
        state.current_screen = target;
        target
    };

    match target {
        Screen::Gallery => {
            if !state.read().catalog.loaded {
                tasks::catalog::fetch_templates(state.clone(), event_tx);
            }
        }
        Screen::History => tasks::history::fetch_history(state.clone(), event_tx),
        Screen::Swap | Screen::BuyGems | Screen::SignIn => {}
    }
}

/// Send the user to sign-in, coming back to `return_to` afterwards.
///
/// Asking from the sign-in screen itself returns to the gallery.
pub(crate) fn handle_sign_in_request(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    return_to: Screen,
) {
    state.write().sign_in.return_to = match return_to {
        Screen::SignIn => Screen::Gallery,
        other => other,
    };
    handle_screen_change(state, event_tx, Screen::SignIn);
}

/// Handle gallery filter change
pub(crate) fn handle_filter_change(state: Arc<RwLock<AppState>>, filter: MediaFilter) {
    state.write().catalog.filter = filter;
}
