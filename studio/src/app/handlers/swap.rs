//! # Swap Handlers
//!
//! User actions on the swap screen.

use std::path::PathBuf;
use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use shared::Template;

use crate::app::events::AppEvent;
use crate::app::state::{AppState, Notice, Screen};
use crate::app::tasks;
use crate::core::AppError;

/// Prompt shown when a swap is started without a session.
pub const SIGN_IN_TO_SWAP: &str = "Please sign in to swap faces";

/// Open the swap screen for a template picked in the gallery.
pub(crate) fn handle_template_click(state: Arc<RwLock<AppState>>, template: Template) {
    let mut state = state.write();
    tracing::info!(template_id = template.id, "Opening template");
    state.swap.open_with(template);
    state.current_screen = Screen::Swap;
}

/// Open the swap screen for a template id, fetching the template.
pub(crate) fn handle_open_template_id(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>, id: i64) {
    {
        let mut state = state.write();
        state.swap.open(id);
        state.current_screen = Screen::Swap;
    }
    tasks::catalog::fetch_template(state, event_tx, id);
}

pub(crate) fn handle_source_selected(state: Arc<RwLock<AppState>>, path: PathBuf) {
    let mut state = state.write();
    if !state.swap.set_source(path) {
        state.notify(Notice::warning("Wait for the current swap to finish"));
    }
}

/// Start the swap. Guard failures become a notice.
pub(crate) fn handle_swap_start(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    if let Err(e) = tasks::swap::start_swap(state.clone(), event_tx) {
        let message = match e {
            AppError::AuthRequired => SIGN_IN_TO_SWAP.to_string(),
            other => other.user_message(),
        };
        tracing::info!(%message, "Swap not started");
        state.write().notify(Notice::warning(message));
    }
}

pub(crate) fn handle_swap_reset(state: Arc<RwLock<AppState>>) {
    state.write().swap.reset();
}

/// Open a finished result in the system browser.
pub(crate) fn handle_open_result(state: Arc<RwLock<AppState>>, url: &str) {
    if !crate::services::open_in_browser(url) {
        state
            .write()
            .notify(Notice::error(format!("Could not open {}", url)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{test_state, NoticeLevel};
    use crate::core::service::MockApiService;
    use shared::MediaKind;

    #[test]
    fn test_start_without_session_prompts_sign_in() {
        let mut api = MockApiService::new();
        api.expect_upload_source().never();
        let state = test_state(api);
        handle_template_click(
            state.clone(),
            Template {
                id: 1,
                title: "Beach".to_string(),
                kind: MediaKind::Image,
                thumbnail: "/static/1.png".to_string(),
                source_url: None,
                cost: 1,
                created_at: None,
            },
        );
        handle_source_selected(state.clone(), PathBuf::from("/tmp/me.png"));
        let (tx, _rx) = async_channel::unbounded();

        handle_swap_start(state.clone(), tx);

        let s = state.read();
        assert_eq!(s.current_screen, Screen::Swap);
        let notice = s.pending_notifications.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, SIGN_IN_TO_SWAP);
    }
}
