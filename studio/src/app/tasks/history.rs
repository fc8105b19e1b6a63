//! # History Tasks

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use tokio::spawn;

use crate::app::events::AppEvent;
use crate::app::state::AppState;

/// Fetch the signed-in user's swap history, newest first.
pub(crate) fn fetch_history(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (api, token) = {
        let mut state = state.write();
        let Some(token) = state.token() else {
            return;
        };
        if state.history.loading {
            return;
        }
        state.history.loading = true;
        state.history.error = None;
        (state.api_client.clone(), token)
    };

    spawn(async move {
        let result = api
            .swap_history(&token)
            .await
            .map(|mut items| {
                items.reverse();
                items
            })
            .map_err(|e| {
                tracing::warn!(error = %e, "History fetch failed");
                e.user_message()
            });
        let _ = event_tx.send(AppEvent::HistoryLoaded(result)).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{test_state, Session};
    use crate::core::service::MockApiService;
    use shared::{MediaKind, SwapTask, TaskStatus};

    fn task(id: i64) -> SwapTask {
        SwapTask {
            id,
            kind: MediaKind::Image,
            status: TaskStatus::Completed,
            source_url: None,
            template_url: None,
            result_url: Some(format!("/static/results/{}.png", id)),
            error_message: None,
            created_at: None,
            cost: Some(1),
        }
    }

    #[test]
    fn test_history_needs_session() {
        let mut api = MockApiService::new();
        api.expect_swap_history().never();
        let state = test_state(api);
        let (tx, _rx) = async_channel::unbounded();

        fetch_history(state.clone(), tx);

        assert!(!state.read().history.loading);
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let mut api = MockApiService::new();
        api.expect_swap_history()
            .withf(|token| token == "tok")
            .times(1)
            .returning(|_| Ok(vec![task(1), task(2), task(3)]));
        let state = test_state(api);
        state.write().session = Session::new("tok");
        let (tx, rx) = async_channel::unbounded();

        fetch_history(state, tx);

        match rx.recv().await.unwrap() {
            AppEvent::HistoryLoaded(Ok(items)) => {
                let ids: Vec<i64> = items.iter().map(|t| t.id).collect();
                assert_eq!(ids, vec![3, 2, 1]);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
