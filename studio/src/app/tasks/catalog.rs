//! # Catalog Tasks
//!
//! Template catalog and single-template fetches.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use tokio::spawn;

use crate::app::events::AppEvent;
use crate::app::state::AppState;

/// Fetch the template catalog.
///
/// A failed fetch is logged and reported as an empty list so the gallery still
/// renders.
pub(crate) fn fetch_templates(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let api = {
        let mut state = state.write();
        if state.catalog.loading {
            return;
        }
        state.catalog.loading = true;
        state.api_client.clone()
    };

    spawn(async move {
        let templates = match api.list_templates().await {
            Ok(templates) => templates,
            Err(e) => {
                tracing::warn!(error = %e, "Template fetch failed, showing empty catalog");
                Vec::new()
            }
        };
        let _ = event_tx.send(AppEvent::TemplatesLoaded(templates)).await;
    });
}

/// Fetch one template for the swap screen.
pub(crate) fn fetch_template(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>, id: i64) {
    let api = state.read().api_client.clone();

    spawn(async move {
        let result = api.get_template(id).await.map_err(|e| {
            tracing::warn!(template_id = id, error = %e, "Template fetch failed");
            e.user_message()
        });
        let _ = event_tx.send(AppEvent::TemplateLoaded { id, result }).await;
    });
}
