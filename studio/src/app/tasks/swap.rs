//! # Swap Tasks
//!
//! Spawns [`run_swap`] for the current workflow and forwards its phases to the
//! main thread.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use tokio::spawn;

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::workflow::{run_swap, PollConfig, SwapJob};
use crate::core::{AppError, Result};

/// Start a swap for the selected template and source face.
///
/// Fails without touching the network when there is no session, nothing is
/// selected, or a run is already in flight.
pub(crate) fn start_swap(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) -> Result<()> {
    let (api, job, poll, generation, cancel) = {
        let mut state = state.write();

        let token = state.token().ok_or(AppError::AuthRequired)?;
        if state.swap.is_busy() {
            return Err(AppError::Validation("A swap is already running".to_string()));
        }
        let template = state
            .swap
            .template
            .clone()
            .ok_or_else(|| AppError::Validation("Pick a template first".to_string()))?;
        let source = state
            .swap
            .source
            .clone()
            .ok_or_else(|| AppError::Validation("Choose a photo of your face first".to_string()))?;

        let (generation, cancel) = state.swap.begin();
        let poll = PollConfig::from_config(&state.config);
        (state.api_client.clone(), SwapJob { template, source, token }, poll, generation, cancel)
    };

    tracing::info!(
        generation,
        template_id = job.template.id,
        kind = %job.template.kind,
        "Starting swap"
    );

    spawn(async move {
        let progress_tx = event_tx.clone();
        let outcome = run_swap(api, job, poll, cancel, move |phase| {
            let _ = progress_tx.try_send(AppEvent::SwapPhaseChanged { generation, phase });
        })
        .await;

        match outcome {
            Some(phase) => {
                let _ = event_tx.send(AppEvent::SwapPhaseChanged { generation, phase }).await;
            }
            None => tracing::debug!(generation, "Swap run cancelled"),
        }
    });

    Ok(())
}
