//! # Swap Workflow
//!
//! Per-template state machine driving one face swap:
//!
//! ```text
//! Idle ─start─▶ Uploading ─▶ Queued ─▶ Polling ─┬─▶ Completed
//!                   │           │          │    └─▶ Failed
//!                   └───────────┴──────────┴──────▶ Failed
//! ```
//!
//! [`SwapWorkflow`] lives in [`crate::app::AppState`] and only holds data. The
//! async side is [`run_swap`], spawned by [`crate::app::tasks::swap`], which
//! reports phases back through the event channel tagged with the workflow
//! generation. Bumping the generation (reset, teardown, new start) makes every
//! late report from an older run a no-op.
//!
//! The poll loop is bounded by [`PollConfig::max_attempts`] and stops as soon as
//! its [`CancellationToken`] fires.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use shared::{absolute_media_url, CreateSwapRequest, MediaKind, SwapTask, TaskStatus, Template};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::StudioConfig;
use crate::core::service::ApiService;

/// Shown when a task fails without an error message.
pub const DEFAULT_FAILURE: &str = "Swap failed";

/// A finished swap, with its result reference already absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapResult {
    pub task_id: i64,
    pub url: String,
    pub kind: MediaKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SwapPhase {
    #[default]
    Idle,
    Uploading,
    Queued { task_id: i64 },
    Polling { task_id: i64, attempts: u32 },
    Completed(SwapResult),
    Failed { message: String },
}

impl SwapPhase {
    /// Upload or poll in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SwapPhase::Uploading | SwapPhase::Queued { .. } | SwapPhase::Polling { .. }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapPhase::Completed(_) | SwapPhase::Failed { .. })
    }

    pub fn status_text(&self) -> String {
        match self {
            SwapPhase::Idle => "Ready".to_string(),
            SwapPhase::Uploading => "Uploading your photo...".to_string(),
            SwapPhase::Queued { task_id } => format!("Task #{} queued", task_id),
            SwapPhase::Polling { task_id, attempts } => {
                format!("Processing task #{} (check {})", task_id, attempts)
            }
            SwapPhase::Completed(_) => "Swap complete".to_string(),
            SwapPhase::Failed { message } => message.clone(),
        }
    }
}

/// Swap screen state for one template visit.
#[derive(Debug, Clone, Default)]
pub struct SwapWorkflow {
    pub template: Option<Template>,
    /// Template id requested by [`SwapWorkflow::open`], kept until it resolves.
    pub requested_template: Option<i64>,
    pub template_error: Option<String>,
    pub source: Option<PathBuf>,
    pub phase: SwapPhase,
    generation: u64,
    cancel: Option<CancellationToken>,
}

impl SwapWorkflow {
    /// Start a fresh visit for a template id. Any run in progress is torn down.
    pub fn open(&mut self, template_id: i64) {
        self.teardown();
        self.template = None;
        self.template_error = None;
        self.source = None;
        self.phase = SwapPhase::Idle;
        self.requested_template = Some(template_id);
    }

    /// Start a fresh visit with a template already in hand.
    pub fn open_with(&mut self, template: Template) {
        self.open(template.id);
        self.requested_template = None;
        self.template = Some(template);
    }

    /// Apply a template fetch result. Returns false when it is no longer wanted.
    pub fn template_loaded(&mut self, id: i64, result: Result<Template, String>) -> bool {
        if self.requested_template != Some(id) {
            tracing::debug!(template_id = id, "Dropping stale template response");
            return false;
        }
        self.requested_template = None;
        match result {
            Ok(template) => self.template = Some(template),
            Err(message) => self.template_error = Some(message),
        }
        true
    }

    pub fn is_loading_template(&self) -> bool {
        self.requested_template.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Pick a source face. Ignored while a run is in flight.
    pub fn set_source(&mut self, path: PathBuf) -> bool {
        if self.is_busy() {
            return false;
        }
        if self.phase.is_terminal() {
            self.phase = SwapPhase::Idle;
        }
        self.source = Some(path);
        true
    }

    pub fn can_start(&self) -> bool {
        self.template.is_some() && self.source.is_some() && !self.is_busy()
    }

    /// Enter `Uploading` and hand out the generation and token for the new run.
    pub fn begin(&mut self) -> (u64, CancellationToken) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.generation += 1;
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        self.phase = SwapPhase::Uploading;
        (self.generation, token)
    }

    /// Apply a phase reported by a run. Reports from older generations are ignored.
    pub fn apply(&mut self, generation: u64, phase: SwapPhase) -> bool {
        if generation != self.generation || !self.is_busy() {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping stale swap phase"
            );
            return false;
        }
        if phase.is_terminal() {
            self.cancel = None;
        }
        self.phase = phase;
        true
    }

    /// Back to `Idle` with the same template and source face so the user can
    /// swap again.
    pub fn reset(&mut self) {
        self.teardown();
        self.phase = SwapPhase::Idle;
    }

    /// Cancel any running upload or poll and invalidate its reports.
    pub fn teardown(&mut self) {
        if let Some(token) = self.cancel.take() {
            tracing::debug!(generation = self.generation, "Cancelling swap run");
            token.cancel();
        }
        self.generation += 1;
        if self.is_busy() {
            self.phase = SwapPhase::Idle;
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Poll timing for [`poll_until_terminal`].
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
    /// Origin that relative result paths resolve against.
    pub origin: String,
}

impl PollConfig {
    pub fn from_config(config: &StudioConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            max_attempts: config.max_poll_attempts,
            origin: config.backend_origin(),
        }
    }
}

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct SwapJob {
    pub template: Template,
    pub source: PathBuf,
    pub token: String,
}

/// Upload, create the task, then poll it.
///
/// Intermediate phases go to `on_phase`. The terminal phase is returned.
/// `None` means the run was cancelled.
pub async fn run_swap<F>(
    api: Arc<dyn ApiService>,
    job: SwapJob,
    poll: PollConfig,
    cancel: CancellationToken,
    mut on_phase: F,
) -> Option<SwapPhase>
where
    F: FnMut(SwapPhase) + Send,
{
    let upload = tokio::select! {
        _ = cancel.cancelled() => return None,
        result = api.upload_source(&job.source, &job.token) => result,
    };
    let upload = match upload {
        Ok(upload) => upload,
        Err(e) => {
            tracing::warn!(error = %e, "Source upload failed");
            return Some(SwapPhase::Failed { message: e.user_message() });
        }
    };

    let request = CreateSwapRequest {
        kind: job.template.kind,
        source_url: upload.url,
        template_url: job.template.swap_target().to_string(),
    };
    let created = tokio::select! {
        _ = cancel.cancelled() => return None,
        result = api.create_swap(request, &job.token) => result,
    };
    let task = match created {
        Ok(task) => task,
        Err(e) => {
            tracing::warn!(error = %e, template_id = job.template.id, "Swap creation failed");
            return Some(SwapPhase::Failed { message: e.user_message() });
        }
    };

    if let Some(phase) = terminal_phase(&task, &poll.origin) {
        return Some(phase);
    }

    on_phase(SwapPhase::Queued { task_id: task.id });
    poll_until_terminal(api.as_ref(), task.id, &job.token, &poll, &cancel, &mut on_phase).await
}

/// Check the task every `poll.interval` until it is terminal, the attempt bound
/// is hit, or `cancel` fires.
///
/// Failed status reads are logged and retried on the next tick.
pub async fn poll_until_terminal<F>(
    api: &dyn ApiService,
    task_id: i64,
    token: &str,
    poll: &PollConfig,
    cancel: &CancellationToken,
    on_phase: &mut F,
) -> Option<SwapPhase>
where
    F: FnMut(SwapPhase) + Send,
{
    let mut ticker = tokio::time::interval(poll.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately.
    ticker.tick().await;

    for attempt in 1..=poll.max_attempts {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(task_id, attempt, "Swap poll cancelled");
                return None;
            }
            _ = ticker.tick() => {}
        }

        on_phase(SwapPhase::Polling { task_id, attempts: attempt });

        let result = tokio::select! {
            _ = cancel.cancelled() => return None,
            result = api.get_swap(task_id, token) => result,
        };

        match result {
            Ok(task) => {
                if let Some(phase) = terminal_phase(&task, &poll.origin) {
                    tracing::info!(task_id, attempt, status = ?task.status, "Swap finished");
                    return Some(phase);
                }
                tracing::debug!(task_id, attempt, status = ?task.status, "Swap still running");
            }
            Err(e) => {
                tracing::warn!(task_id, attempt, error = %e, "Status poll failed, retrying");
            }
        }
    }

    tracing::warn!(task_id, attempts = poll.max_attempts, "Swap poll gave up");
    Some(SwapPhase::Failed {
        message: format!("Swap timed out after {} status checks", poll.max_attempts),
    })
}

/// Map a terminal task to its phase, `None` while still running.
pub fn terminal_phase(task: &SwapTask, origin: &str) -> Option<SwapPhase> {
    if !task.status.is_terminal() {
        return None;
    }

    match task.status {
        TaskStatus::Completed => Some(match task.result_url.as_deref() {
            Some(reference) if !reference.is_empty() => SwapPhase::Completed(SwapResult {
                task_id: task.id,
                url: absolute_media_url(origin, reference),
                kind: task.kind,
            }),
            _ => SwapPhase::Failed {
                message: "Swap completed without a result".to_string(),
            },
        }),
        TaskStatus::Failed => Some(SwapPhase::Failed {
            message: task
                .error_message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
        }),
        _ => None,
    }
}
