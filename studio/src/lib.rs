//! # Face Swap Studio - Library Root
//!
//! A **native desktop GUI** for template-based face swapping. Users browse a
//! template catalog, upload a photo of their face, follow the swap task until
//! the backend finishes it, and buy gems (the credit that pays for swaps).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              studio (this crate)                       │
//! ├────────────────────────────────────────────────────────┤
//! │  egui / eframe - Immediate-mode GUI and native window  │
//! │  Tokio         - Async runtime                         │
//! │  Reqwest       - HTTP client (JSON + multipart)        │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP /api/v1                 │ Browser
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Swap backend   │          │  Checkout / payment     │
//! │                 │          │  widget page            │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: orchestrator, state, events, handlers and async tasks
//!   - `workflow`: upload, create and poll state machine for one swap
//!   - `balance`: shared gem balance with a background refresher
//!   - `checkout`: gem packages and the purchase flows
//! - **config**: file and environment configuration
//! - **core**: error type and the [`core::ApiService`] seam
//! - **services**: backend HTTP client and the payment widget launcher
//! - **ui**: screens, widgets and theme
//! - **debug**: logging setup
//!
//! ## Event-Driven Architecture
//!
//! The UI thread owns the [`App`]. Async tasks run on Tokio and report back
//! through [`AppEvent`]s that [`App::on_tick`] applies every frame. State
//! lives in `Arc<RwLock<AppState>>` and locks are never held across an
//! `.await`.
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p studio
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod ui;

pub use app::{App, AppEvent, AppState, Screen};
pub use config::StudioConfig;
pub use crate::core::{AppError, Result};
