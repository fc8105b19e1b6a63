//! # Application Orchestrator
//!
//! The main [`App`] struct coordinates the UI rendering layer, async tasks and
//! application state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Main Thread (egui)                       │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │  App (orchestrator)                                  │   │
//! │  │  - on_tick() - drains the event channel every frame  │   │
//! │  │  - handle_*() - user action handlers                 │   │
//! │  └────────────┬─────────────────────────────────────────┘   │
//! │               │                                             │
//! │  ┌────────────▼─────────────────────────────────────────┐   │
//! │  │  State: Arc<RwLock<AppState>>                        │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ async_channel (unbounded)
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │              Async Tasks (Tokio)                            │
//! │  - catalog: template list and single template               │
//! │  - swap: upload → create → poll                             │
//! │  - history: past tasks                                      │
//! │  - checkout: session / order / verification                 │
//! │  - balance refresher (owned by BalanceStore)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Locks are held briefly and never across an `.await`. Async tasks only
//! report through [`AppEvent`]s, except the balance refresher which writes its
//! own store.

pub mod balance;
pub mod checkout;
mod event_handler;
mod events;
mod handlers;
mod state;
mod tasks;
pub mod workflow;

pub use events::AppEvent;
pub use handlers::swap::SIGN_IN_TO_SWAP;
pub use state::*;

use std::path::PathBuf;
use std::sync::Arc;

use async_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use shared::Template;

use crate::config::StudioConfig;
use crate::core::service::ApiService;
use crate::services::api::ApiClient;
use crate::services::payment_widget::{BrowserWidget, PaymentWidget};
use checkout::Package;
use event_handler::AppEventHandler;

/// Main application orchestrator.
///
/// Async tasks send results back via `AppEvent` messages. [`App::on_tick`]
/// applies them on the main thread.
pub struct App {
    /// Thread-safe shared application state.
    pub state: Arc<RwLock<AppState>>,

    /// Channel receiver for async task results, polled in `on_tick()`.
    pub event_rx: Receiver<AppEvent>,

    event_tx: Sender<AppEvent>,
}

impl App {
    /// Create the app with the HTTP client and browser payment widget.
    pub fn new(config: StudioConfig) -> Self {
        let api: Arc<dyn ApiService> = Arc::new(ApiClient::from_config(&config));
        let widget: Arc<dyn PaymentWidget> = Arc::new(BrowserWidget::new(config.widget_page()));
        Self::with_services(config, api, widget)
    }

    /// Create the app around injected services.
    pub fn with_services(
        config: StudioConfig,
        api: Arc<dyn ApiService>,
        widget: Arc<dyn PaymentWidget>,
    ) -> Self {
        let state = AppState::new(Arc::new(config), api, widget);
        let (event_tx, event_rx) = unbounded();

        tracing::info!("App state initialized");

        App {
            state: Arc::new(RwLock::new(state)),
            event_rx,
            event_tx,
        }
    }

    /// Kick off the initial loads. Must run inside a Tokio runtime.
    ///
    /// Fetches the catalog and signs in with a launch token when one is configured.
    pub fn start(&mut self) {
        tasks::catalog::fetch_templates(self.state.clone(), self.event_tx.clone());

        let launch_token = self.state.read().config.auth_token.clone();
        if let Some(token) = launch_token {
            tracing::info!("Signing in with launch token");
            handlers::session::handle_sign_in(self.state.clone(), self.event_tx.clone(), token);
        }
    }

    /// Called every frame to apply async task results.
    pub fn on_tick(&mut self) {
        let mut events_processed = 0u32;
        while let Ok(event) = self.event_rx.try_recv() {
            events_processed += 1;
            self.handle_event(event);
        }
        if events_processed > 0 {
            tracing::trace!(events_processed, "on_tick: processed events");
        }
    }

    /// Handle async event results
    ///
    /// Delegates to the event_handler module for processing.
    fn handle_event(&mut self, event: AppEvent) {
        self.handle_event_impl(event);
    }

    /// Stop background work before the window closes.
    pub fn shutdown(&mut self) {
        let mut state = self.state.write();
        state.balance.stop();
        state.swap.teardown();
        tracing::info!("App shut down");
    }

    /// Take the notices queued since the last frame.
    pub fn take_notifications(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.state.write().pending_notifications)
    }

    pub fn handle_screen_change(&mut self, screen: Screen) {
        handlers::navigation::handle_screen_change(self.state.clone(), self.event_tx.clone(), screen);
    }

    pub fn handle_sign_in_request(&mut self, return_to: Screen) {
        handlers::navigation::handle_sign_in_request(self.state.clone(), self.event_tx.clone(), return_to);
    }

    pub fn handle_filter_change(&mut self, filter: MediaFilter) {
        handlers::navigation::handle_filter_change(self.state.clone(), filter);
    }

    pub fn refresh_templates(&mut self) {
        tasks::catalog::fetch_templates(self.state.clone(), self.event_tx.clone());
    }

    pub fn refresh_history(&mut self) {
        tasks::history::fetch_history(self.state.clone(), self.event_tx.clone());
    }

    pub fn handle_template_click(&mut self, template: Template) {
        handlers::swap::handle_template_click(self.state.clone(), template);
    }

    pub fn handle_open_template_id(&mut self, id: i64) {
        handlers::swap::handle_open_template_id(self.state.clone(), self.event_tx.clone(), id);
    }

    pub fn handle_source_selected(&mut self, path: PathBuf) {
        handlers::swap::handle_source_selected(self.state.clone(), path);
    }

    pub fn handle_swap_start(&mut self) {
        handlers::swap::handle_swap_start(self.state.clone(), self.event_tx.clone());
    }

    pub fn handle_swap_reset(&mut self) {
        handlers::swap::handle_swap_reset(self.state.clone());
    }

    pub fn handle_open_result(&mut self, url: &str) {
        handlers::swap::handle_open_result(self.state.clone(), url);
    }

    pub fn handle_sign_in(&mut self, token: String) -> bool {
        handlers::session::handle_sign_in(self.state.clone(), self.event_tx.clone(), token)
    }

    pub fn handle_sign_out(&mut self) {
        handlers::session::handle_sign_out(self.state.clone());
    }

    pub fn handle_buy_click(&mut self, package: &'static Package) {
        handlers::checkout::handle_buy_click(self.state.clone(), self.event_tx.clone(), package);
    }

    pub fn handle_completion_submit(&mut self) {
        handlers::checkout::handle_completion_submit(self.state.clone(), self.event_tx.clone());
    }

    pub fn handle_checkout_dismiss(&mut self) {
        handlers::checkout::handle_checkout_dismiss(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::MockApiService;
    use crate::services::payment_widget::MockPaymentWidget;
    use shared::{GemBalance, MediaKind};

    fn app(api: MockApiService) -> App {
        App::with_services(StudioConfig::default(), Arc::new(api), Arc::new(MockPaymentWidget::new()))
    }

    fn template(id: i64, kind: MediaKind) -> Template {
        Template {
            id,
            title: format!("Template {}", id),
            kind,
            thumbnail: format!("/static/thumbs/{}.png", id),
            source_url: None,
            cost: 1,
            created_at: None,
        }
    }

    #[test]
    fn test_initial_state() {
        let app = app(MockApiService::new());
        let state = app.state.read();
        assert_eq!(state.current_screen, Screen::Gallery);
        assert!(!state.is_authenticated());
        assert_eq!(state.balance.display(), "...");
    }

    #[tokio::test]
    async fn test_gallery_shows_one_entry_per_template() {
        let mut api = MockApiService::new();
        api.expect_list_templates().times(1).returning(|| {
            Ok(vec![
                template(1, MediaKind::Image),
                template(2, MediaKind::Video),
                template(3, MediaKind::Image),
            ])
        });
        let mut app = app(api);
        app.start();

        let event = app.event_rx.recv().await.unwrap();
        app.handle_event(event);

        let state = app.state.read();
        assert!(state.catalog.loaded);
        assert!(!state.catalog.loading);
        assert_eq!(state.catalog.visible().len(), 3);
    }

    #[tokio::test]
    async fn test_gallery_survives_fetch_failure() {
        let mut api = MockApiService::new();
        api.expect_list_templates()
            .returning(|| Err(crate::core::AppError::Network("connection refused".to_string())));
        let mut app = app(api);
        app.start();

        let event = app.event_rx.recv().await.unwrap();
        app.handle_event(event);

        let state = app.state.read();
        assert!(state.catalog.loaded);
        assert!(state.catalog.templates.is_empty());
    }

    #[test]
    fn test_history_requires_sign_in() {
        let mut app = app(MockApiService::new());
        app.handle_screen_change(Screen::History);

        let state = app.state.read();
        assert_eq!(state.current_screen, Screen::SignIn);
        assert_eq!(state.sign_in.return_to, Screen::History);
    }

    #[test]
    fn test_leaving_swap_screen_tears_down() {
        let mut app = app(MockApiService::new());
        app.handle_template_click(template(4, MediaKind::Image));
        let (generation, token) = app.state.write().swap.begin();

        app.handle_screen_change(Screen::BuyGems);

        assert!(token.is_cancelled());
        let state = app.state.read();
        assert_ne!(state.swap.generation(), generation);
        assert!(!state.swap.is_busy());
    }

    #[test]
    fn test_sign_in_request_keeps_template() {
        let mut app = app(MockApiService::new());
        app.handle_template_click(template(5, MediaKind::Video));

        app.handle_sign_in_request(Screen::Swap);

        let state = app.state.read();
        assert_eq!(state.current_screen, Screen::SignIn);
        assert_eq!(state.sign_in.return_to, Screen::Swap);
        assert_eq!(state.swap.template.as_ref().map(|t| t.id), Some(5));
    }

    #[tokio::test]
    async fn test_sign_in_from_sign_in_screen_lands_on_gallery() {
        let mut api = MockApiService::new();
        api.expect_get_balance()
            .returning(|_| Ok(GemBalance { gem_balance: 3 }));
        let mut app = app(api);
        app.state.write().current_screen = Screen::SignIn;

        app.handle_sign_in_request(Screen::SignIn);
        assert_eq!(app.state.read().sign_in.return_to, Screen::Gallery);

        assert!(app.handle_sign_in("tok".to_string()));
        assert_eq!(app.state.read().current_screen, Screen::Gallery);
        app.shutdown();
    }

    #[test]
    fn test_take_notifications_drains() {
        let mut app = app(MockApiService::new());
        app.state.write().notify(Notice::info("hello"));
        assert_eq!(app.take_notifications().len(), 1);
        assert!(app.take_notifications().is_empty());
    }
}
