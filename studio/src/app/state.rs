//! # Application State Types
//!
//! All state-related types for the application: screens, session, catalog,
//! swap workflow, history, checkout and pending notifications.

use std::fmt;
use std::sync::Arc;

use shared::{MediaKind, SwapTask, Template};

use crate::app::balance::BalanceStore;
use crate::app::checkout::CheckoutPhase;
use crate::app::workflow::SwapWorkflow;
use crate::config::StudioConfig;
use crate::core::service::ApiService;
use crate::services::payment_widget::PaymentWidget;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Template catalog
    Gallery,
    /// Swap workflow for the selected template
    Swap,
    /// Past swap tasks
    History,
    /// Gem packages and checkout
    BuyGems,
    /// Session token entry
    SignIn,
}

impl Screen {
    /// Screens reachable from the nav bar, in order.
    pub fn nav() -> &'static [Screen] {
        &[Screen::Gallery, Screen::History, Screen::BuyGems]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Gallery => "Templates",
            Screen::Swap => "Face Swap",
            Screen::History => "History",
            Screen::BuyGems => "Buy Gems",
            Screen::SignIn => "Sign In",
        }
    }
}

/// Bearer token for the signed-in user. Kept in memory only.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self { token })
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// Gallery media filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaFilter {
    #[default]
    All,
    Images,
    Videos,
}

impl MediaFilter {
    pub fn all() -> [MediaFilter; 3] {
        [MediaFilter::All, MediaFilter::Images, MediaFilter::Videos]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaFilter::All => "All",
            MediaFilter::Images => "Images",
            MediaFilter::Videos => "Videos",
        }
    }

    pub fn matches(&self, kind: MediaKind) -> bool {
        match self {
            MediaFilter::All => true,
            MediaFilter::Images => kind == MediaKind::Image,
            MediaFilter::Videos => kind == MediaKind::Video,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub templates: Vec<Template>,
    pub loading: bool,
    /// At least one fetch has finished.
    pub loaded: bool,
    pub filter: MediaFilter,
}

impl CatalogState {
    pub fn visible(&self) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| self.filter.matches(t.kind))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    /// Newest first.
    pub items: Vec<SwapTask>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutState {
    pub phase: CheckoutPhase,
    pub payment_id_input: String,
    pub signature_input: String,
}

#[derive(Debug, Clone)]
pub struct SignInState {
    pub token_input: String,
    pub error: Option<String>,
    /// Screen to return to after signing in.
    pub return_to: Screen,
}

impl Default for SignInState {
    fn default() -> Self {
        Self {
            token_input: String::new(),
            error: None,
            return_to: Screen::Gallery,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast waiting to be shown by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Shared application state.
///
/// Held as `Arc<RwLock<AppState>>`. Locks are taken briefly and never held
/// across an `.await`.
#[derive(Clone)]
pub struct AppState {
    pub current_screen: Screen,
    pub session: Option<Session>,
    pub catalog: CatalogState,
    pub swap: SwapWorkflow,
    pub history: HistoryState,
    pub checkout: CheckoutState,
    pub sign_in: SignInState,
    pub balance: BalanceStore,
    pub pending_notifications: Vec<Notice>,
    pub config: Arc<StudioConfig>,
    pub api_client: Arc<dyn ApiService>,
    pub payment_widget: Arc<dyn PaymentWidget>,
}

impl AppState {
    pub fn new(
        config: Arc<StudioConfig>,
        api_client: Arc<dyn ApiService>,
        payment_widget: Arc<dyn PaymentWidget>,
    ) -> Self {
        Self {
            current_screen: Screen::Gallery,
            session: None,
            catalog: CatalogState::default(),
            swap: SwapWorkflow::default(),
            history: HistoryState::default(),
            checkout: CheckoutState::default(),
            sign_in: SignInState::default(),
            balance: BalanceStore::new(config.balance_refresh_interval()),
            pending_notifications: Vec::new(),
            config,
            api_client,
            payment_widget,
        }
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.token.clone())
    }

    /// Screens that redirect to sign-in without a session.
    ///
    /// The swap screen is reachable signed out and shows its own prompt.
    pub fn requires_auth(screen: Screen) -> bool {
        matches!(screen, Screen::History)
    }

    pub fn notify(&mut self, notice: Notice) {
        self.pending_notifications.push(notice);
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("current_screen", &self.current_screen)
            .field("session", &self.session)
            .field("templates", &self.catalog.templates.len())
            .field("swap_phase", &self.swap.phase)
            .field("checkout_phase", &self.checkout.phase)
            .field("balance", &self.balance)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) fn test_state(
    api: crate::core::service::MockApiService,
) -> Arc<parking_lot::RwLock<AppState>> {
    test_state_with(
        api,
        crate::services::payment_widget::MockPaymentWidget::new(),
        StudioConfig::default(),
    )
}

#[cfg(test)]
pub(crate) fn test_state_with(
    api: crate::core::service::MockApiService,
    widget: crate::services::payment_widget::MockPaymentWidget,
    config: StudioConfig,
) -> Arc<parking_lot::RwLock<AppState>> {
    Arc::new(parking_lot::RwLock::new(AppState::new(
        Arc::new(config),
        Arc::new(api),
        Arc::new(widget),
    )))
}
