//! # Services
//!
//! External collaborators: the backend HTTP API, the embedded payment widget,
//! and the system browser.

pub mod api;
pub mod payment_widget;

pub use api::ApiClient;
pub use payment_widget::{BrowserWidget, PaymentCompletion, PaymentWidget, WidgetOptions};

/// Open a URL in the system browser, logging failures.
pub fn open_in_browser(url: &str) -> bool {
    match open::that(url) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(%url, error = %e, "Failed to open browser");
            false
        }
    }
}
