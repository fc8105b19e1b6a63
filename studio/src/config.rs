//! # Studio Configuration
//!
//! Runtime configuration resolved in three layers:
//!
//! 1. Built-in defaults ([`StudioConfig::default`])
//! 2. JSON file at `./studio-config.json` (or the path in `STUDIO_CONFIG`)
//! 3. Environment overrides
//!
//! | Variable               | Field             |
//! |------------------------|-------------------|
//! | `STUDIO_API_URL`       | `api_url`         |
//! | `STUDIO_PAYMENT_KEY`   | `payment_key`     |
//! | `STUDIO_CHECKOUT_FLOW` | `checkout_flow`   |
//! | `STUDIO_WIDGET_URL`    | `widget_url`      |
//! | `STUDIO_AUTH_TOKEN`    | `auth_token`      |

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::checkout::CheckoutFlow;
use crate::core::{AppError, Result};

/// Default API base URL, versioned prefix included.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "studio-config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub api_url: String,
    /// Publishable key handed to the embedded payment widget.
    pub payment_key: Option<String>,
    pub checkout_flow: CheckoutFlow,
    /// Page that hosts the embedded payment widget. Defaults to
    /// `{origin}/payments/widget`.
    pub widget_url: Option<String>,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    pub balance_refresh_secs: u64,
    pub request_timeout_secs: u64,
    /// Session token supplied at launch. Never written to disk.
    #[serde(skip)]
    pub auth_token: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            payment_key: None,
            checkout_flow: CheckoutFlow::default(),
            widget_url: None,
            poll_interval_ms: 2_000,
            max_poll_attempts: 150,
            balance_refresh_secs: 10,
            request_timeout_secs: 10,
            auth_token: None,
        }
    }
}

impl StudioConfig {
    /// Resolve the full configuration from file and process environment.
    pub fn load() -> Result<Self> {
        let path = std::env::var("STUDIO_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::resolve(&path, |key| std::env::var(key).ok())
    }

    /// File, then overrides from `lookup`, then [`Self::into_usable`].
    pub fn resolve<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_from_file(path)?.with_overrides(lookup).into_usable()
    }

    /// Downgrade settings that can fall back safely, then validate the rest.
    ///
    /// A widget flow without a `payment_key` falls back to the hosted
    /// redirect. Everything else is kept as resolved.
    pub fn into_usable(mut self) -> Result<Self> {
        if self.checkout_flow == CheckoutFlow::EmbeddedWidget && self.payment_key.is_none() {
            tracing::warn!("Widget checkout needs a payment_key, falling back to hosted redirect");
            self.checkout_flow = CheckoutFlow::HostedRedirect;
        }
        self.validate()?;
        Ok(self)
    }

    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply environment overrides through `lookup`. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get("STUDIO_API_URL") {
            self.api_url = url;
        }
        if let Some(key) = get("STUDIO_PAYMENT_KEY") {
            self.payment_key = Some(key);
        }
        if let Some(flow) = get("STUDIO_CHECKOUT_FLOW") {
            match flow.parse() {
                Ok(flow) => self.checkout_flow = flow,
                Err(e) => tracing::warn!(value = %flow, error = %e, "Ignoring STUDIO_CHECKOUT_FLOW"),
            }
        }
        if let Some(url) = get("STUDIO_WIDGET_URL") {
            self.widget_url = Some(url);
        }
        if let Some(token) = get("STUDIO_AUTH_TOKEN") {
            self.auth_token = Some(token);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }
        if self.poll_interval_ms == 0 || self.max_poll_attempts == 0 {
            return Err(AppError::Config(
                "poll_interval_ms and max_poll_attempts must be positive".to_string(),
            ));
        }
        if self.balance_refresh_secs == 0 {
            return Err(AppError::Config("balance_refresh_secs must be positive".to_string()));
        }
        if self.checkout_flow == CheckoutFlow::EmbeddedWidget && self.payment_key.is_none() {
            return Err(AppError::Config(
                "the widget checkout flow needs a payment_key".to_string(),
            ));
        }
        Ok(())
    }

    /// Origin that relative media paths resolve against.
    pub fn backend_origin(&self) -> String {
        shared::backend_origin(&self.api_url)
    }

    pub fn widget_page(&self) -> String {
        self.widget_url
            .clone()
            .unwrap_or_else(|| format!("{}/payments/widget", self.backend_origin()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn balance_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.balance_refresh_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
