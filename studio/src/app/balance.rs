//! # Gem Balance Store
//!
//! Single owner of the signed-in user's gem balance and of its refresh cadence.
//!
//! After sign-in [`BalanceStore::start`] spawns a refresher that fetches at once
//! and then on every interval tick. [`BalanceStore::refresh_now`] asks for an
//! extra fetch without moving the tick schedule. Failed fetches are logged and
//! the last known value is kept. [`BalanceStore::stop`] cancels the refresher
//! and forgets the value.
//!
//! The store is cheap to clone. Every clone shares the same value.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::core::service::ApiService;

/// Shown by the nav bar until the first successful fetch.
pub const PLACEHOLDER: &str = "...";

#[derive(Clone)]
pub struct BalanceStore {
    inner: Arc<Inner>,
}

struct Inner {
    value: RwLock<Option<i64>>,
    refresher: Mutex<Option<Refresher>>,
    interval: Duration,
}

struct Refresher {
    cancel: CancellationToken,
    nudge: Arc<Notify>,
}

impl BalanceStore {
    pub fn new(interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(None),
                refresher: Mutex::new(None),
                interval,
            }),
        }
    }

    /// Last known balance, `None` until the first successful fetch.
    pub fn current(&self) -> Option<i64> {
        *self.inner.value.read()
    }

    /// Nav bar text: the balance or [`PLACEHOLDER`].
    pub fn display(&self) -> String {
        self.current()
            .map(|gems| gems.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// Record a balance reported elsewhere, e.g. by payment verification.
    pub fn set(&self, gems: i64) {
        *self.inner.value.write() = Some(gems);
    }

    pub fn is_running(&self) -> bool {
        self.inner.refresher.lock().is_some()
    }

    /// Spawn the refresher for a session. Replaces any running refresher.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, api: Arc<dyn ApiService>, token: String) {
        let cancel = CancellationToken::new();
        let nudge = Arc::new(Notify::new());

        let previous = self.inner.refresher.lock().replace(Refresher {
            cancel: cancel.clone(),
            nudge: nudge.clone(),
        });
        if let Some(previous) = previous {
            previous.cancel.cancel();
        }

        tracing::info!(interval_secs = self.inner.interval.as_secs(), "Starting balance refresher");
        tokio::spawn(refresh_loop(self.clone(), api, token, cancel, nudge));
    }

    /// Cancel the refresher and forget the value.
    pub fn stop(&self) {
        if let Some(refresher) = self.inner.refresher.lock().take() {
            tracing::info!("Stopping balance refresher");
            refresher.cancel.cancel();
        }
        *self.inner.value.write() = None;
    }

    /// Fetch once more as soon as possible. No-op while signed out.
    pub fn refresh_now(&self) {
        if let Some(refresher) = self.inner.refresher.lock().as_ref() {
            refresher.nudge.notify_one();
        }
    }
}

impl Default for BalanceStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl std::fmt::Debug for BalanceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceStore")
            .field("value", &self.current())
            .field("running", &self.is_running())
            .finish()
    }
}

async fn refresh_loop(
    store: BalanceStore,
    api: Arc<dyn ApiService>,
    token: String,
    cancel: CancellationToken,
    nudge: Arc<Notify>,
) {
    let mut ticker = tokio::time::interval(store.inner.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
            _ = nudge.notified() => {
                tracing::debug!("Balance refresh requested");
            }
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = api.get_balance(&token) => result,
        };

        // The session may have ended while the fetch was in flight.
        if cancel.is_cancelled() {
            break;
        }

        match result {
            Ok(balance) => {
                tracing::debug!(gems = balance.gem_balance, "Balance refreshed");
                store.set(balance.gem_balance);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Balance refresh failed, keeping last value");
            }
        }
    }

    tracing::debug!("Balance refresher stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::MockApiService;
    use crate::core::AppError;
    use shared::GemBalance;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn counting_api(calls: Arc<AtomicUsize>) -> Arc<dyn ApiService> {
        let mut api = MockApiService::new();
        api.expect_get_balance().returning(move |token| {
            assert_eq!(token, "tok");
            let n = calls.fetch_add(1, Ordering::SeqCst) as i64;
            Ok(GemBalance { gem_balance: 100 - n })
        });
        Arc::new(api)
    }

    #[test]
    fn test_placeholder_until_loaded() {
        let store = BalanceStore::default();
        assert_eq!(store.display(), "...");
        store.set(42);
        assert_eq!(store.display(), "42");
        assert_eq!(store.current(), Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_on_start_and_every_tick() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = BalanceStore::new(Duration::from_secs(10));

        store.start(counting_api(calls.clone()), "tok".to_string());
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.current(), Some(100));

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.current(), Some(98));
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_fetches_while_signed_out() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = BalanceStore::new(Duration::from_secs(10));
        let api = counting_api(calls.clone());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.start(api, "tok".to_string());
        settle().await;
        store.stop();
        assert!(!store.is_running());
        assert_eq!(store.display(), "...");

        tokio::time::sleep(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_now_fetches_between_ticks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = BalanceStore::new(Duration::from_secs(10));
        store.start(counting_api(calls.clone()), "tok".to_string());
        settle().await;

        tokio::time::sleep(Duration::from_secs(3)).await;
        store.refresh_now();
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_millis(7_500)).await;
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_last_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut api = MockApiService::new();
        api.expect_get_balance().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(GemBalance { gem_balance: 12 })
            } else {
                Err(AppError::Network("down".to_string()))
            }
        });

        let store = BalanceStore::new(Duration::from_secs(10));
        store.start(Arc::new(api), "tok".to_string());
        settle().await;
        tokio::time::sleep(Duration::from_millis(10_500)).await;
        settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.current(), Some(12));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_finishing_after_stop_is_dropped() {
        let store = BalanceStore::new(Duration::from_secs(10));
        let handle = store.clone();
        let mut api = MockApiService::new();
        api.expect_get_balance().times(1).returning(move |_| {
            handle.stop();
            Ok(GemBalance { gem_balance: 7 })
        });

        store.start(Arc::new(api), "tok".to_string());
        settle().await;

        assert!(!store.is_running());
        assert_eq!(store.current(), None);
    }
}
