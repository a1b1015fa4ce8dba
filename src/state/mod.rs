mod sse;

use std::sync::Arc;

use dashmap::DashSet;
use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::match_store::MatchStore, error::ServiceError};

pub use self::sse::SseHub;

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Capacity of the public event channel; slow viewers that lag past this
/// many events simply skip them and resync on their next full fetch.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Central application state: the installed match store, the realtime hub,
/// the degraded flag, and the admin session set.
pub struct AppState {
    match_store: RwLock<Option<Arc<dyn MatchStore>>>,
    events: SseHub,
    degraded: watch::Sender<bool>,
    admin_sessions: DashSet<String>,
    admin_password: Option<String>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig, admin_password: Option<String>) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            match_store: RwLock::new(None),
            events: SseHub::new(EVENT_CHANNEL_CAPACITY),
            degraded: degraded_tx,
            admin_sessions: DashSet::new(),
            admin_password,
            config,
        })
    }

    /// Obtain a handle to the current match store, if one is installed.
    pub async fn match_store(&self) -> Option<Arc<dyn MatchStore>> {
        let guard = self.match_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the match store or fail with a degraded-mode error.
    pub async fn require_match_store(&self) -> Result<Arc<dyn MatchStore>, ServiceError> {
        self.match_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a storage backend and leave degraded mode.
    pub async fn set_match_store(&self, store: Arc<dyn MatchStore>) {
        {
            let mut guard = self.match_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current store and enter degraded mode.
    pub async fn clear_match_store(&self) {
        {
            let mut guard = self.match_store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    /// Broadcast hub fanning out match events to every connected viewer.
    pub fn events(&self) -> &SseHub {
        &self.events
    }

    /// Set of opaque session tokens issued to authenticated admins.
    pub fn admin_sessions(&self) -> &DashSet<String> {
        &self.admin_sessions
    }

    /// Shared admin secret, when one is configured.
    pub fn admin_password(&self) -> Option<&str> {
        self.admin_password.as_deref()
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
