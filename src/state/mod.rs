mod sse;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{
    config::AppConfig, dao::garment_store::GarmentStore, error::ServiceError,
    services::sse_events,
};

pub use self::sse::SseHub;

pub type SharedState = Arc<AppState>;

const SSE_CAPACITY: usize = 32;

/// Central application state holding the garment store handle and event hub.
pub struct AppState {
    garment_store: RwLock<Option<Arc<dyn GarmentStore>>>,
    sse: SseHub,
    degraded: watch::Sender<bool>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            garment_store: RwLock::new(None),
            sse: SseHub::new(SSE_CAPACITY),
            degraded: degraded_tx,
            config,
        })
    }

    /// Obtain a handle to the current garment store, if one is installed.
    pub async fn garment_store(&self) -> Option<Arc<dyn GarmentStore>> {
        let guard = self.garment_store.read().await;
        guard.as_ref().cloned()
    }

    /// Garment store, or [`ServiceError::Degraded`] while none is installed or it is unhealthy.
    pub async fn require_garment_store(&self) -> Result<Arc<dyn GarmentStore>, ServiceError> {
        if *self.degraded.borrow() {
            return Err(ServiceError::Degraded);
        }
        self.garment_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new garment store implementation and leave degraded mode.
    pub async fn install_garment_store(&self, store: Arc<dyn GarmentStore>) {
        {
            let mut guard = self.garment_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current garment store and enter degraded mode.
    pub async fn clear_garment_store(&self) {
        {
            let mut guard = self.garment_store.write().await;
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

    /// Update the degraded flag, notifying watchers and SSE clients when it changes.
    pub fn update_degraded(&self, value: bool) {
        let changed = self.degraded.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });

        if changed {
            sse_events::broadcast_system_status(&self.sse, value);
        }
    }

    /// Broadcast hub used for the closet SSE stream.
    pub fn sse(&self) -> &SseHub {
        &self.sse
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
