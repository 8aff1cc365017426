//! Startup hydration: decide between cache and network, once
//!
//! ```text
//! Init ──key absent──▶ Fetching ──ok──▶ Ready(Network)
//!   │                     ▲  └──err──▶ Ready(Degraded)
//!   └─key present─▶ ReadingCache ──empty──┘
//!                         └──non-empty──▶ Ready(Cache)
//! ```
//!
//! An empty cache is treated as "not populated yet" and refetched, even if
//! the user emptied the list on purpose.

use std::sync::Arc;
use tokio::sync::watch;

use crate::commands::Session;
use crate::notifications::{messages, Notifier, Severity};
use crate::store::DirectoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    Cache,
    Network,
    /// Initial fetch failed; serving an empty directory.
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Init,
    ReadingCache,
    Fetching,
    Ready(HydrationSource),
}

impl SyncState {
    pub fn is_ready(&self) -> bool {
        matches!(self, SyncState::Ready(_))
    }
}

pub struct SyncController {
    store: DirectoryStore,
    notifier: Arc<dyn Notifier>,
    state: SyncState,
    loading: watch::Sender<bool>,
}

impl SyncController {
    pub fn new(store: DirectoryStore, notifier: Arc<dyn Notifier>) -> Self {
        let (loading, _) = watch::channel(true);
        Self {
            store,
            notifier,
            state: SyncState::Init,
            loading,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn store(&self) -> &DirectoryStore {
        &self.store
    }

    /// Loading indicator; `true` until the controller reaches `Ready`.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Perform a single transition. Does nothing once `Ready`.
    pub async fn step(&mut self) -> SyncState {
        let next = match self.state {
            SyncState::Init => {
                if self.store.has_representation() {
                    SyncState::ReadingCache
                } else {
                    SyncState::Fetching
                }
            }
            SyncState::ReadingCache => {
                let cached = self.store.load_from_storage();
                if cached.is_empty() {
                    log::info!("Cached directory is empty, refetching");
                    SyncState::Fetching
                } else {
                    log::info!("Hydrated {} entries from cache", cached.len());
                    self.store.replace(cached);
                    SyncState::Ready(HydrationSource::Cache)
                }
            }
            SyncState::Fetching => self.fetch().await,
            ready @ SyncState::Ready(_) => return ready,
        };

        log::debug!("Sync state {:?} -> {:?}", self.state, next);
        self.state = next;
        if next.is_ready() {
            self.loading.send_replace(false);
        }
        next
    }

    async fn fetch(&mut self) -> SyncState {
        match self.store.load_from_network().await {
            Ok(fetched) => {
                log::info!("Hydrated {} entries from network", fetched.len());
                if let Err(e) = self.store.persist(&fetched) {
                    log::error!("Could not cache fetched directory: {}", e);
                    self.notifier
                        .notify(&messages::save_failed(&e.to_string()), Severity::Error);
                }
                self.store.replace(fetched);
                SyncState::Ready(HydrationSource::Network)
            }
            Err(e) => {
                log::error!("Initial fetch failed: {}", e);
                self.notifier
                    .notify(messages::SERVER_UNREACHABLE, Severity::Error);
                SyncState::Ready(HydrationSource::Degraded)
            }
        }
    }

    /// Run hydration to completion and hand the store over to a session.
    pub async fn initialize(mut self) -> Session {
        while !self.state.is_ready() {
            self.step().await;
        }
        let source = match self.state {
            SyncState::Ready(source) => source,
            _ => HydrationSource::Degraded,
        };
        Session::new(self.store, self.notifier, source)
    }
}
