//! User intents against a hydrated directory
//!
//! Errors stop here: they are turned into notifications and the intent
//! reports `None`.

use std::sync::Arc;

use crate::error::DirectoryError;
use crate::model::{Entry, EntryId};
use crate::notifications::{messages, Notifier, Severity};
use crate::store::DirectoryStore;
use crate::sync::HydrationSource;

pub struct Session {
    store: DirectoryStore,
    notifier: Arc<dyn Notifier>,
    source: HydrationSource,
}

impl Session {
    pub(crate) fn new(
        store: DirectoryStore,
        notifier: Arc<dyn Notifier>,
        source: HydrationSource,
    ) -> Self {
        Self {
            store,
            notifier,
            source,
        }
    }

    pub fn source(&self) -> HydrationSource {
        self.source
    }

    pub fn entries(&self) -> &[Entry] {
        self.store.directory().entries()
    }

    pub fn store(&self) -> &DirectoryStore {
        &self.store
    }

    pub fn request_add(&mut self, raw_name: &str) -> Option<Entry> {
        match self.store.add(raw_name) {
            Ok(entry) => Some(entry),
            Err(DirectoryError::Validation(_)) => {
                self.notifier.notify(messages::EMPTY_NAME, Severity::Error);
                None
            }
            Err(e) => {
                log::error!("Add failed: {}", e);
                self.notifier
                    .notify(&messages::save_failed(&e.to_string()), Severity::Error);
                None
            }
        }
    }

    /// Remove by id. The name for the notice comes from the removed entry
    /// itself, never from whatever is on screen.
    pub fn request_remove(&mut self, id: &EntryId) -> Option<Entry> {
        match self.store.remove(id) {
            Ok(Some(entry)) => {
                self.notifier
                    .notify(&messages::removed(&entry.name), Severity::Info);
                Some(entry)
            }
            Ok(None) => None,
            Err(e) => {
                log::error!("Remove failed: {}", e);
                self.notifier
                    .notify(&messages::save_failed(&e.to_string()), Severity::Error);
                None
            }
        }
    }
}
