//! Directory Store: the in-memory directory and its persisted mirror
//!
//! This is the only component that touches persistent storage. Every
//! mutation rewrites the full stored list; a failed write rolls the
//! in-memory change back so the two never disagree.

use std::sync::Arc;

use crate::error::{DirectoryError, DirectoryResult};
use crate::model::{Directory, Entry, EntryId};
use crate::providers::Provider;
use crate::storage::KeyValueStore;

pub struct DirectoryStore {
    storage: Arc<dyn KeyValueStore>,
    provider: Arc<dyn Provider>,
    key: String,
    directory: Directory,
}

impl DirectoryStore {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        provider: Arc<dyn Provider>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            provider,
            key: key.into(),
            directory: Directory::new(),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn find(&self, id: &EntryId) -> Option<&Entry> {
        self.directory.get(id)
    }

    /// Whether storage holds anything under our key, empty list or not.
    /// An unreadable store counts as "nothing there".
    pub fn has_representation(&self) -> bool {
        match self.storage.contains(&self.key) {
            Ok(present) => present,
            Err(e) => {
                log::warn!("Could not check storage for {:?}: {}", self.key, e);
                false
            }
        }
    }

    /// Read the persisted directory. Missing, unreadable and malformed
    /// data all decode to an empty directory.
    pub fn load_from_storage(&self) -> Directory {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Directory::new(),
            Err(e) => {
                log::warn!("Could not read {:?} from storage: {}", self.key, e);
                return Directory::new();
            }
        };

        match serde_json::from_str::<Directory>(&raw) {
            Ok(directory) => directory,
            Err(e) => {
                log::warn!("Stored directory under {:?} is not a list of entries: {}", self.key, e);
                Directory::new()
            }
        }
    }

    pub async fn load_from_network(&self) -> DirectoryResult<Directory> {
        let people = self.provider.fetch_people().await?;
        Ok(Directory::from_entries(people))
    }

    /// Overwrite the stored representation with `directory`.
    pub fn persist(&self, directory: &Directory) -> DirectoryResult<()> {
        let json = serde_json::to_string(directory)
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;
        self.storage.set(&self.key, &json)?;
        log::debug!("Persisted {} entries under {:?}", directory.len(), self.key);
        Ok(())
    }

    /// Swap in a freshly hydrated directory. Does not write to storage.
    pub fn replace(&mut self, directory: Directory) {
        self.directory = directory;
    }

    pub fn add(&mut self, raw_name: &str) -> DirectoryResult<Entry> {
        let mut entry = Entry::from_name(raw_name)?;
        while self.directory.contains(&entry.id) {
            entry.id = EntryId::generate();
        }

        self.directory.push(entry.clone());
        if let Err(e) = self.persist(&self.directory) {
            self.directory.remove(&entry.id);
            return Err(e);
        }

        log::info!("Added {:?} ({})", entry.name, entry.id);
        Ok(entry)
    }

    /// Remove the entry with `id`, handing it back so the caller can name
    /// it. An unknown id changes nothing but the stored list is still
    /// rewritten.
    pub fn remove(&mut self, id: &EntryId) -> DirectoryResult<Option<Entry>> {
        let snapshot = self.directory.clone();
        let removed = self.directory.remove(id);

        if let Err(e) = self.persist(&self.directory) {
            self.directory = snapshot;
            return Err(e);
        }

        match &removed {
            Some(entry) => log::info!("Removed {:?} ({})", entry.name, entry.id),
            None => log::debug!("No entry with id {} to remove", id),
        }
        Ok(removed)
    }
}
