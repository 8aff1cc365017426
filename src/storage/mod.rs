//! Persistent key-value storage backing the directory cache

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Synchronous string key-value store.
///
/// `contains` reports whether a key exists at all, regardless of what its
/// value decodes to.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove(&self, key: &str) -> StorageResult<()>;

    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
