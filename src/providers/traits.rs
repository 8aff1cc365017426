use async_trait::async_trait;

use crate::model::Entry;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// A read-only remote source of people.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    /// Fetch the full list, mapped into directory entries
    async fn fetch_people(&self) -> ProviderResult<Vec<Entry>>;
}
