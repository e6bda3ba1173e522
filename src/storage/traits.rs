//! Collaborator traits for reading the raw batch and writing the summary

use async_trait::async_trait;

use super::error::StorageResult;

/// Where one complete raw batch is fetched from
#[async_trait]
pub trait BatchSource: Send + Sync {
    /// Human-readable location, used in logs and errors
    fn location(&self) -> String;

    /// Fetch the whole batch as CSV bytes
    async fn fetch_batch(&self) -> StorageResult<Vec<u8>>;
}

/// Where the hourly summary table is written
#[async_trait]
pub trait SummarySink: Send + Sync {
    /// Human-readable location, used in logs and errors
    fn location(&self) -> String;

    /// Replace any previous content at the location with `body`.
    ///
    /// Implementations must never leave a partially written object behind.
    async fn write_summary(&self, body: &[u8]) -> StorageResult<()>;
}
