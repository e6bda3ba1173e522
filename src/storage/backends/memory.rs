//! In-memory storage backend for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::storage::{
    error::{StorageError, StorageResult},
    traits::{BatchSource, SummarySink},
};

/// In-memory storage backend for testing.
///
/// Clones share the same buffer, so a test can keep one handle and give
/// another to the pipeline.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    name: String,
    contents: Arc<RwLock<Option<Vec<u8>>>>,
    writes: Arc<RwLock<usize>>,
}

impl MemoryBackend {
    /// Create an empty memory backend
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a memory backend pre-loaded with `contents`
    pub fn with_contents(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: Arc::new(RwLock::new(Some(contents.into()))),
            writes: Arc::new(RwLock::new(0)),
        }
    }

    /// Current contents, if anything was stored
    pub async fn contents(&self) -> Option<Vec<u8>> {
        self.contents.read().await.clone()
    }

    /// Number of completed writes
    pub async fn write_count(&self) -> usize {
        *self.writes.read().await
    }

    fn uri(&self) -> String {
        format!("memory://{}", self.name)
    }
}

#[async_trait]
impl BatchSource for MemoryBackend {
    fn location(&self) -> String {
        self.uri()
    }

    async fn fetch_batch(&self) -> StorageResult<Vec<u8>> {
        debug!("Reading batch from {}", self.uri());
        self.contents
            .read()
            .await
            .clone()
            .ok_or_else(|| StorageError::not_found(self.uri()))
    }
}

#[async_trait]
impl SummarySink for MemoryBackend {
    fn location(&self) -> String {
        self.uri()
    }

    async fn write_summary(&self, body: &[u8]) -> StorageResult<()> {
        debug!("Writing {} bytes to {}", body.len(), self.uri());
        *self.contents.write().await = Some(body.to_vec());
        *self.writes.write().await += 1;
        Ok(())
    }
}
