//! Local filesystem backend

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::storage::{
    error::{StorageError, StorageResult},
    traits::{BatchSource, SummarySink},
};

/// Reads or writes a single file.
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so readers only ever observe a complete summary.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl BatchSource for FileBackend {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_batch(&self) -> StorageResult<Vec<u8>> {
        debug!("Reading batch from {}", self.path.display());
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::not_found(self.path.display()))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[async_trait]
impl SummarySink for FileBackend {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn write_summary(&self, body: &[u8]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        debug!(
            "Writing {} bytes to {} via {}",
            body.len(),
            self.path.display(),
            tmp.display()
        );
        fs::write(&tmp, body).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StorageError::Io(e));
        }
        Ok(())
    }
}
