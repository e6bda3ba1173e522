//! Storage factory for creating source and sink instances

use super::backends::{FileBackend, MemoryBackend};
#[cfg(feature = "s3")]
use super::backends::S3Backend;
use super::config::{BackendType, LocationConfig, S3Config, DEFAULT_SINK_KEY, DEFAULT_SOURCE_KEY};
use super::error::StorageResult;
use super::traits::{BatchSource, SummarySink};

/// Factory for creating storage instances
pub struct StorageFactory;

impl StorageFactory {
    /// Create the batch source described by `location`
    pub async fn source(
        location: &LocationConfig,
        s3: &S3Config,
    ) -> StorageResult<Box<dyn BatchSource>> {
        match location.backend {
            BackendType::File => Ok(Box::new(FileBackend::new(
                location.path_or(DEFAULT_SOURCE_KEY),
            ))),
            BackendType::Memory => Ok(Box::new(MemoryBackend::new(
                location.key_or(DEFAULT_SOURCE_KEY),
            ))),
            BackendType::S3 => Self::s3_source(location, s3).await,
        }
    }

    /// Create the summary sink described by `location`
    pub async fn sink(
        location: &LocationConfig,
        s3: &S3Config,
    ) -> StorageResult<Box<dyn SummarySink>> {
        match location.backend {
            BackendType::File => Ok(Box::new(FileBackend::new(
                location.path_or(DEFAULT_SINK_KEY),
            ))),
            BackendType::Memory => Ok(Box::new(MemoryBackend::new(
                location.key_or(DEFAULT_SINK_KEY),
            ))),
            BackendType::S3 => Self::s3_sink(location, s3).await,
        }
    }

    #[cfg(feature = "s3")]
    async fn s3_source(
        location: &LocationConfig,
        s3: &S3Config,
    ) -> StorageResult<Box<dyn BatchSource>> {
        let backend = S3Backend::new(s3, location.key_or(DEFAULT_SOURCE_KEY)).await?;
        Ok(Box::new(backend))
    }

    #[cfg(not(feature = "s3"))]
    async fn s3_source(
        _location: &LocationConfig,
        _s3: &S3Config,
    ) -> StorageResult<Box<dyn BatchSource>> {
        Err(super::error::StorageError::configuration(
            "S3 backend not enabled. Enable with --features s3",
        ))
    }

    #[cfg(feature = "s3")]
    async fn s3_sink(
        location: &LocationConfig,
        s3: &S3Config,
    ) -> StorageResult<Box<dyn SummarySink>> {
        let backend = S3Backend::new(s3, location.key_or(DEFAULT_SINK_KEY)).await?;
        Ok(Box::new(backend))
    }

    #[cfg(not(feature = "s3"))]
    async fn s3_sink(
        _location: &LocationConfig,
        _s3: &S3Config,
    ) -> StorageResult<Box<dyn SummarySink>> {
        Err(super::error::StorageError::configuration(
            "S3 backend not enabled. Enable with --features s3",
        ))
    }
}
