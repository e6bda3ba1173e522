//! Storage collaborators for the pipeline
//!
//! The pipeline reads one raw batch from a [`BatchSource`] and writes the
//! hourly summary to a [`SummarySink`]. Backends: local files, memory (for
//! tests) and S3 behind the `s3` feature.

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod traits;

pub use backends::{FileBackend, MemoryBackend};
#[cfg(feature = "s3")]
pub use backends::S3Backend;
pub use config::{BackendType, LocationConfig, S3Config};
pub use error::{StorageError, StorageResult};
pub use factory::StorageFactory;
pub use traits::{BatchSource, SummarySink};
