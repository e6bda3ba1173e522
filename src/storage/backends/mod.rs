//! Storage backend implementations

pub mod file;
pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

pub use file::FileBackend;
pub use memory::MemoryBackend;
#[cfg(feature = "s3")]
pub use s3::S3Backend;
