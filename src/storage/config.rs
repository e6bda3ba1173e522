//! Storage configuration types and utilities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Object key of the raw batch, relative to the bucket or data directory
pub const DEFAULT_SOURCE_KEY: &str = "raw_data/tweets.csv";

/// Object key of the hourly summary, relative to the bucket or data directory
pub const DEFAULT_SINK_KEY: &str = "output_data/hourly_output.csv";

/// Local directory the file backend resolves default keys against
pub const DEFAULT_DATA_DIR: &str = "data";

/// Storage backend type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Local filesystem (default)
    #[default]
    File,
    /// Memory storage (for testing)
    Memory,
    /// S3-compatible object store, requires the `s3` feature
    S3,
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
            Self::S3 => write!(f, "s3"),
        }
    }
}

/// Where a source or sink lives.
///
/// `path` is used by the file backend and `key` by the s3 backend; both fall
/// back to the side's default key when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub backend: BackendType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl LocationConfig {
    /// File backend location at `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendType::File,
            path: Some(path.into()),
            key: None,
        }
    }

    /// Resolve the local path, defaulting to `data/<default_key>`
    pub fn path_or(&self, default_key: &str) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR).join(default_key))
    }

    /// Resolve the object key
    pub fn key_or(&self, default_key: &str) -> String {
        self.key.clone().unwrap_or_else(|| default_key.to_string())
    }
}

/// S3 storage configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket holding both the raw batch and the summary
    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint (MinIO, LocalStack)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Static credentials; the AWS default provider chain is used when unset
    #[serde(default)]
    pub access_key_id: Option<String>,

    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Path-style addressing, needed by most self-hosted endpoints
    #[serde(default)]
    pub force_path_style: bool,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            region: default_region(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            force_path_style: false,
        }
    }
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}

// Default value functions for serde
fn default_bucket() -> String {
    "twitterdata-analytics".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_defaults() {
        let loc = LocationConfig::default();
        assert_eq!(loc.backend, BackendType::File);
        assert_eq!(
            loc.path_or(DEFAULT_SOURCE_KEY),
            PathBuf::from("data/raw_data/tweets.csv")
        );
        assert_eq!(loc.key_or(DEFAULT_SINK_KEY), "output_data/hourly_output.csv");
    }

    #[test]
    fn test_backend_type_deserializes_lowercase() {
        let loc: LocationConfig = toml::from_str("backend = \"s3\"\nkey = \"in/batch.csv\"").unwrap();
        assert_eq!(loc.backend, BackendType::S3);
        assert_eq!(loc.key_or(DEFAULT_SOURCE_KEY), "in/batch.csv");
    }

    #[test]
    fn test_s3_debug_redacts_secret() {
        let cfg = S3Config {
            access_key_id: Some("AKIA".to_string()),
            secret_access_key: Some("hunter2".to_string()),
            ..S3Config::default()
        };
        let debug = format!("{:?}", cfg);
        assert!(debug.contains("AKIA"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
