use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod loader;

pub use loader::load_config;

use crate::error::{ErrorCode, EtlError, Result};
use crate::storage::config::{LocationConfig, S3Config};

/// Largest number of decimals averages may be rounded to
pub const MAX_DECIMALS: u32 = 6;

/// Everything one pipeline invocation needs, passed in explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlConfig {
    /// Fail the run when validation reports findings instead of only logging them
    #[serde(default)]
    pub enforce_validation: bool,

    /// Decimal places of the hourly averages
    #[serde(default)]
    pub decimals: u32,

    #[serde(default)]
    pub source: LocationConfig,

    #[serde(default)]
    pub sink: LocationConfig,

    #[serde(default)]
    pub s3: S3Config,

    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Cadence and retry policy of the recurring job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Time between two scheduled invocations
    #[serde(with = "humantime_serde", default = "default_every")]
    pub every: Duration,

    /// Extra attempts after a failed invocation
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Fixed wait before each retry
    #[serde(with = "humantime_serde", default = "default_retry_delay")]
    pub retry_delay: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            every: default_every(),
            retries: default_retries(),
            retry_delay: default_retry_delay(),
        }
    }
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            enforce_validation: false,
            decimals: 0,
            source: LocationConfig::default(),
            sink: LocationConfig::default(),
            s3: S3Config::default(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl EtlConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EtlConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.decimals > MAX_DECIMALS {
            return Err(EtlError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!(
                    "decimals must be at most {}, got {}",
                    MAX_DECIMALS, self.decimals
                ),
            ));
        }

        if self.schedule.every.is_zero() {
            return Err(EtlError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "schedule.every must be greater than zero",
            ));
        }

        if self.s3.bucket.trim().is_empty() {
            return Err(EtlError::config_with_code(
                ErrorCode::CONFIG_MISSING_REQUIRED,
                "s3.bucket must not be empty",
            ));
        }

        #[cfg(not(feature = "s3"))]
        for (side, location) in [("source", &self.source), ("sink", &self.sink)] {
            if location.backend == crate::storage::BackendType::S3 {
                return Err(EtlError::config_with_code(
                    ErrorCode::CONFIG_BACKEND_DISABLED,
                    format!(
                        "{}.backend = \"s3\" needs a build with the `s3` feature",
                        side
                    ),
                ));
            }
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_every() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_retries() -> u32 {
    1
}

fn default_retry_delay() -> Duration {
    Duration::from_secs(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::BackendType;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_match_daily_job() {
        let config = EtlConfig::default();
        assert!(!config.enforce_validation);
        assert_eq!(config.decimals, 0);
        assert_eq!(config.schedule.every, Duration::from_secs(86_400));
        assert_eq!(config.schedule.retries, 1);
        assert_eq!(config.schedule.retry_delay, Duration::from_secs(60));
        assert_eq!(config.s3.bucket, "twitterdata-analytics");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EtlConfig::from_toml_str("").unwrap();
        assert_eq!(config, EtlConfig::default());
    }

    #[test]
    fn test_full_document() {
        let toml_str = r#"
enforce_validation = true
decimals = 2

[source]
backend = "file"
path = "/srv/in/tweets.csv"

[sink]
backend = "s3"
key = "reports/hourly.csv"

[s3]
bucket = "analytics"
region = "eu-west-1"
endpoint = "http://localhost:9000"
force_path_style = true

[schedule]
every = "6h"
retries = 3
retry_delay = "30s"
"#;

        let config: EtlConfig = toml::from_str(toml_str).unwrap();
        assert!(config.enforce_validation);
        assert_eq!(config.decimals, 2);
        assert_eq!(config.source.path, Some(PathBuf::from("/srv/in/tweets.csv")));
        assert_eq!(config.sink.backend, BackendType::S3);
        assert_eq!(config.sink.key.as_deref(), Some("reports/hourly.csv"));
        assert_eq!(config.s3.region, "eu-west-1");
        assert!(config.s3.force_path_style);
        assert_eq!(config.schedule.every, Duration::from_secs(6 * 3600));
        assert_eq!(config.schedule.retries, 3);
        assert_eq!(config.schedule.retry_delay, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = EtlConfig::from_toml_str("decimals = 9").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);

        let err = EtlConfig::from_toml_str("[schedule]\nevery = \"0s\"").unwrap_err();
        assert!(err.to_string().contains("schedule.every"));

        let err = EtlConfig::from_toml_str("[s3]\nbucket = \"\"").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_MISSING_REQUIRED);
    }

    #[cfg(not(feature = "s3"))]
    #[test]
    fn test_s3_backend_needs_feature() {
        let err = EtlConfig::from_toml_str("[sink]\nbackend = \"s3\"").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_BACKEND_DISABLED);
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("sink.backend"));

        let mut config = EtlConfig::default();
        config.source.backend = BackendType::S3;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source.backend"));
    }

    #[test]
    fn test_bad_toml_is_a_config_error() {
        let err = EtlConfig::from_toml_str("decimals = ").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_TOML);
        assert_eq!(err.exit_code(), 2);
    }
}
