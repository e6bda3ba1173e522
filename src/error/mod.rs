use std::fmt::Display;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

use crate::storage::error::StorageError;

/// The unified error type for the whole pipeline
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Source error: {message}")]
    Source {
        code: u16,
        message: String,
        location: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Sink error: {message}")]
    Sink {
        code: u16,
        message: String,
        location: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Decode error: {message}")]
    Decode {
        code: u16,
        message: String,
        row: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Repair error: {message}")]
    Repair {
        code: u16,
        message: String,
        row: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        findings: Vec<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] {message}")]
    Other {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl EtlError {
    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a source error with specific code and location
    pub fn source_with_code(
        code: u16,
        message: impl Into<String>,
        location: Option<String>,
    ) -> Self {
        Self::Source {
            code,
            message: message.into(),
            location,
            source: None,
        }
    }

    /// Create a sink error with specific code and location
    pub fn sink_with_code(code: u16, message: impl Into<String>, location: Option<String>) -> Self {
        Self::Sink {
            code,
            message: message.into(),
            location,
            source: None,
        }
    }

    /// Create a decode error for a 1-based data row
    pub fn decode_with_code(code: u16, message: impl Into<String>, row: Option<usize>) -> Self {
        Self::Decode {
            code,
            message: message.into(),
            row,
            source: None,
        }
    }

    /// Create a repair error for a 1-based data row
    pub fn repair_with_code(code: u16, message: impl Into<String>, row: Option<usize>) -> Self {
        Self::Repair {
            code,
            message: message.into(),
            row,
            source: None,
        }
    }

    /// Create a validation error carrying every finding of the report
    pub fn validation_failed(findings: Vec<String>) -> Self {
        Self::Validation {
            code: ErrorCode::VALIDATION_ENFORCED,
            message: format!("{} validation finding(s) in batch", findings.len()),
            findings,
            source: None,
        }
    }

    /// Create a generic other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Source { source: src, .. }
            | Self::Sink { source: src, .. }
            | Self::Decode { source: src, .. }
            | Self::Repair { source: src, .. }
            | Self::Validation { source: src, .. }
            | Self::Other { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Source { message, .. }
            | Self::Sink { message, .. }
            | Self::Decode { message, .. }
            | Self::Repair { message, .. }
            | Self::Validation { message, .. }
            | Self::Other { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Source { .. } => 3,
            Self::Sink { .. } => 4,
            Self::Decode { .. } => 5,
            Self::Repair { .. } => 6,
            Self::Validation { .. } => 8,
            Self::Other { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Source { code, .. }
            | Self::Sink { code, .. }
            | Self::Decode { code, .. }
            | Self::Repair { code, .. }
            | Self::Validation { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Source {
                message, location, ..
            } => match location {
                Some(loc) => format!("Could not read batch from {}: {}", loc, message),
                None => format!("Could not read batch: {}", message),
            },
            Self::Sink {
                message, location, ..
            } => match location {
                Some(loc) => format!("Could not write summary to {}: {}", loc, message),
                None => format!("Could not write summary: {}", message),
            },
            Self::Decode { message, row, .. } => match row {
                Some(r) => format!("Row {} is malformed: {}", r, message),
                None => format!("Malformed input: {}", message),
            },
            Self::Repair { message, row, .. } => match row {
                Some(r) => format!("Row {} cannot be repaired: {}", r, message),
                None => format!("Batch cannot be repaired: {}", message),
            },
            Self::Validation { findings, .. } => {
                let mut msg = String::from("Batch failed validation:");
                for finding in findings {
                    msg.push_str("\n  - ");
                    msg.push_str(finding);
                }
                msg
            }
            Self::Other { message, .. } => message.clone(),
        }
    }

    /// Check if a new attempt of the same run could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Source { code, .. } => {
                *code == ErrorCode::SOURCE_UNAVAILABLE || *code == ErrorCode::SOURCE_IO_ERROR
            }
            Self::Sink { code, .. } => {
                *code == ErrorCode::SINK_UNAVAILABLE || *code == ErrorCode::SINK_IO_ERROR
            }
            _ => false,
        }
    }

    /// Wrap a storage failure raised while fetching the raw batch.
    ///
    /// A location that cannot be built from the configuration is a
    /// configuration error, not a source failure.
    pub fn from_source(err: StorageError, location: impl Into<String>) -> Self {
        let code = match &err {
            StorageError::Configuration(_) => return Self::from_storage_config(err),
            StorageError::NotFound(_) => ErrorCode::SOURCE_NOT_FOUND,
            StorageError::Io(_) => ErrorCode::SOURCE_IO_ERROR,
            StorageError::Unavailable(_) => ErrorCode::SOURCE_UNAVAILABLE,
            StorageError::Backend(_) => ErrorCode::SOURCE_GENERIC,
        };
        Self::source_with_code(code, err.to_string(), Some(location.into())).with_source(err)
    }

    /// Wrap a storage failure raised while writing the summary
    pub fn from_sink(err: StorageError, location: impl Into<String>) -> Self {
        let code = match &err {
            StorageError::Configuration(_) => return Self::from_storage_config(err),
            StorageError::Io(_) => ErrorCode::SINK_IO_ERROR,
            StorageError::Unavailable(_) => ErrorCode::SINK_UNAVAILABLE,
            StorageError::NotFound(_) | StorageError::Backend(_) => ErrorCode::SINK_GENERIC,
        };
        Self::sink_with_code(code, err.to_string(), Some(location.into())).with_source(err)
    }

    fn from_storage_config(err: StorageError) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, err.to_string()).with_source(err)
    }
}

/// Type alias for Results using EtlError
pub type Result<T> = std::result::Result<T, EtlError>;

// Conversion from common error types

impl From<toml::de::Error> for EtlError {
    fn from(err: toml::de::Error) -> Self {
        EtlError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, "Invalid TOML syntax")
            .with_source(err)
    }
}

impl From<csv::Error> for EtlError {
    fn from(err: csv::Error) -> Self {
        // The header is record 0, so record numbers are 1-based data rows
        let row = err.position().map(|pos| pos.record() as usize);
        let code = match err.kind() {
            csv::ErrorKind::UnequalLengths { .. } | csv::ErrorKind::Utf8 { .. } => {
                ErrorCode::DECODE_MALFORMED_ROW
            }
            _ => ErrorCode::DECODE_GENERIC,
        };
        EtlError::decode_with_code(code, err.to_string(), row).with_source(err)
    }
}
