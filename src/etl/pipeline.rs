//! Sequencing of one pipeline invocation
//!
//! source → decode → validate → repair → aggregate → encode → sink.
//! Storage, decode and repair failures are returned to the caller untouched;
//! the sink is only written once the complete summary exists.

use serde::Serialize;
use tracing::{info, warn};

use super::aggregate::aggregate;
use super::repair::repair;
use super::validate::{validate, ValidationReport};
use crate::codec::{decode_batch, encode_summaries};
use crate::config::EtlConfig;
use crate::error::{EtlError, Result};
use crate::model::{Dataset, HourlySummary, RawRecord};
use crate::storage::{BatchSource, StorageFactory, SummarySink};

/// Knobs of the transform stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub enforce_validation: bool,
    pub decimals: u32,
}

impl From<&EtlConfig> for PipelineOptions {
    fn from(config: &EtlConfig) -> Self {
        Self {
            enforce_validation: config.enforce_validation,
            decimals: config.decimals,
        }
    }
}

/// Outcome of one successful invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub records_read: usize,
    pub findings: Vec<String>,
    pub hours_written: usize,
}

/// Result of the pure transform stage
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub report: ValidationReport,
    pub summaries: Vec<HourlySummary>,
}

/// Validate, repair and aggregate one batch without touching storage
pub fn transform(raw: Dataset<RawRecord>, options: PipelineOptions) -> Result<Transformed> {
    let report = validate(&raw);
    for finding in report.findings() {
        warn!(finding = %finding, "Validation finding");
    }
    if options.enforce_validation && !report.is_clean() {
        return Err(EtlError::validation_failed(report.into_findings()));
    }

    let repaired = repair(raw)?;
    info!(records = repaired.len(), "Repaired batch");

    let summaries = aggregate(&repaired, options.decimals);
    info!(hours = summaries.len(), "Aggregated batch by hour");

    Ok(Transformed { report, summaries })
}

pub struct Pipeline {
    source: Box<dyn BatchSource>,
    sink: Box<dyn SummarySink>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(
        source: Box<dyn BatchSource>,
        sink: Box<dyn SummarySink>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            source,
            sink,
            options,
        }
    }

    /// Build the source and sink named by the configuration
    pub async fn from_config(config: &EtlConfig) -> Result<Self> {
        config.validate()?;
        let source = StorageFactory::source(&config.source, &config.s3)
            .await
            .map_err(|e| EtlError::from_source(e, config.source.backend.to_string()))?;
        let sink = StorageFactory::sink(&config.sink, &config.s3)
            .await
            .map_err(|e| EtlError::from_sink(e, config.sink.backend.to_string()))?;

        Ok(Self::new(source, sink, PipelineOptions::from(config)))
    }

    /// Run one complete invocation
    pub async fn run(&self) -> Result<RunSummary> {
        let source_location = self.source.location();
        info!("Fetching batch from {}", source_location);
        let bytes = self
            .source
            .fetch_batch()
            .await
            .map_err(|e| EtlError::from_source(e, source_location))?;

        let raw = decode_batch(&bytes)?;
        let records_read = raw.len();
        info!(records = records_read, "Decoded batch");

        let Transformed { report, summaries } = transform(raw, self.options)?;
        let body = encode_summaries(&summaries)?;

        let sink_location = self.sink.location();
        self.sink
            .write_summary(&body)
            .await
            .map_err(|e| EtlError::from_sink(e, sink_location.clone()))?;
        info!(hours = summaries.len(), "Wrote hourly summary to {}", sink_location);

        Ok(RunSummary {
            records_read,
            findings: report.into_findings(),
            hours_written: summaries.len(),
        })
    }
}

/// Scheduled entry point: build the configured pipeline and run it once
pub async fn extract_transform_load(config: &EtlConfig) -> Result<RunSummary> {
    Pipeline::from_config(config).await?.run().await
}
