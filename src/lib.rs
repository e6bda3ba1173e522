//! # Tweetflow
//!
//! A batch ETL job for social-media posts: fetch one CSV batch, report its
//! quality problems, repair them, aggregate the posts per hour of day and
//! write the hourly summary back out.
//!
//! ## Usage
//!
//! ```bash
//! tweetflow run [-c tweetflow.toml] [--enforce-validation]
//! tweetflow validate <batch.csv>
//! tweetflow schedule [-c tweetflow.toml]
//! ```
//!
//! ## Modules
//!
//! - `codec` - CSV decoding of raw batches and encoding of hourly summaries
//! - `config` - TOML configuration with serde defaults
//! - `error` - Error type with stable numeric codes and exit codes
//! - `etl` - Validation, repair, hourly aggregation and the run orchestrator
//! - `model` - Raw and repaired records, datasets and summary rows
//! - `scheduler` - Recurring invocation with fixed-delay retry
//! - `storage` - Batch sources and summary sinks (file, memory, S3)
pub mod codec;
pub mod config;
pub mod error;
pub mod etl;
pub mod model;
pub mod scheduler;
pub mod storage;
