//! Typed schema of the post batch and of the hourly summary

pub mod dataset;
pub mod record;
pub mod summary;

pub use dataset::Dataset;
pub use record::{
    parse_date_time, Language, RawRecord, Record, DATE_TIME_FORMAT, PLACEHOLDER_TEXT,
};
pub use summary::{HourlySummary, SUMMARY_HEADER};
