//! The validate → repair → aggregate core and the orchestrator around it

pub mod aggregate;
pub mod pipeline;
pub mod repair;
pub mod validate;

pub use aggregate::aggregate;
pub use pipeline::{
    extract_transform_load, transform, Pipeline, PipelineOptions, RunSummary, Transformed,
};
pub use repair::repair;
pub use validate::{validate, ValidationReport};
