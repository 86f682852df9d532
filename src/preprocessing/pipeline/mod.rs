//! Sequential composition of named transformer steps.

#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod step;

pub use pipeline::{FittedPipeline, Pipeline};
pub use step::{FittedStep, PipelineStep};
