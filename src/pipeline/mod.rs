// file: src/pipeline/mod.rs
// description: pipeline orchestration module exports
// reference: internal module structure

pub mod orchestrator;
pub mod progress;

pub use orchestrator::{LayerPipeline, LayerRequest, PipelineReport};
pub use progress::FetchSpinner;
