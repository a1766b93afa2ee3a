pub mod pipeline_controller;

pub use pipeline_controller::PipelineController;
