pub mod extraction;
pub mod attribution;
pub mod clustering;
pub mod processor;

pub use extraction::ExtractionConfig;
pub use attribution::{AttributionConfig, PipelineMode};
pub use clustering::ClusteringConfig;
pub use processor::ProcessorConfig;
