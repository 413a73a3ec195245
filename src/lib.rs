pub mod bead_pipeline;
pub mod logger;
