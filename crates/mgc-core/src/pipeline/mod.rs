pub mod config;
mod orchestrator;
mod types;

pub use config::{CorrectionRequest, MgcConfig};
pub use orchestrator::{corrected_id, run, run_reported, run_with_store};
pub use types::{NoOpReporter, PipelineStage, ProgressReporter};
