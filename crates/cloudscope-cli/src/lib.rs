//! Library side of the `cloudscope-export` binary.

pub mod input;
pub mod logging;
pub mod orchestrator;
pub mod settings;

pub use orchestrator::{
    ExportKind, ExportOrchestrator, ExportOutcome, OrchestratorConfig, OrchestratorError,
};
pub use settings::ExportSettings;
