// Babaji - interactive feature refinement and implementation orchestrator
// Drives an external AI coding assistant through refine, document and implement steps

pub mod cli;
pub mod error;
pub mod models;
pub mod orchestrator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use error::BabajiError;
pub use models::{ApiKey, Configuration, ModelDescriptor, RunSettings, SessionState, SessionStore};
