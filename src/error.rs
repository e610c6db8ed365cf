use std::path::PathBuf;

/// Errors callers branch on; everything else travels as plain `anyhow` context
#[derive(Debug, thiserror::Error)]
pub enum BabajiError {
    #[error("Configuration file {} not found.", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("No models configured")]
    NoModels,

    #[error("Command '{0}' not found. Please ensure it is installed and in your PATH.")]
    ToolNotFound(String),

    #[error("Model lookup for {model} failed ({status}): {body}")]
    LookupFailed {
        model: String,
        status: u16,
        body: String,
    },
}
