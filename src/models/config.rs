use crate::error::BabajiError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the model configuration, relative to the working directory
pub const CONFIG_FILE: &str = "aider_config.json";

/// A configured external model: routing and display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Provider identifier (e.g. "openai", "anthropic")
    pub provider: String,

    /// Model identifier within the provider
    pub model: String,

    /// Human-readable title
    pub title: String,

    /// Free-text tag matched against task labels
    pub use_case: String,

    /// Metadata attached at runtime from the remote lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl ModelDescriptor {
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        title: impl Into<String>,
        use_case: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            title: title.into(),
            use_case: use_case.into(),
            parameters: None,
        }
    }

    /// `provider/model`, the key used for remote lookups
    pub fn model_id(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }
}

/// Model definitions loaded from `aider_config.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub models: Vec<ModelDescriptor>,
}

impl Configuration {
    /// Load the configuration from `path`
    ///
    /// A missing file is reported as [`BabajiError::ConfigNotFound`]; the tool
    /// cannot do anything useful without model definitions.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BabajiError::ConfigNotFound(path.to_path_buf()).into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Configuration = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!(path = %path.display(), models = config.models.len(), "loaded configuration");
        Ok(config)
    }
}

/// Runtime settings handed to every collaborator of a run
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub config_path: PathBuf,
    pub state_path: PathBuf,
    /// Directory receiving the generated `<kind>.md` artifacts
    pub output_dir: PathBuf,
    /// External assistant executable
    pub tool: String,
    pub api_base: String,
    pub skip_lookup: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parameters_optional_on_load() {
        let json = r#"{"models":[{"provider":"openai","model":"gpt-4","title":"GPT-4","use_case":"implementation"}]}"#;
        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.models.len(), 1);
        assert!(config.models[0].parameters.is_none());
        assert_eq!(config.models[0].model_id(), "openai/gpt-4");
    }

    #[test]
    fn test_missing_config_is_typed_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);

        let err = Configuration::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BabajiError>(),
            Some(BabajiError::ConfigNotFound(p)) if p == &path
        ));
    }

    #[test]
    fn test_invalid_json_fails_to_parse() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = Configuration::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
