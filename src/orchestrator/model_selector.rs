use crate::error::BabajiError;
use crate::models::{Configuration, ModelDescriptor};
use anyhow::Result;

/// Model selector for choosing a configured model by task label
pub struct ModelSelector<'a> {
    config: &'a Configuration,
}

impl<'a> ModelSelector<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// First model whose `use_case` contains `task` (case-insensitive)
    ///
    /// Models are scanned in declaration order; later matches are never considered.
    pub fn select(&self, task: &str) -> Option<&'a ModelDescriptor> {
        let needle = task.to_lowercase();
        self.config
            .models
            .iter()
            .find(|model| model.use_case.to_lowercase().contains(&needle))
    }

    /// Like [`select`](Self::select), falling back to the first configured model
    ///
    /// The fallback is logged as a warning. Fails only when no models are configured.
    pub fn select_or_default(&self, task: &str) -> Result<&'a ModelDescriptor> {
        if let Some(model) = self.select(task) {
            return Ok(model);
        }

        let fallback = self.config.models.first().ok_or(BabajiError::NoModels)?;
        tracing::warn!(
            task,
            fallback = %fallback.model_id(),
            "no model use case matches task, using first configured model"
        );
        Ok(fallback)
    }
}
