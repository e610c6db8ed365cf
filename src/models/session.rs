//! Session state persistence (`project_state.json`)

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the session state, relative to the working directory
pub const STATE_FILE: &str = "project_state.json";

/// In-progress session data, persisted to support resume-on-restart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current feature description
    pub features: String,

    /// Ordered log of what happened in previous steps
    pub discussion: Vec<String>,

    /// Path of the codebase the features are implemented into
    pub codebase_path: String,

    /// Last save time; absent in files written by older versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Fresh session with an empty discussion log
    pub fn new(codebase_path: impl Into<String>, features: impl Into<String>) -> Self {
        Self {
            features: features.into(),
            discussion: Vec::new(),
            codebase_path: codebase_path.into(),
            updated_at: None,
        }
    }

    pub fn record(&mut self, entry: impl Into<String>) {
        self.discussion.push(entry.into());
    }
}

/// Reads and overwrites the session state file
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session; `None` when no file exists
    pub fn load(&self) -> Result<Option<SessionState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let state = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(state))
    }

    /// Overwrite the state file with `state`, stamping `updated_at`
    pub fn save(&self, state: &mut SessionState) -> Result<()> {
        state.updated_at = Some(Utc::now());

        let content = serde_json::to_string_pretty(state).context("Failed to serialize session state")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), entries = state.discussion.len(), "saved session state");
        Ok(())
    }
}
