//! Interactive session: resume, refine, generate artifacts, implement, save

use super::console::Console;
use crate::models::{Configuration, ModelDescriptor, SessionState, SessionStore};
use crate::orchestrator::{AssistantTool, ModelCatalog, ModelSelector, ToolOutput};
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Sentinel ending the refinement loop
pub const FINAL_SENTINEL: &str = "final";

/// Project documents generated from the refined features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Hld,
    Lld,
    Readme,
    ProjectGoals,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Hld,
        ArtifactKind::Lld,
        ArtifactKind::Readme,
        ArtifactKind::ProjectGoals,
    ];

    /// Task label, also used for model selection
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Hld => "hld",
            ArtifactKind::Lld => "lld",
            ArtifactKind::Readme => "readme",
            ArtifactKind::ProjectGoals => "project_goals",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.md", self.label())
    }
}

/// Drives one interactive session against the assistant
pub struct SessionDriver<'a> {
    console: &'a mut dyn Console,
    tool: &'a dyn AssistantTool,
    catalog: Option<&'a dyn ModelCatalog>,
    output_dir: PathBuf,
}

impl<'a> SessionDriver<'a> {
    pub fn new(console: &'a mut dyn Console, tool: &'a dyn AssistantTool) -> Self {
        Self {
            console,
            tool,
            catalog: None,
            output_dir: PathBuf::from("."),
        }
    }

    /// Look up model parameters from `catalog` before refining
    pub fn with_catalog(mut self, catalog: &'a dyn ModelCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Directory receiving the generated artifacts
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Run every step in order and persist the final state
    pub async fn run(&mut self, config: &mut Configuration, store: &SessionStore) -> Result<SessionState> {
        let mut state = self.start_session(store)?;

        if self.catalog.is_some() {
            self.enrich_models(config).await?;
        }

        self.refine_features(config, &mut state).await?;
        let features = state.features.clone();
        state.record(format!("Refined features: {}", features));

        self.create_artifacts(config, &state).await?;
        state.record("Created project artifacts");

        self.implement_features(config, &state).await?;
        state.record("Implemented features");

        store.save(&mut state)?;
        println!(
            "{}",
            format!(
                "✅ Project state saved in {}. You can resume this session later.",
                store.path().display()
            )
            .green()
            .bold()
        );

        Ok(state)
    }

    /// Resume the saved session if the user wants to, otherwise start fresh
    pub fn start_session(&mut self, store: &SessionStore) -> Result<SessionState> {
        if let Some(saved) = store.load()? {
            println!("{}", "ℹ️  Previous session found".blue());
            println!("   Codebase: {}", saved.codebase_path);
            if self.console.confirm("Do you want to continue it?", true)? {
                return Ok(saved);
            }
        }

        let codebase_path = self.console.input("Enter the path to your codebase")?;
        let features = self.console.input("Describe the features you want to implement")?;
        Ok(SessionState::new(codebase_path, features))
    }

    /// Attach remote metadata to every configured model and print a summary
    pub async fn enrich_models(&self, config: &mut Configuration) -> Result<()> {
        let Some(catalog) = self.catalog else {
            return Ok(());
        };

        for model in config.models.iter_mut() {
            let params = catalog.model_parameters(&model.model_id()).await?;
            println!("{} {}", "Model:".cyan().bold(), model.title);
            println!("{} {}", "Parameters:".cyan(), params);
            println!("{}", "---".bright_black());
            model.parameters = Some(params);
        }
        Ok(())
    }

    /// Refine the feature text until the user types `final`
    pub async fn refine_features(&mut self, config: &Configuration, state: &mut SessionState) -> Result<()> {
        loop {
            println!("{} {}", "Current features:".cyan().bold(), state.features);
            let input = self.console.input("Refine features or type 'final' to proceed")?;
            if input.trim().eq_ignore_ascii_case(FINAL_SENTINEL) {
                break;
            }

            let model = ModelSelector::new(config).select_or_default("brainstorming")?;
            let instruction = format!("Refine these features: {}\nUser input: {}", state.features, input);
            let output = self.invoke(model, "refine_features", &instruction).await?;
            state.features = output.stdout;
        }
        Ok(())
    }

    /// Write one `<kind>.md` per artifact kind, overwriting existing files
    pub async fn create_artifacts(&mut self, config: &Configuration, state: &SessionState) -> Result<Vec<PathBuf>> {
        let selector = ModelSelector::new(config);
        let mut written = Vec::new();

        for kind in ArtifactKind::ALL {
            let model = selector.select_or_default(kind.label())?;
            let task = format!("create_{}", kind.label());
            let instruction = format!("Create {} for features: {}", kind.label(), state.features);
            let output = self.invoke(model, &task, &instruction).await?;

            let path = self.output_dir.join(kind.file_name());
            write_artifact(&path, &output.stdout)?;
            println!("{}", format!("📝 Wrote {}", path.display()).green());
            written.push(path);
        }
        Ok(written)
    }

    /// Implement until the user accepts the result
    ///
    /// Feedback shapes the retry instructions only; the session's features are left as refined.
    pub async fn implement_features(&mut self, config: &Configuration, state: &SessionState) -> Result<()> {
        let model = ModelSelector::new(config).select_or_default("implementation")?;
        let mut features = state.features.clone();

        loop {
            let instruction = format!(
                "Implement these features in the codebase at {}: {}",
                state.codebase_path, features
            );
            let output = self.invoke(model, "implement_features", &instruction).await?;
            println!("{}", output.stdout);

            if self.console.confirm("Are the features implemented correctly?", false)? {
                break;
            }

            let feedback = self.console.input("Provide feedback for improvements")?;
            features.push_str(&format!("\nFeedback: {}", feedback));
        }
        Ok(())
    }

    async fn invoke(&self, model: &ModelDescriptor, task: &str, instruction: &str) -> Result<ToolOutput> {
        let output = self.tool.invoke(model, task, instruction).await?;
        if !output.success() {
            eprintln!(
                "{}",
                format!(
                    "⚠ {} exited with {:?}; using its output anyway",
                    task, output.exit_code
                )
                .yellow()
            );
        }
        Ok(output)
    }
}

fn write_artifact(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote artifact");
    Ok(())
}
