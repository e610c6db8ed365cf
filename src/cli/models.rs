use crate::error::BabajiError;
use crate::models::Configuration;
use crate::orchestrator::cli_mapper::model_spec;
use crate::orchestrator::ModelSelector;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// List configured models, optionally showing which one a task label selects
pub fn run(config_path: &Path, task: Option<&str>) -> Result<()> {
    let config = Configuration::load(config_path)?;

    println!("{}", format!("📦 Models in {}", config_path.display()).cyan().bold());
    for model in &config.models {
        println!("   {} ({})", model.title.bold(), model_spec(model));
        println!("      use case: {}", model.use_case.bright_black());
    }

    if let Some(task) = task {
        if config.models.is_empty() {
            return Err(BabajiError::NoModels.into());
        }
        println!();
        match ModelSelector::new(&config).select(task) {
            Some(model) => println!(
                "{}",
                format!("✅ '{}' selects {} ({})", task, model.title, model_spec(model)).green()
            ),
            None => println!(
                "{}",
                format!("⚠ No model use case matches '{}'; the first model will be used", task).yellow()
            ),
        }
    }
    Ok(())
}
