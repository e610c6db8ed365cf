use crate::models::SessionStore;
use crate::Result;
use colored::Colorize;
use std::path::Path;

pub fn run(state_path: &Path, json: bool) -> Result<()> {
    let store = SessionStore::new(state_path);
    let Some(state) = store.load()? else {
        println!("{}", format!("No saved session in {}", state_path.display()).yellow());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!("{}", "📋 Saved Session".cyan().bold());
    println!("   {} {}", "Codebase:".bold(), state.codebase_path);
    if let Some(updated_at) = state.updated_at {
        println!("   {} {}", "Updated:".bold(), updated_at.to_rfc3339());
    }
    println!();
    println!("{}", "Features:".bold());
    println!("{}", state.features);
    println!();
    println!("{}", "Discussion:".bold());
    if state.discussion.is_empty() {
        println!("   {}", "(empty)".bright_black());
    }
    for (i, entry) in state.discussion.iter().enumerate() {
        println!("   {}. {}", i + 1, entry);
    }
    Ok(())
}
