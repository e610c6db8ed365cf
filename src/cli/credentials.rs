use super::console::Console;
use crate::models::ApiKey;
use crate::Result;
use colored::Colorize;

/// Environment variable holding the OpenRouter API key
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// Resolve the API key from the environment, prompting when it is absent
///
/// A prompted key is exported to this process's environment so child
/// processes inherit it. No format validation is performed.
pub fn resolve_api_key(console: &mut dyn Console) -> Result<ApiKey> {
    let existing = std::env::var(API_KEY_VAR).ok();
    let prompted = existing.as_deref().map_or(true, str::is_empty);

    let key = resolve_from(existing, console)?;
    if prompted {
        std::env::set_var(API_KEY_VAR, key.expose());
    }
    Ok(key)
}

/// Pick `existing` when it is non-empty, otherwise ask on the console
pub fn resolve_from(existing: Option<String>, console: &mut dyn Console) -> Result<ApiKey> {
    if let Some(key) = existing.filter(|k| !k.is_empty()) {
        return Ok(ApiKey::new(key));
    }

    println!("{}", "OpenRouter API key not found in environment variables.".yellow());
    println!("You can get your API key from https://openrouter.ai/keys");
    let key = console.secret("Please enter your OpenRouter API key")?;

    if key.is_empty() {
        tracing::warn!("empty API key entered; remote calls will likely fail to authenticate");
    }
    Ok(ApiKey::new(key))
}
