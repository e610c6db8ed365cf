use super::console::TerminalConsole;
use super::credentials::resolve_api_key;
use super::session::SessionDriver;
use crate::models::{Configuration, RunSettings, SessionStore};
use crate::orchestrator::{OpenRouterClient, ToolRunner};
use crate::Result;
use colored::Colorize;

/// Single-threaded runtime; every step runs in sequence on the calling thread
pub fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread().enable_all().build()
}

pub async fn run(settings: &RunSettings) -> Result<()> {
    let mut console = TerminalConsole;
    let api_key = resolve_api_key(&mut console)?;
    let mut config = Configuration::load(&settings.config_path)?;
    let store = SessionStore::new(&settings.state_path);

    println!("{}", "🤖 Babaji Session".cyan().bold());
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
    println!();

    let runner = ToolRunner::new(&settings.tool, api_key.clone());
    let catalog = OpenRouterClient::new(api_key).with_base_url(&settings.api_base);

    let mut driver = SessionDriver::new(&mut console, &runner).with_output_dir(&settings.output_dir);
    if !settings.skip_lookup {
        driver = driver.with_catalog(&catalog);
    }

    driver.run(&mut config, &store).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::runtime::RuntimeFlavor;

    #[test]
    fn test_runtime_is_single_threaded() {
        let runtime = build_runtime().unwrap();
        assert_eq!(runtime.handle().runtime_flavor(), RuntimeFlavor::CurrentThread);

        let thread = std::thread::current().id();
        let inner = runtime.block_on(async { std::thread::current().id() });
        assert_eq!(inner, thread);
    }
}
