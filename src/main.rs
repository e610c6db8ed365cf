use babaji::models::{RunSettings, CONFIG_FILE, STATE_FILE};
use babaji::orchestrator::openrouter::OPENROUTER_API;
use babaji::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "babaji")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Refine features, generate project docs and implement them with an AI coding assistant", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Model configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Session state file
    #[arg(long, global = true, default_value = STATE_FILE)]
    state: PathBuf,

    /// Assistant executable to drive
    #[arg(long, global = true, default_value = "aider")]
    tool: String,

    /// OpenRouter API base URL
    #[arg(long, global = true, default_value = OPENROUTER_API)]
    api_base: String,

    /// Skip the model parameter lookup
    #[arg(long, global = true)]
    skip_lookup: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start or resume an interactive session (default)
    Run,

    /// Show the saved session
    Status {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// List configured models
    Models {
        /// Show which model a task label selects
        #[arg(short, long)]
        task: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    let runtime = match babaji::cli::run::build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", format!("Error: Failed to create tokio runtime: {}", e).red());
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    let settings = RunSettings {
        config_path: cli.config,
        state_path: cli.state,
        output_dir: std::env::current_dir()?,
        tool: cli.tool,
        api_base: cli.api_base,
        skip_lookup: cli.skip_lookup,
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            babaji::cli::run::run(&settings).await?;
        }

        Commands::Status { json } => {
            babaji::cli::status::run(&settings.state_path, json)?;
        }

        Commands::Models { task } => {
            babaji::cli::models::run(&settings.config_path, task.as_deref())?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "babaji", &mut io::stdout());
        }
    }

    Ok(())
}
