use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Drive an AI assistant CLI from your editor through managed terminal sessions")]
#[command(version)]
struct Cli {
    /// Path to the project (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new .tether/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the session key a file path resolves to
    Resolve {
        /// File path to resolve
        file: PathBuf,
    },

    /// Check the assistant binary and show the configured launch commands
    Doctor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Some(Commands::Init { force }) => {
            cli::init::init_command(&work_dir, force)?;
        }
        Some(Commands::Resolve { file }) => {
            cli::resolve::resolve_command(&work_dir, &file)?;
        }
        Some(Commands::Doctor) | None => {
            cli::doctor::doctor_command(&work_dir)?;
        }
    }

    Ok(())
}
