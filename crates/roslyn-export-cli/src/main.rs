//! roslyn-export CLI tool.
//!
//! Usage:
//! ```bash
//! roslyn-export export --snapshot snapshot.json --language cs --profile <key>
//! roslyn-export languages
//! roslyn-export init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Export SonarQube quality profiles as Roslyn rule sets and SonarLint configuration
#[derive(Parser)]
#[command(name = "roslyn-export")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a quality profile
    Export {
        /// JSON snapshot of server properties and quality profiles
        #[arg(short, long, env = "ROSLYN_EXPORT_SNAPSHOT")]
        snapshot: PathBuf,

        /// Language key (cs or vbnet)
        #[arg(short, long)]
        language: String,

        /// Quality profile key
        #[arg(short, long)]
        profile: String,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// List supported languages
    Languages,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for export results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON of the whole response.
    #[default]
    Json,
    /// Human-readable summary.
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export {
            snapshot,
            language,
            profile,
            format,
        } => {
            let cwd = std::env::current_dir()?;
            let source = config_resolver::resolve(&cwd, cli.config.as_deref());
            commands::export::run(&snapshot, &language, &profile, format, &source).await
        }
        Commands::Languages => {
            commands::languages::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
