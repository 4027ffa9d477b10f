// Prospector entry point.
//
// Startup sequence:
// 1. Parse CLI arguments
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file, stdout carries JSON)
// 4. Load scoring artifacts and reference datasets (only for evaluation)
// 5. Run the command and print its JSON result

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{error, info};

use prospector_app::{commands, logging, startup};
use prospector_core::config;
use prospector_core::Position;

/// Baseball prospect evaluation engine
#[derive(Parser)]
#[command(name = "prospector")]
#[command(version)]
#[command(about = "Resolve player stat files and evaluate prospects against pretrained models")]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical profiles resolved from a player file
    Resolve {
        file: PathBuf,
        /// Declared file type (csv, xlsx, ...); inferred from the extension otherwise
        #[arg(long)]
        file_type: Option<String>,
        /// Position to use when a file carries both batting and pitching columns
        #[arg(long)]
        position_hint: Option<String>,
    },
    /// Evaluate every player in a file
    EvaluateFile {
        file: PathBuf,
        #[arg(short, long)]
        position: String,
        #[arg(long)]
        file_type: Option<String>,
        /// Evaluate at most this many players
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Evaluate one metric map given as a JSON object
    Evaluate {
        #[arg(short, long)]
        position: String,
        #[arg(long)]
        stats: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse CLI arguments
    let cli = Cli::parse();

    // 2. Load config
    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let config = config::load_config().context("failed to load configuration")?;

    // 3. Initialize tracing
    logging::init_tracing(&config.logging, &base_dir, cli.verbose)?;
    info!("prospector starting up");

    // 4-5. Run the command
    let result = match cli.command {
        Commands::Resolve {
            file,
            file_type,
            position_hint,
        } => {
            let hint = match position_hint.as_deref().map(str::parse::<Position>) {
                Some(Ok(p)) => Some(p),
                Some(Err(e)) => anyhow::bail!(e),
                None => None,
            };
            commands::resolve_file(&config, &file, file_type.as_deref(), hint)
        }
        Commands::EvaluateFile {
            file,
            position,
            file_type,
            limit,
        } => {
            let engine = startup::load_engine(&config, &base_dir)
                .await
                .context("failed to load scoring artifacts")?;
            commands::evaluate_file(
                &engine,
                &config,
                &file,
                &position,
                file_type.as_deref(),
                limit,
            )
        }
        Commands::Evaluate { position, stats } => {
            let engine = startup::load_engine(&config, &base_dir)
                .await
                .context("failed to load scoring artifacts")?;
            commands::evaluate_stats(&engine, &position, &stats)
        }
    };

    match result {
        Ok(value) => print_json(&value)?,
        Err(body) => {
            error!("command failed: {} ({})", body.error, body.kind);
            print_json(&serde_json::to_value(&body)?)?;
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{text}");
    Ok(())
}
