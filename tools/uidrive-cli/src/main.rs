//! uidrive CLI: dry-run gestures and inspect configuration.
//!
//! Usage:
//!   uidrive plan click X Y              Plan a tap
//!   uidrive plan swipe X1 Y1 X2 Y2      Plan a straight swipe
//!   uidrive plan path X,Y X,Y ...       Plan a multi-segment swipe
//!   uidrive plan pinch                  Plan a two-finger pinch
//!   uidrive plan text TEXT              Plan typed text
//!   uidrive plan key CODE               Plan a key tap
//!   uidrive config [--init]             Show or write the configuration
//!
//! Planned gestures run against an in-memory sink; the events that would
//! have been injected are printed as JSONL.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "uidrive",
    about = "Synthesize and correlate UI test input",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a gesture against an in-memory sink and print its events
    Plan {
        /// Write events to a JSONL file instead of stdout
        #[arg(short, long, global = true)]
        output: Option<PathBuf>,

        #[command(subcommand)]
        gesture: commands::plan::Gesture,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = uidrive_common::config::AppConfig::load();

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    uidrive_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Plan { output, gesture } => {
            commands::plan::run(gesture, output, config.interaction).await
        }
        Commands::Config { init } => commands::config::run(config, init),
    }
}
