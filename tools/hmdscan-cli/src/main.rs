//! hmdscan CLI — find head-mounted displays attached to this machine.
//!
//! Usage:
//!   hmdscan scan [--snapshot PATH] [--json]   Run a discovery pass
//!   hmdscan identify <DEVICE_ID>              Classify a monitor device id
//!   hmdscan variants                          List known HMD variants
//!   hmdscan snapshot [-o PATH]                Record the display topology

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hmdscan_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "hmdscan",
    about = "Discover head-mounted displays among attached monitors",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the standard location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a discovery pass and print every HMD found
    Scan {
        /// Replay a recorded display snapshot instead of the live host
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,

        /// Override the monitor geometry bound
        #[arg(long)]
        max_monitors: Option<usize>,
    },

    /// Classify a monitor hardware id
    Identify {
        /// Device id, e.g. MONITOR\OVR0003\{...}
        device_id: String,
    },

    /// List known HMD variants and their optical parameters
    Variants,

    /// Record the live display topology as a snapshot
    Snapshot {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    hmdscan_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Scan {
            snapshot,
            json,
            max_monitors,
        } => {
            if let Some(max) = max_monitors {
                config.discovery.max_monitors = max;
            }
            commands::scan::run(snapshot, json, &config.discovery)
        }
        Commands::Identify { device_id } => commands::identify::run(&device_id),
        Commands::Variants => commands::variants::run(),
        Commands::Snapshot { output } => commands::snapshot::run(output),
    }
}
