//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Replay Refiner - Reduce recorded sessions to minimal replay scripts
#[derive(Parser, Debug)]
#[command(name = "replay-refine")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refine a recorded session into a replay script
    Refine {
        /// Input session file (recording or bare event list)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the script
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Script name (defaults to the recording name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show the terminal state deduced from a session
    Goal {
        /// Input session file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Describe a saved replay script
    Summarize {
        /// Replay script file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List recorded sessions
    List {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
