//! Command-line interface definitions.
//!
//! Defines the CLI structure for the hippodrome binary using `clap`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file name.
pub const DEFAULT_CONFIG: &str = "hippodrome.toml";

/// Timed horse-race betting engine
#[derive(Parser, Debug)]
#[command(name = "hippodrome")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the race house with a console on stdin
    Run(RunArgs),

    /// Validate a configuration file without starting anything
    Check(CheckArgs),
}

/// Arguments for `hippodrome run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Open the first betting window immediately.
    #[arg(long)]
    pub autostart: bool,

    /// Admin token used by the console for start and pause.
    ///
    /// Falls back to `HIPPODROME_ADMIN_TOKEN`, then to the first admin
    /// identity in the configuration.
    #[arg(long)]
    pub admin_token: Option<String>,

    /// Print every race event to stdout as a JSON line.
    #[arg(long)]
    pub events: bool,
}

/// Arguments for `hippodrome check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}
