use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "matchlog",
    version,
    about = "Match record scoring and accumulation CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score all unprocessed match files and append to the results table
    Run(RunCommand),
    /// Score a single match file without persisting anything
    Score(ScoreCommand),
    /// Print the loaded weight table with tiers sorted as the scorer sees them
    Weights(WeightsCommand),
}

#[derive(Args)]
pub struct RunCommand {
    /// Root directory the default paths are resolved against
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Directory of match record files (overrides config)
    #[arg(long)]
    pub content_dir: Option<PathBuf>,

    /// Weight table CSV (overrides config)
    #[arg(long)]
    pub weights_file: Option<PathBuf>,

    /// Results table CSV to append to (overrides config)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// One match record file
    pub file: PathBuf,

    /// Weight table CSV (defaults to the configured weight table)
    #[arg(long)]
    pub weights_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct WeightsCommand {
    /// Root directory the default weight table path is resolved against
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Weight table CSV (overrides config)
    #[arg(long)]
    pub weights_file: Option<PathBuf>,
}
