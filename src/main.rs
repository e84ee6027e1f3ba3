mod cli;
mod config;
mod error;
mod pipeline;
mod record;
mod report;
mod score;
mod store;
mod weights;

use crate::error::MatchlogError;
use clap::Parser;
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_FAILURE: i32 = 2;
}

fn run() -> Result<i32, MatchlogError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Run(cmd) => {
            if !cmd.root.exists() {
                return Err(MatchlogError::PathNotFound(cmd.root.display().to_string()));
            }
            let loaded = config::load_config(&cmd.root)?;
            let paths = config::resolve_run_paths(&cmd, loaded.as_ref());
            let summary = pipeline::run(&paths)?;
            println!(
                "processed {} file(s), skipped {} already scored",
                summary.processed, summary.skipped
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Score(cmd) => {
            if !cmd.file.exists() {
                return Err(MatchlogError::PathNotFound(cmd.file.display().to_string()));
            }
            let loaded = config::load_config(Path::new("."))?;
            let weights_path = config::resolve_weights_path(
                Path::new("."),
                cmd.weights_file.as_deref(),
                loaded.as_ref(),
            );
            let outcome = pipeline::score_single(&cmd.file, &weights_path)?;
            let name = cmd
                .file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| cmd.file.display().to_string());
            println!("{}", report::match_report(&name, &outcome));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Weights(cmd) => {
            let loaded = config::load_config(&cmd.root)?;
            let weights_path = config::resolve_weights_path(
                &cmd.root,
                cmd.weights_file.as_deref(),
                loaded.as_ref(),
            );
            let table = weights::load_weights(&weights_path)?;
            print!("{}", report::weights_report(&table));
            Ok(exit_code::SUCCESS)
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
