use crate::config::RunPaths;
use crate::error::{MatchlogError, Result};
use crate::record;
use crate::record::value::Value;
use crate::record::Record;
use crate::report;
use crate::score::{self, ScoreOutcome};
use crate::store;
use crate::weights;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

pub const RECORD_EXTENSION: &str = ".md";

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
}

/// One full batch: enumerate record files, skip the ones already in the
/// output table, score the rest, print each report, then append everything
/// in one write. Any parse or scoring failure aborts the run before the
/// append, so the output table never receives a partial batch.
pub fn run(paths: &RunPaths) -> Result<RunSummary> {
    if !paths.content_dir.is_dir() {
        return Err(MatchlogError::PathNotFound(
            paths.content_dir.display().to_string(),
        ));
    }

    let table = weights::load_weights(&paths.weights_file)?;
    let existing = store::load_existing(&paths.output_file)?;

    let mut results = Vec::new();
    let mut skipped = 0;
    for filename in record_files(&paths.content_dir) {
        if existing.is_processed(&filename) {
            debug!(file = %filename, "already scored, skipping");
            skipped += 1;
            continue;
        }

        let path = paths.content_dir.join(&filename);
        let record = record::parse_file(&path)?;
        let outcome = score::score(&record, &table)?;
        println!("{}", report::match_report(&filename, &outcome));

        results.push(result_row(record, &outcome, filename));
    }

    store::append_results(&paths.output_file, &results, &existing)?;
    info!(
        processed = results.len(),
        skipped, "run complete"
    );
    Ok(RunSummary {
        processed: results.len(),
        skipped,
    })
}

/// Score one file without touching the output table.
pub fn score_single(file: &Path, weights_file: &Path) -> Result<ScoreOutcome> {
    let table = weights::load_weights(weights_file)?;
    let record = record::parse_file(file)?;
    score::score(&record, &table)
}

/// Flatten a scored record into an output row. The computed score replaces
/// any raw `Score` field the record carried.
fn result_row(mut record: Record, outcome: &ScoreOutcome, filename: String) -> Record {
    record.insert("Score", Value::Number(outcome.total));
    record.insert("Log", Value::Text(outcome.breakdown.join("; ")));
    record.insert("Filename", Value::Text(filename));
    record
}

/// Record files directly under the content directory, filename-sorted for a
/// deterministic processing order.
fn record_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.ends_with(RECORD_EXTENSION))
        .collect();
    names.sort();
    names
}
