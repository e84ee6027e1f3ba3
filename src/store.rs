use crate::error::{MatchlogError, Result};
use crate::record::Record;
use std::collections::BTreeSet;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, warn};

/// What a previous run left in the output table: its header (if any) and
/// the skip-set of filenames already scored. Existing rows are never
/// rewritten; they only gate which inputs get processed again.
#[derive(Debug, Clone, Default)]
pub struct ExistingResults {
    header: Option<Vec<String>>,
    filenames: BTreeSet<String>,
}

impl ExistingResults {
    pub fn is_processed(&self, filename: &str) -> bool {
        self.filenames.contains(filename)
    }

    pub fn row_count(&self) -> usize {
        self.filenames.len()
    }
}

/// Read the output table into the skip-set. A missing file means no prior
/// results; a present file must carry a `Filename` column.
pub fn load_existing(path: &Path) -> Result<ExistingResults> {
    if !path.exists() {
        return Ok(ExistingResults::default());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header.is_empty() {
        return Ok(ExistingResults::default());
    }

    let filename_index = header
        .iter()
        .position(|column| column == "Filename")
        .ok_or_else(|| MatchlogError::MissingFilenameColumn {
            path: path.display().to_string(),
        })?;

    let mut filenames = BTreeSet::new();
    for row in reader.records() {
        let row = row?;
        if let Some(name) = row.get(filename_index) {
            filenames.insert(name.to_string());
        }
    }

    debug!(rows = filenames.len(), "loaded existing results");
    Ok(ExistingResults {
        header: Some(header),
        filenames,
    })
}

/// Append the batch of result rows. An existing header fixes the column
/// layout: fields a row lacks are written empty and fields the header does
/// not know are dropped with a warning. On first write the header is the
/// sorted union of the batch's fields with `Score`, `Log`, `Filename` last.
pub fn append_results(path: &Path, rows: &[Record], existing: &ExistingResults) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let (columns, write_header) = match existing.header.clone() {
        Some(header) => (header, false),
        None => (batch_columns(rows), true),
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::Writer::from_writer(file);

    if write_header {
        writer.write_record(&columns)?;
    }

    for row in rows {
        for name in row.field_names() {
            if !columns.iter().any(|column| column == name) {
                warn!(field = %name, "dropping field not in the output header");
            }
        }
        let cells: Vec<String> = columns
            .iter()
            .map(|column| {
                row.get(column)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&cells)?;
    }

    writer.flush()?;
    Ok(())
}

/// Trailing columns of every result row, kept out of the sorted field union.
const RESULT_COLUMNS: [&str; 3] = ["Score", "Log", "Filename"];

fn batch_columns(rows: &[Record]) -> Vec<String> {
    let mut union: BTreeSet<&String> = BTreeSet::new();
    for row in rows {
        union.extend(row.field_names());
    }
    let mut columns: Vec<String> = union
        .into_iter()
        .filter(|name| !RESULT_COLUMNS.contains(&name.as_str()))
        .cloned()
        .collect();
    columns.extend(RESULT_COLUMNS.iter().map(|name| name.to_string()));
    columns
}
