use crate::error::{MatchlogError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// One breakpoint of a metric's piecewise bonus function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub target: f64,
    pub bonus: f64,
}

/// Tiered bonus definitions per metric, loaded once at startup. Tiers keep
/// their file order within a metric; the scorer sorts them by target with a
/// stable sort, so of two tiers with equal targets the first-defined wins
/// the lower slot.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    metrics: BTreeMap<String, Vec<Tier>>,
}

impl WeightTable {
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Tier>)> {
        self.metrics.iter()
    }

    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    #[cfg(test)]
    pub fn from_tiers(tiers: &[(&str, f64, f64)]) -> WeightTable {
        let mut table = WeightTable::default();
        for (metric, target, bonus) in tiers {
            table
                .metrics
                .entry((*metric).to_string())
                .or_default()
                .push(Tier {
                    target: *target,
                    bonus: *bonus,
                });
        }
        table
    }
}

#[derive(Debug, Deserialize)]
struct WeightRow {
    metric: String,
    target: f64,
    bonus: f64,
}

/// Load the weight table CSV: header `metric,target,bonus`, one row per
/// tier. A row with the wrong column count or a non-numeric target/bonus is
/// a fatal configuration error.
pub fn load_weights(path: &Path) -> Result<WeightTable> {
    let file = std::fs::File::open(path).map_err(|_| {
        MatchlogError::PathNotFound(path.display().to_string())
    })?;
    read_weights(file).map_err(|source| MatchlogError::WeightTable {
        path: path.display().to_string(),
        source,
    })
}

fn read_weights<R: Read>(reader: R) -> std::result::Result<WeightTable, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = WeightTable::default();
    for row in csv_reader.deserialize::<WeightRow>() {
        let row = row?;
        table.metrics.entry(row.metric).or_default().push(Tier {
            target: row.target,
            bonus: row.bonus,
        });
    }
    Ok(table)
}
