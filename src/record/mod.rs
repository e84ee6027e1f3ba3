pub mod derive;
pub mod value;

use crate::error::Result;
use std::collections::BTreeMap;
use std::path::Path;
use value::Value;

/// One match's parsed fields. Built from a record file, augmented by the
/// derivation pass, and flattened into one output row. Field order is the
/// map's lexicographic order, which keeps every downstream surface
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse one record file: phase one collects raw typed fields, phase two is
/// the pure derivation pass in [`derive`].
pub fn parse_file(path: &Path) -> Result<Record> {
    let content = std::fs::read_to_string(path)?;
    let raw = parse_lines(&content);
    derive::augment(raw, path)
}

/// Lines matching `<key>: <value>` become fields; everything else (blank
/// lines, prose, malformed lines) is skipped. The first occurrence of a key
/// wins.
pub fn parse_lines(content: &str) -> Record {
    let mut record = Record::default();
    for line in content.lines() {
        let Some((key, value)) = parse_line(line) else {
            continue;
        };
        if !record.contains_key(key) {
            record.insert(key, Value::parse(value));
        }
    }
    record
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(": ")?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || key.contains(':') || value.is_empty() {
        return None;
    }
    Some((key, value))
}
