use super::value::Value;
use super::Record;
use crate::error::{MatchlogError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static HEADSHOT_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+(?:\.\d+)?)%\)").expect("static pattern compiles"));

/// Pure derivation pass over a freshly parsed record. Derived fields are
/// computed from the raw fields and inserted, overwriting any literal field
/// of the same name; the raw `Headshot` and `Score` fields stay untouched.
///
/// Malformed `Headshot` or `Score` values are fatal for the file. Missing
/// prerequisites for `Length` and `Damage Ratio` suppress those fields
/// without error.
pub fn augment(mut record: Record, source: &Path) -> Result<Record> {
    if let Some(value) = record.get("Headshot") {
        let percent = headshot_percent(&value.to_string()).ok_or_else(|| {
            MatchlogError::HeadshotFormat {
                path: source.display().to_string(),
                value: value.to_string(),
            }
        })?;
        record.insert("Headshot %", Value::Number(percent));
    }

    if let Some(value) = record.get("Score") {
        let differential =
            round_differential(&value.to_string()).ok_or_else(|| {
                MatchlogError::RoundScoreFormat {
                    path: source.display().to_string(),
                    value: value.to_string(),
                }
            })?;
        record.insert("Round Differential", Value::Number(differential as f64));
    }

    if let (Some(start), Some(end)) = (
        number_field(&record, "Start Time (UNIX)"),
        number_field(&record, "End Time (UNIX)"),
    ) {
        let length = end.trunc() as i64 - start.trunc() as i64;
        record.insert("Length", Value::Number(length as f64));
    }

    if let (Some(made), Some(received)) = (
        number_field(&record, "Damage Made"),
        number_field(&record, "Damage Received"),
    ) {
        if received != 0.0 {
            record.insert("Damage Ratio", Value::Number(made / received));
        }
    }

    Ok(record)
}

fn number_field(record: &Record, key: &str) -> Option<f64> {
    record.get(key).and_then(Value::as_number)
}

fn headshot_percent(raw: &str) -> Option<f64> {
    let captures = HEADSHOT_PERCENT.captures(raw)?;
    captures[1].parse::<f64>().ok()
}

fn round_differential(raw: &str) -> Option<i64> {
    let (home, away) = raw.split_once('-')?;
    let home = home.trim().parse::<i64>().ok()?;
    let away = away.trim().parse::<i64>().ok()?;
    Some(home - away)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_lines;

    fn augmented(content: &str) -> Record {
        augment(parse_lines(content), Path::new("test.md")).expect("derivation should succeed")
    }

    #[test]
    fn headshot_percentage_is_extracted() {
        let record = augmented("Headshot: 12 (37.5%)\n");
        assert_eq!(record.get("Headshot %"), Some(&Value::Number(37.5)));
        assert_eq!(
            record.get("Headshot"),
            Some(&Value::Text("12 (37.5%)".to_string()))
        );
    }

    #[test]
    fn malformed_headshot_is_fatal() {
        let record = parse_lines("Headshot: twelve\n");
        let err = augment(record, Path::new("bad.md")).expect_err("derivation should fail");
        assert!(matches!(err, MatchlogError::HeadshotFormat { .. }));
    }

    #[test]
    fn round_differential_from_score() {
        let record = augmented("Score: 13-7\n");
        assert_eq!(record.get("Round Differential"), Some(&Value::Number(6.0)));
        assert_eq!(record.get("Score"), Some(&Value::Text("13-7".to_string())));
    }

    #[test]
    fn malformed_score_is_fatal() {
        let record = parse_lines("Score: thirteen\n");
        let err = augment(record, Path::new("bad.md")).expect_err("derivation should fail");
        assert!(matches!(err, MatchlogError::RoundScoreFormat { .. }));
    }

    #[test]
    fn length_is_end_minus_start() {
        let record = augmented("Start Time (UNIX): 1000\nEnd Time (UNIX): 1500\n");
        assert_eq!(record.get("Length"), Some(&Value::Number(500.0)));
    }

    #[test]
    fn length_is_suppressed_when_a_bound_is_missing() {
        let record = augmented("Start Time (UNIX): 1000\n");
        assert!(record.get("Length").is_none());
    }

    #[test]
    fn damage_ratio_skips_zero_received() {
        let record = augmented("Damage Made: 200\nDamage Received: 0\n");
        assert!(record.get("Damage Ratio").is_none());

        let record = augmented("Damage Made: 200\nDamage Received: 80\n");
        assert_eq!(record.get("Damage Ratio"), Some(&Value::Number(2.5)));
    }
}
