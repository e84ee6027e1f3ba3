use crate::error::{MatchlogError, Result};
use crate::record::Record;
use crate::weights::{Tier, WeightTable};

/// Total score plus one explanatory line per contributing metric.
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub total: f64,
    pub breakdown: Vec<String>,
}

/// Score a record against the weight table.
///
/// Per metric: sort the tiers ascending by target (stable, so equal targets
/// keep file order) and scan forward. The first tier the value reaches either
/// interpolates linearly toward the next tier, or pays its flat bonus when it
/// is the top tier. Values below the lowest target contribute nothing and
/// produce no breakdown line. A metric absent from the record scores as 0;
/// a record field absent from the table is ignored.
pub fn score(record: &Record, table: &WeightTable) -> Result<ScoreOutcome> {
    let mut total = 0.0;
    let mut breakdown = Vec::new();

    for (metric, tiers) in table.iter() {
        let value = metric_value(record, metric)?;

        let mut sorted = tiers.clone();
        sorted.sort_by(|a, b| a.target.total_cmp(&b.target));

        for (i, tier) in sorted.iter().enumerate() {
            if value < tier.target {
                if i == 0 {
                    break;
                }
                continue;
            }
            match sorted.get(i + 1) {
                Some(next) if value < next.target => {
                    let bonus = interpolate(value, tier, next);
                    total += bonus;
                    breakdown.push(format!("{metric}: {value}, Bonus: {bonus:.2}"));
                    break;
                }
                // Value reaches the next tier too; keep scanning.
                Some(_) => {}
                None => {
                    total += tier.bonus;
                    breakdown.push(format!(
                        "{metric}: {value} (Tier: {metric}:{target}:{bonus}, Bonus: {bonus})",
                        target = tier.target,
                        bonus = tier.bonus,
                    ));
                    break;
                }
            }
        }
    }

    Ok(ScoreOutcome {
        total: round2(total),
        breakdown,
    })
}

/// Linear interpolation between two adjacent tiers. A zero-width span
/// (equal targets) returns the lower bonus rather than dividing by zero.
fn interpolate(value: f64, lower: &Tier, upper: &Tier) -> f64 {
    if lower.target == upper.target {
        return lower.bonus;
    }
    lower.bonus
        + (upper.bonus - lower.bonus) * (value - lower.target) / (upper.target - lower.target)
}

fn metric_value(record: &Record, metric: &str) -> Result<f64> {
    match record.get(metric) {
        None => Ok(0.0),
        Some(value) => value
            .as_number()
            .ok_or_else(|| MatchlogError::MetricNotNumeric {
                metric: metric.to_string(),
                value: value.to_string(),
            }),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
