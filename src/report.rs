use crate::score::ScoreOutcome;
use crate::weights::WeightTable;

/// The per-file console block: header, breakdown lines, total, separator.
/// This is the diagnostic surface of a run; only the CSV row is persisted.
pub fn match_report(filename: &str, outcome: &ScoreOutcome) -> String {
    let mut output = String::new();
    output.push_str(&format!("Match Analysis for file: {filename}\n\n"));
    for line in &outcome.breakdown {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str(&format!("\nTotal Score: {}\n", outcome.total));
    output.push_str(&"-".repeat(20));
    output
}

/// Weight table listing with tiers in the order the scorer scans them.
pub fn weights_report(table: &WeightTable) -> String {
    let mut output = String::new();
    for (metric, tiers) in table.iter() {
        output.push_str(&format!("{metric}\n"));
        let mut sorted = tiers.clone();
        sorted.sort_by(|a, b| a.target.total_cmp(&b.target));
        for tier in &sorted {
            output.push_str(&format!("  target {} -> bonus {}\n", tier.target, tier.bonus));
        }
    }
    if output.is_empty() {
        output.push_str("no metrics configured\n");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_report_contains_breakdown_and_total() {
        let outcome = ScoreOutcome {
            total: 7.5,
            breakdown: vec!["Kills: 15, Bonus: 7.50".to_string()],
        };
        let rendered = match_report("game1.md", &outcome);
        assert!(rendered.contains("Match Analysis for file: game1.md"));
        assert!(rendered.contains("Kills: 15, Bonus: 7.50"));
        assert!(rendered.contains("Total Score: 7.5"));
        assert!(rendered.ends_with("--------------------"));
    }

    #[test]
    fn weights_report_sorts_tiers_by_target() {
        let table = WeightTable::from_tiers(&[("Kills", 20.0, 10.0), ("Kills", 10.0, 5.0)]);
        let rendered = weights_report(&table);
        let first = rendered.find("target 10").expect("lower tier should render");
        let second = rendered.find("target 20").expect("upper tier should render");
        assert!(first < second);
    }
}
