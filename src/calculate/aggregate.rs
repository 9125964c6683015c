//! Dashboard aggregates.

use super::{fixed, ratio};
use crate::models::{AggregateSummary, FilteredPlayerSet, SummaryDisplay};

/// Potential score a player must exceed to count as a high-potential target.
pub const HIGH_POTENTIAL_THRESHOLD: f64 = 90.0;

/// Count, mean xG, mean SCA and high-potential count over a set.
/// Means of an empty set are 0.
pub fn summarize(set: &FilteredPlayerSet<'_>) -> AggregateSummary {
    let count = set.len();
    let total_xg: f64 = set.iter().map(|p| p.xg).sum();
    let total_sca: f64 = set.iter().map(|p| p.sca).sum();

    AggregateSummary {
        player_count: count,
        mean_xg: ratio(total_xg, count as f64),
        mean_sca: ratio(total_sca, count as f64),
        high_potential_count: set
            .iter()
            .filter(|p| p.potential_score > HIGH_POTENTIAL_THRESHOLD)
            .count(),
    }
}

impl AggregateSummary {
    /// xG to 2 decimals, SCA to 1.
    pub fn display(&self) -> SummaryDisplay {
        SummaryDisplay {
            count: self.player_count,
            mean_xg: fixed(self.mean_xg, 2),
            mean_sca: fixed(self.mean_sca, 1),
            high_potential: self.high_potential_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::player;
    use crate::models::{PlayerRecord, Position};
    use pretty_assertions::assert_eq;

    fn record(id: &str, xg: f64, sca: f64, potential: f64) -> PlayerRecord {
        let mut p = player(id, Position::Midfielder);
        p.xg = xg;
        p.sca = sca;
        p.potential_score = potential;
        p
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let summary = summarize(&FilteredPlayerSet::default());

        assert_eq!(summary, AggregateSummary::default());
        assert!(!summary.mean_xg.is_nan());
        assert!(!summary.mean_sca.is_nan());
    }

    #[test]
    fn test_empty_set_display() {
        let display = summarize(&FilteredPlayerSet::default()).display();

        assert_eq!(
            display,
            SummaryDisplay {
                count: 0,
                mean_xg: "0.00".to_string(),
                mean_sca: "0.0".to_string(),
                high_potential: 0,
            }
        );
    }

    #[test]
    fn test_means_and_threshold() {
        let records = vec![
            record("a", 10.0, 100.0, 95.0),
            record("b", 5.5, 80.0, 90.0),
            record("c", 2.0, 45.0, 91.0),
        ];
        let set = FilteredPlayerSet::new(records.iter().collect());
        let summary = summarize(&set);

        assert_eq!(summary.player_count, 3);
        assert!((summary.mean_xg - 5.8333).abs() < 1e-3);
        assert!((summary.mean_sca - 75.0).abs() < 1e-9);
        // 90 itself is not above the threshold
        assert_eq!(summary.high_potential_count, 2);

        let display = summary.display();
        assert_eq!(display.mean_xg, "5.83");
        assert_eq!(display.mean_sca, "75.0");
    }
}
