//! Dashboard page assembly.

use super::{filter_players, league_options, rank_by_potential, season_options, summarize};
use crate::models::{DashboardView, PlayerRecord};

/// Tiles, filter options and prospects for one league/season selection.
pub fn dashboard<'a>(records: &'a [PlayerRecord], league: &str, season: &str) -> DashboardView<'a> {
    let set = filter_players(records, league, season);

    DashboardView {
        league: league.to_string(),
        season: season.to_string(),
        summary: summarize(&set).display(),
        leagues: league_options(records),
        seasons: season_options(records),
        prospects: rank_by_potential(&set),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::player;
    use crate::models::Position;

    #[test]
    fn test_dashboard_for_selection() {
        let mut a = player("a", Position::Forward);
        a.xg = 20.0;
        a.sca = 120.0;
        a.potential_score = 92.0;
        let mut b = player("b", Position::Midfielder);
        b.xg = 4.0;
        b.sca = 150.0;
        b.potential_score = 96.0;
        b.league = "La Liga".to_string();
        let mut c = player("c", Position::Defender);
        c.season = "22/23".to_string();

        let records = vec![a, b, c];
        let view = dashboard(&records, "All", "23/24");

        assert_eq!(view.summary.count, 2);
        assert_eq!(view.summary.mean_xg, "12.00");
        assert_eq!(view.summary.mean_sca, "135.0");
        assert_eq!(view.summary.high_potential, 2);
        assert_eq!(view.leagues, vec!["All", "Premier League", "La Liga"]);
        assert_eq!(view.seasons, vec!["23/24", "22/23"]);
        assert_eq!(view.prospects[0].id.as_str(), "b");
    }

    #[test]
    fn test_dashboard_with_no_matches() {
        let records = vec![player("a", Position::Forward)];
        let view = dashboard(&records, "Serie A", "23/24");

        assert_eq!(view.summary.count, 0);
        assert_eq!(view.summary.mean_xg, "0.00");
        assert!(view.prospects.is_empty());
    }
}
