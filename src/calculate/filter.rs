//! League/season selection.

use crate::models::{FilteredPlayerSet, PlayerRecord};

/// League selector matching every league.
pub const ALL_LEAGUES: &str = "All";

/// Records whose season matches exactly and whose league matches exactly,
/// unless `league` is [`ALL_LEAGUES`]. Input order is preserved.
pub fn filter_players<'a>(
    records: &'a [PlayerRecord],
    league: &str,
    season: &str,
) -> FilteredPlayerSet<'a> {
    let players = records
        .iter()
        .filter(|p| p.season == season)
        .filter(|p| league == ALL_LEAGUES || p.league == league)
        .collect();
    FilteredPlayerSet::new(players)
}

/// `"All"` followed by each league in first-seen order.
pub fn league_options(records: &[PlayerRecord]) -> Vec<String> {
    let mut options = vec![ALL_LEAGUES.to_string()];
    for p in records {
        if !options[1..].contains(&p.league) {
            options.push(p.league.clone());
        }
    }
    options
}

/// Each season in first-seen order.
pub fn season_options(records: &[PlayerRecord]) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for p in records {
        if !options.contains(&p.season) {
            options.push(p.season.clone());
        }
    }
    options
}

/// Highest potential first; equal scores keep their filtered order.
pub fn rank_by_potential<'a>(set: &FilteredPlayerSet<'a>) -> Vec<&'a PlayerRecord> {
    let mut ranked: Vec<&PlayerRecord> = set.iter().collect();
    ranked.sort_by(|a, b| b.potential_score.total_cmp(&a.potential_score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::player;
    use crate::models::Position;

    fn record(id: &str, league: &str, season: &str) -> PlayerRecord {
        let mut p = player(id, Position::Forward);
        p.league = league.to_string();
        p.season = season.to_string();
        p
    }

    fn sample() -> Vec<PlayerRecord> {
        vec![
            record("p1", "Premier League", "23/24"),
            record("p2", "La Liga", "23/24"),
            record("p3", "Premier League", "22/23"),
            record("p4", "Bundesliga", "23/24"),
            record("p5", "La Liga", "22/23"),
        ]
    }

    fn ids(set: &FilteredPlayerSet<'_>) -> Vec<String> {
        set.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_all_leagues_matches_season_only() {
        let records = sample();
        let set = filter_players(&records, "All", "23/24");

        let season_matches = records.iter().filter(|p| p.season == "23/24").count();
        assert_eq!(set.len(), season_matches);
        assert_eq!(ids(&set), vec!["p1", "p2", "p4"]);
    }

    #[test]
    fn test_league_and_season_must_both_match() {
        let records = sample();
        let set = filter_players(&records, "La Liga", "22/23");
        assert_eq!(ids(&set), vec!["p5"]);
    }

    #[test]
    fn test_no_partial_matching() {
        let records = sample();
        assert!(filter_players(&records, "Premier", "23/24").is_empty());
        assert!(filter_players(&records, "premier league", "23/24").is_empty());
        assert!(filter_players(&records, "All", "23").is_empty());
    }

    #[test]
    fn test_empty_input() {
        let set = filter_players(&[], "All", "23/24");
        assert!(set.is_empty());
    }

    #[test]
    fn test_filter_is_exact_subset_for_every_selector() {
        let records = sample();
        for league in league_options(&records) {
            for season in season_options(&records) {
                let set = filter_players(&records, &league, &season);
                let expected: Vec<String> = records
                    .iter()
                    .filter(|p| p.season == season && (league == "All" || p.league == league))
                    .map(|p| p.id.to_string())
                    .collect();
                assert_eq!(ids(&set), expected);
            }
        }
    }

    #[test]
    fn test_options_first_seen_order() {
        let records = sample();
        assert_eq!(
            league_options(&records),
            vec!["All", "Premier League", "La Liga", "Bundesliga"]
        );
        assert_eq!(season_options(&records), vec!["23/24", "22/23"]);
    }

    #[test]
    fn test_rank_by_potential_is_stable_and_non_destructive() {
        let mut records = sample();
        records[0].potential_score = 80.0;
        records[1].potential_score = 95.0;
        records[3].potential_score = 80.0;

        let set = filter_players(&records, "All", "23/24");
        let ranked: Vec<_> = rank_by_potential(&set).iter().map(|p| p.id.to_string()).collect();

        assert_eq!(ranked, vec!["p2", "p1", "p4"]);
        assert_eq!(ids(&set), vec!["p1", "p2", "p4"]);
    }
}
