//! In-memory record store.

use std::collections::HashSet;

use tracing::{info, warn};

use super::{EntityType, JsonlReader, StorageConfig, StorageError};
use crate::models::{MatchId, MatchPrediction, MatchRecord, PlayerId, PlayerRecord};

/// All fixture records, read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    players: Vec<PlayerRecord>,
    matches: Vec<MatchRecord>,
    predictions: Vec<MatchPrediction>,
}

impl RecordStore {
    /// Build a store from already-parsed records.
    ///
    /// Player rows without an id get a derived one. Duplicate ids are rejected
    /// since every lookup is keyed on them.
    pub fn new(
        players: Vec<PlayerRecord>,
        matches: Vec<MatchRecord>,
        predictions: Vec<MatchPrediction>,
    ) -> Result<Self, StorageError> {
        let players: Vec<PlayerRecord> = players
            .into_iter()
            .map(PlayerRecord::with_derived_id)
            .collect();

        ensure_unique(EntityType::Player, players.iter().map(|p| p.id.as_str()))?;
        ensure_unique(EntityType::Match, matches.iter().map(|m| m.id.as_str()))?;
        ensure_unique(
            EntityType::Prediction,
            predictions.iter().map(|p| p.id.as_str()),
        )?;

        for p in &predictions {
            if !p.is_consistent() {
                warn!(
                    "Prediction {} probabilities sum to {:.4}",
                    p.id,
                    p.probability_sum()
                );
            }
        }

        Ok(Self {
            players,
            matches,
            predictions,
        })
    }

    /// Seed from the JSONL fixtures in the data directory.
    pub fn load(config: &StorageConfig) -> Result<Self, StorageError> {
        let players = JsonlReader::<PlayerRecord>::for_entity(config, EntityType::Player).read_all()?;
        let matches = JsonlReader::<MatchRecord>::for_entity(config, EntityType::Match).read_all()?;
        let predictions =
            JsonlReader::<MatchPrediction>::for_entity(config, EntityType::Prediction).read_all()?;

        let store = Self::new(players, matches, predictions)?;
        info!(
            "Loaded {} players, {} matches, {} predictions from {:?}",
            store.players.len(),
            store.matches.len(),
            store.predictions.len(),
            config.data_dir
        );
        Ok(store)
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn predictions(&self) -> &[MatchPrediction] {
        &self.predictions
    }

    pub fn find_player(&self, id: &PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn find_match(&self, id: &MatchId) -> Option<&MatchRecord> {
        self.matches.iter().find(|m| &m.id == id)
    }
}

fn ensure_unique<'a>(
    entity: EntityType,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), StorageError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StorageError::DuplicateId {
                entity: entity.label(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::player;
    use crate::models::Position;
    use tempfile::TempDir;

    const PLAYER_LINE: &str = r#"{"id": "p1", "name": "Bukayo Saka", "team": "Arsenal", "league": "Premier League", "position": "FW", "age": 22, "season": "23/24", "matches_played": 35, "minutes": 2890, "goals": 16, "assists": 9, "xG": 14.1, "xA": 8.9, "npxG": 10.2, "psxG": 15.0, "shots_total": 95, "shots_on_target": 38, "sca": 168, "gca": 22, "progressive_passes": 140, "progressive_carries": 110, "progressive_received": 390, "key_passes": 82, "pass_completion_rate": 79.5, "touches_att_pen": 230, "dribbles_completed_pct": 46.0, "tackles": 30, "tackles_won_pct": 58.0, "interceptions": 8, "blocks": 20, "clearances": 5, "pressures": 540, "pressure_regains": 140, "aerials_won_pct": 25.0, "potential_score": 94}"#;

    const PREDICTION_LINE: &str = r#"{"id": "pred-1", "homeTeam": "A", "awayTeam": "B", "homeWinProb": 0.5, "drawProb": 0.3, "awayWinProb": 0.2, "predictedScore": "1-0", "confidence": 0.6}"#;

    #[test]
    fn test_load_from_data_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("players.jsonl"), format!("{}\n", PLAYER_LINE)).unwrap();
        std::fs::write(
            dir.path().join("predictions.jsonl"),
            format!("{}\n", PREDICTION_LINE),
        )
        .unwrap();

        let store = RecordStore::load(&StorageConfig::new(dir.path().to_path_buf())).unwrap();

        assert_eq!(store.players().len(), 1);
        assert!(store.matches().is_empty());
        assert_eq!(store.predictions().len(), 1);
        assert_eq!(store.find_player(&"p1".into()).unwrap().name, "Bukayo Saka");
    }

    #[test]
    fn test_load_propagates_malformed_fixture() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("players.jsonl"), "{not json}\n").unwrap();

        let result = RecordStore::load(&StorageConfig::new(dir.path().to_path_buf()));
        assert!(matches!(result, Err(StorageError::Malformed { line: 1, .. })));
    }

    #[test]
    fn test_missing_ids_are_derived() {
        let mut p = player("", Position::Forward);
        p.name = "Jude Bellingham".to_string();

        let store = RecordStore::new(vec![p], vec![], vec![]).unwrap();
        let id = &store.players()[0].id;

        assert!(!id.is_empty());
        assert!(store.find_player(id).is_some());
    }

    #[test]
    fn test_duplicate_player_ids_rejected() {
        let result = RecordStore::new(
            vec![
                player("p1", Position::Forward),
                player("p1", Position::Defender),
            ],
            vec![],
            vec![],
        );

        match result {
            Err(StorageError::DuplicateId { entity, id }) => {
                assert_eq!(entity, "player");
                assert_eq!(id, "p1");
            }
            other => panic!("Expected DuplicateId, got {:?}", other),
        }
    }

    #[test]
    fn test_find_player_absent() {
        let store = RecordStore::new(vec![player("p1", Position::Forward)], vec![], vec![]).unwrap();
        assert!(store.find_player(&"p2".into()).is_none());
        assert!(store.find_match(&"m1".into()).is_none());
    }

    #[test]
    fn test_shipped_fixtures_load() {
        let data_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        let store = RecordStore::load(&StorageConfig::new(data_dir)).unwrap();

        assert!(store.players().len() >= 10);
        assert!(store.players().iter().all(|p| !p.id.is_empty()));
        for position in Position::ALL {
            assert!(store.players().iter().any(|p| p.position == position));
        }
        assert_eq!(store.matches().len(), 1);
        assert!(store.predictions().iter().all(|p| p.is_consistent()));
    }
}
