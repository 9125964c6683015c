//! Player-season records and the metric catalogue.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::PlayerId;

/// Positional group. Drives peer grouping and display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "FW")]
    Forward,
    #[serde(rename = "MF")]
    Midfielder,
    #[serde(rename = "DF")]
    Defender,
    #[serde(rename = "GK")]
    Goalkeeper,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Forward,
        Position::Midfielder,
        Position::Defender,
        Position::Goalkeeper,
    ];

    /// Short tag as it appears in fixtures.
    pub fn tag(&self) -> &'static str {
        match self {
            Position::Forward => "FW",
            Position::Midfielder => "MF",
            Position::Defender => "DF",
            Position::Goalkeeper => "GK",
        }
    }

    /// Chart colour for this position.
    pub fn color(&self) -> &'static str {
        match self {
            Position::Forward => "#ef4444",
            Position::Midfielder => "#3b82f6",
            Position::Defender => "#10b981",
            Position::Goalkeeper => "#eab308",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FW" => Ok(Position::Forward),
            "MF" => Ok(Position::Midfielder),
            "DF" => Ok(Position::Defender),
            "GK" => Ok(Position::Goalkeeper),
            other => Err(format!("unknown position: {}", other)),
        }
    }
}

/// One player-season observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Derived from name/team/season when absent in the fixture
    #[serde(default)]
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub league: String,
    pub position: Position,
    pub age: u32,
    pub season: String,
    pub matches_played: u32,
    pub minutes: u32,

    // Attacking
    pub goals: f64,
    pub assists: f64,
    #[serde(rename = "xG")]
    pub xg: f64,
    #[serde(rename = "xA")]
    pub xa: f64,
    #[serde(rename = "npxG")]
    pub npxg: f64,
    #[serde(rename = "psxG")]
    pub psxg: f64,
    pub shots_total: f64,
    pub shots_on_target: f64,

    // Possession / creation
    pub sca: f64,
    pub gca: f64,
    pub progressive_passes: f64,
    pub progressive_carries: f64,
    pub progressive_received: f64,
    pub key_passes: f64,
    pub pass_completion_rate: f64,
    pub touches_att_pen: f64,
    pub dribbles_completed_pct: f64,

    // Defensive / work rate
    pub tackles: f64,
    pub tackles_won_pct: f64,
    pub interceptions: f64,
    pub blocks: f64,
    pub clearances: f64,
    pub pressures: f64,
    pub pressure_regains: f64,
    pub aerials_won_pct: f64,

    /// Model potential, 0-99
    pub potential_score: f64,
}

impl PlayerRecord {
    /// Tackles plus interceptions.
    pub fn defensive_actions(&self) -> f64 {
        self.tackles + self.interceptions
    }

    /// Fill in a deterministic id if the fixture row had none.
    pub fn with_derived_id(mut self) -> Self {
        if self.id.is_empty() {
            self.id = PlayerId::generate(&[&self.name, &self.team, &self.season]);
        }
        self
    }
}

/// Named numeric metric on a [`PlayerRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Goals,
    Assists,
    Xg,
    Xa,
    Npxg,
    Psxg,
    ShotsTotal,
    ShotsOnTarget,
    Sca,
    Gca,
    ProgressivePasses,
    ProgressiveCarries,
    ProgressiveReceived,
    KeyPasses,
    PassCompletionRate,
    TouchesAttPen,
    DribblesCompletedPct,
    Tackles,
    TacklesWonPct,
    Interceptions,
    Blocks,
    Clearances,
    Pressures,
    PressureRegains,
    AerialsWonPct,
    MatchesPlayed,
    Minutes,
    PotentialScore,
}

impl MetricKey {
    pub const ALL: [MetricKey; 28] = [
        MetricKey::Goals,
        MetricKey::Assists,
        MetricKey::Xg,
        MetricKey::Xa,
        MetricKey::Npxg,
        MetricKey::Psxg,
        MetricKey::ShotsTotal,
        MetricKey::ShotsOnTarget,
        MetricKey::Sca,
        MetricKey::Gca,
        MetricKey::ProgressivePasses,
        MetricKey::ProgressiveCarries,
        MetricKey::ProgressiveReceived,
        MetricKey::KeyPasses,
        MetricKey::PassCompletionRate,
        MetricKey::TouchesAttPen,
        MetricKey::DribblesCompletedPct,
        MetricKey::Tackles,
        MetricKey::TacklesWonPct,
        MetricKey::Interceptions,
        MetricKey::Blocks,
        MetricKey::Clearances,
        MetricKey::Pressures,
        MetricKey::PressureRegains,
        MetricKey::AerialsWonPct,
        MetricKey::MatchesPlayed,
        MetricKey::Minutes,
        MetricKey::PotentialScore,
    ];

    /// Snake-case key, as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Goals => "goals",
            MetricKey::Assists => "assists",
            MetricKey::Xg => "xg",
            MetricKey::Xa => "xa",
            MetricKey::Npxg => "npxg",
            MetricKey::Psxg => "psxg",
            MetricKey::ShotsTotal => "shots_total",
            MetricKey::ShotsOnTarget => "shots_on_target",
            MetricKey::Sca => "sca",
            MetricKey::Gca => "gca",
            MetricKey::ProgressivePasses => "progressive_passes",
            MetricKey::ProgressiveCarries => "progressive_carries",
            MetricKey::ProgressiveReceived => "progressive_received",
            MetricKey::KeyPasses => "key_passes",
            MetricKey::PassCompletionRate => "pass_completion_rate",
            MetricKey::TouchesAttPen => "touches_att_pen",
            MetricKey::DribblesCompletedPct => "dribbles_completed_pct",
            MetricKey::Tackles => "tackles",
            MetricKey::TacklesWonPct => "tackles_won_pct",
            MetricKey::Interceptions => "interceptions",
            MetricKey::Blocks => "blocks",
            MetricKey::Clearances => "clearances",
            MetricKey::Pressures => "pressures",
            MetricKey::PressureRegains => "pressure_regains",
            MetricKey::AerialsWonPct => "aerials_won_pct",
            MetricKey::MatchesPlayed => "matches_played",
            MetricKey::Minutes => "minutes",
            MetricKey::PotentialScore => "potential_score",
        }
    }

    /// Human-readable label for charts and tables.
    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Goals => "Goals",
            MetricKey::Assists => "Assists",
            MetricKey::Xg => "Expected Goals (xG)",
            MetricKey::Xa => "xA",
            MetricKey::Npxg => "npxG",
            MetricKey::Psxg => "PSxG",
            MetricKey::ShotsTotal => "Shots",
            MetricKey::ShotsOnTarget => "Shots on Target",
            MetricKey::Sca => "SCA",
            MetricKey::Gca => "GCA",
            MetricKey::ProgressivePasses => "Prog Passes",
            MetricKey::ProgressiveCarries => "Prog Carries",
            MetricKey::ProgressiveReceived => "Prog Received",
            MetricKey::KeyPasses => "Key Passes",
            MetricKey::PassCompletionRate => "Pass %",
            MetricKey::TouchesAttPen => "Touches Box",
            MetricKey::DribblesCompletedPct => "Dribble %",
            MetricKey::Tackles => "Tackles",
            MetricKey::TacklesWonPct => "Tackle Win %",
            MetricKey::Interceptions => "Interceptions",
            MetricKey::Blocks => "Blocks",
            MetricKey::Clearances => "Clearances",
            MetricKey::Pressures => "Pressures",
            MetricKey::PressureRegains => "Pressure Regains",
            MetricKey::AerialsWonPct => "Aerial %",
            MetricKey::MatchesPlayed => "Matches",
            MetricKey::Minutes => "Minutes",
            MetricKey::PotentialScore => "Potential Score",
        }
    }

    /// Read this metric from a record.
    pub fn value(&self, p: &PlayerRecord) -> f64 {
        match self {
            MetricKey::Goals => p.goals,
            MetricKey::Assists => p.assists,
            MetricKey::Xg => p.xg,
            MetricKey::Xa => p.xa,
            MetricKey::Npxg => p.npxg,
            MetricKey::Psxg => p.psxg,
            MetricKey::ShotsTotal => p.shots_total,
            MetricKey::ShotsOnTarget => p.shots_on_target,
            MetricKey::Sca => p.sca,
            MetricKey::Gca => p.gca,
            MetricKey::ProgressivePasses => p.progressive_passes,
            MetricKey::ProgressiveCarries => p.progressive_carries,
            MetricKey::ProgressiveReceived => p.progressive_received,
            MetricKey::KeyPasses => p.key_passes,
            MetricKey::PassCompletionRate => p.pass_completion_rate,
            MetricKey::TouchesAttPen => p.touches_att_pen,
            MetricKey::DribblesCompletedPct => p.dribbles_completed_pct,
            MetricKey::Tackles => p.tackles,
            MetricKey::TacklesWonPct => p.tackles_won_pct,
            MetricKey::Interceptions => p.interceptions,
            MetricKey::Blocks => p.blocks,
            MetricKey::Clearances => p.clearances,
            MetricKey::Pressures => p.pressures,
            MetricKey::PressureRegains => p.pressure_regains,
            MetricKey::AerialsWonPct => p.aerials_won_pct,
            MetricKey::MatchesPlayed => p.matches_played as f64,
            MetricKey::Minutes => p.minutes as f64,
            MetricKey::PotentialScore => p.potential_score,
        }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        MetricKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| format!("unknown metric: {}", s))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A record with every metric zeroed, for tests to fill in.
    pub fn player(id: &str, position: Position) -> PlayerRecord {
        PlayerRecord {
            id: id.into(),
            name: format!("Player {}", id),
            team: "Test FC".to_string(),
            league: "Premier League".to_string(),
            position,
            age: 24,
            season: "23/24".to_string(),
            matches_played: 30,
            minutes: 2500,
            goals: 0.0,
            assists: 0.0,
            xg: 0.0,
            xa: 0.0,
            npxg: 0.0,
            psxg: 0.0,
            shots_total: 0.0,
            shots_on_target: 0.0,
            sca: 0.0,
            gca: 0.0,
            progressive_passes: 0.0,
            progressive_carries: 0.0,
            progressive_received: 0.0,
            key_passes: 0.0,
            pass_completion_rate: 0.0,
            touches_att_pen: 0.0,
            dribbles_completed_pct: 0.0,
            tackles: 0.0,
            tackles_won_pct: 0.0,
            interceptions: 0.0,
            blocks: 0.0,
            clearances: 0.0,
            pressures: 0.0,
            pressure_regains: 0.0,
            aerials_won_pct: 0.0,
            potential_score: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::player;
    use super::*;

    #[test]
    fn test_position_serialization() {
        let json = serde_json::to_string(&Position::Forward).unwrap();
        assert_eq!(json, "\"FW\"");

        let parsed: Position = serde_json::from_str("\"GK\"").unwrap();
        assert_eq!(parsed, Position::Goalkeeper);
    }

    #[test]
    fn test_position_rejects_unknown_tag() {
        assert!(serde_json::from_str::<Position>("\"ST\"").is_err());
        assert!("ST".parse::<Position>().is_err());
        assert_eq!("mf".parse::<Position>().unwrap(), Position::Midfielder);
    }

    #[test]
    fn test_every_position_has_distinct_color() {
        let colors: std::collections::HashSet<_> =
            Position::ALL.iter().map(|p| p.color()).collect();
        assert_eq!(colors.len(), Position::ALL.len());
    }

    #[test]
    fn test_metric_key_parse() {
        assert_eq!("npxg".parse::<MetricKey>().unwrap(), MetricKey::Npxg);
        assert_eq!(
            "Progressive_Passes".parse::<MetricKey>().unwrap(),
            MetricKey::ProgressivePasses
        );
        assert!("dribbles".parse::<MetricKey>().is_err());
    }

    #[test]
    fn test_metric_key_round_trips_every_name() {
        for key in MetricKey::ALL {
            assert_eq!(key.as_str().parse::<MetricKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_metric_value_reads_field() {
        let mut p = player("p1", Position::Forward);
        p.npxg = 12.4;
        p.minutes = 2700;

        assert_eq!(MetricKey::Npxg.value(&p), 12.4);
        assert_eq!(MetricKey::Minutes.value(&p), 2700.0);
    }

    #[test]
    fn test_record_deserializes_fixture_field_names() {
        let json = r#"{
            "name": "Test", "team": "FC", "league": "Serie A", "position": "MF",
            "age": 21, "season": "23/24", "matches_played": 10, "minutes": 900,
            "goals": 1, "assists": 2, "xG": 1.5, "xA": 2.2, "npxG": 1.5, "psxG": 1.1,
            "shots_total": 12, "shots_on_target": 4, "sca": 40, "gca": 5,
            "progressive_passes": 80, "progressive_carries": 30, "progressive_received": 20,
            "key_passes": 15, "pass_completion_rate": 88.0, "touches_att_pen": 25,
            "dribbles_completed_pct": 55.0, "tackles": 20, "tackles_won_pct": 60.0,
            "interceptions": 10, "blocks": 5, "clearances": 3, "pressures": 300,
            "pressure_regains": 90, "aerials_won_pct": 40.0, "potential_score": 88
        }"#;

        let p: PlayerRecord = serde_json::from_str(json).unwrap();
        assert!(p.id.is_empty());
        assert_eq!(p.xg, 1.5);
        assert_eq!(p.position, Position::Midfielder);

        let p = p.with_derived_id();
        assert_eq!(p.id, PlayerId::generate(&["Test", "FC", "23/24"]));
    }

    #[test]
    fn test_defensive_actions() {
        let mut p = player("p1", Position::Defender);
        p.tackles = 40.0;
        p.interceptions = 25.0;
        assert_eq!(p.defensive_actions(), 65.0);
    }
}
