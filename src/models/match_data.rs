//! Match fixtures: score, momentum series and shot map.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MatchId;

/// Result of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotOutcome {
    Goal,
    Saved,
    Missed,
    Blocked,
}

impl ShotOutcome {
    pub const ALL: [ShotOutcome; 4] = [
        ShotOutcome::Goal,
        ShotOutcome::Saved,
        ShotOutcome::Missed,
        ShotOutcome::Blocked,
    ];

    /// Marker colour on the pitch map.
    pub fn color(&self) -> &'static str {
        match self {
            ShotOutcome::Goal => "#eab308",
            ShotOutcome::Saved => "#3b82f6",
            ShotOutcome::Missed => "#ef4444",
            ShotOutcome::Blocked => "#a855f7",
        }
    }
}

impl std::fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShotOutcome::Goal => write!(f, "Goal"),
            ShotOutcome::Saved => write!(f, "Saved"),
            ShotOutcome::Missed => write!(f, "Missed"),
            ShotOutcome::Blocked => write!(f, "Blocked"),
        }
    }
}

/// One attempt in a match. Coordinates are normalized to 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub outcome: ShotOutcome,
    pub xg: f64,
    pub player: String,
    pub minute: u32,
}

/// Momentum sample. Positive is home dominance, negative away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumSample {
    pub minute: u32,
    pub value: f64,
}

/// A played fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: MatchId,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub date: NaiveDate,
    pub momentum: Vec<MomentumSample>,
    pub shots: Vec<ShotEvent>,
}

impl MatchRecord {
    /// "Home 2 - 1 Away"
    pub fn scoreline(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.home_team, self.home_score, self.away_score, self.away_team
        )
    }
}
