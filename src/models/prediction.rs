//! Static match forecasts.

use serde::{Deserialize, Serialize};

use super::PredictionId;

/// Allowed drift of the three outcome probabilities from 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-3;

/// Full-time outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Home,
    Draw,
    Away,
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::Home => write!(f, "home"),
            MatchOutcome::Draw => write!(f, "draw"),
            MatchOutcome::Away => write!(f, "away"),
        }
    }
}

/// One forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPrediction {
    pub id: PredictionId,
    pub home_team: String,
    pub away_team: String,
    pub home_win_prob: f64,
    pub draw_prob: f64,
    pub away_win_prob: f64,
    pub predicted_score: String,
    pub confidence: f64,
}

impl MatchPrediction {
    pub fn probability_sum(&self) -> f64 {
        self.home_win_prob + self.draw_prob + self.away_win_prob
    }

    /// True when the outcome probabilities sum to 1 and confidence is in [0,1].
    pub fn is_consistent(&self) -> bool {
        (self.probability_sum() - 1.0).abs() <= PROBABILITY_TOLERANCE
            && (0.0..=1.0).contains(&self.confidence)
    }

    /// Most likely outcome. Ties go home, then draw.
    pub fn favourite(&self) -> MatchOutcome {
        if self.home_win_prob >= self.draw_prob && self.home_win_prob >= self.away_win_prob {
            MatchOutcome::Home
        } else if self.draw_prob >= self.away_win_prob {
            MatchOutcome::Draw
        } else {
            MatchOutcome::Away
        }
    }
}
