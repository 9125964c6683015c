//! Derived view models.
//!
//! These are computed on demand from the record store and handed to the
//! presentation layer. Nothing here is cached or mutated after creation.

use serde::Serialize;

use super::{MatchId, MatchOutcome, MetricKey, PlayerId, PlayerRecord, Position, ShotOutcome};

/// Subset of player records selected by league and season.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FilteredPlayerSet<'a> {
    players: Vec<&'a PlayerRecord>,
}

impl<'a> FilteredPlayerSet<'a> {
    pub fn new(players: Vec<&'a PlayerRecord>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a PlayerRecord> + '_ {
        self.players.iter().copied()
    }
}

/// Colour band of a percentile bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentileBand {
    Elite,
    Strong,
    Average,
    Weak,
}

impl PercentileBand {
    pub fn from_percentile(percentile: u8) -> Self {
        if percentile >= 90 {
            PercentileBand::Elite
        } else if percentile >= 70 {
            PercentileBand::Strong
        } else if percentile >= 40 {
            PercentileBand::Average
        } else {
            PercentileBand::Weak
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PercentileBand::Elite => "#10b981",
            PercentileBand::Strong => "#3b82f6",
            PercentileBand::Average => "#f59e0b",
            PercentileBand::Weak => "#ef4444",
        }
    }
}

impl std::fmt::Display for PercentileBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PercentileBand::Elite => write!(f, "elite"),
            PercentileBand::Strong => write!(f, "strong"),
            PercentileBand::Average => write!(f, "average"),
            PercentileBand::Weak => write!(f, "weak"),
        }
    }
}

/// One bar of a percentile profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileEntry {
    pub metric: MetricKey,
    pub label: &'static str,
    pub value: f64,
    pub percentile: u8,
    pub band: PercentileBand,
}

/// Per-metric rank of one player against positional peers.
#[derive(Debug, Clone, Serialize)]
pub struct PercentileProfile {
    pub player_id: PlayerId,
    pub position: Position,
    /// Number of peers ranked against (subject included when present)
    pub sample_size: usize,
    pub entries: Vec<PercentileEntry>,
}

impl PercentileProfile {
    pub fn get(&self, metric: MetricKey) -> Option<u8> {
        self.entries
            .iter()
            .find(|e| e.metric == metric)
            .map(|e| e.percentile)
    }
}

/// Dashboard tiles for a filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AggregateSummary {
    pub player_count: usize,
    pub mean_xg: f64,
    pub mean_sca: f64,
    pub high_potential_count: usize,
}

/// Fixed-precision rendering of an [`AggregateSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDisplay {
    pub count: usize,
    #[serde(rename = "meanXG")]
    pub mean_xg: String,
    #[serde(rename = "meanSCA")]
    pub mean_sca: String,
    pub high_potential: usize,
}

/// Radar axis for the side-by-side comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RadarAxis {
    Goals,
    Xg,
    Assists,
    Xa,
    Sca,
    ProgPasses,
    DefActions,
    AerialPct,
}

impl RadarAxis {
    pub const ALL: [RadarAxis; 8] = [
        RadarAxis::Goals,
        RadarAxis::Xg,
        RadarAxis::Assists,
        RadarAxis::Xa,
        RadarAxis::Sca,
        RadarAxis::ProgPasses,
        RadarAxis::DefActions,
        RadarAxis::AerialPct,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RadarAxis::Goals => "Goals",
            RadarAxis::Xg => "xG",
            RadarAxis::Assists => "Assists",
            RadarAxis::Xa => "xA",
            RadarAxis::Sca => "SCA",
            RadarAxis::ProgPasses => "Prog Passes",
            RadarAxis::DefActions => "Def Actions",
            RadarAxis::AerialPct => "Aerial %",
        }
    }

    /// Raw value this axis plots.
    pub fn raw(&self, p: &PlayerRecord) -> f64 {
        match self {
            RadarAxis::Goals => p.goals,
            RadarAxis::Xg => p.xg,
            RadarAxis::Assists => p.assists,
            RadarAxis::Xa => p.xa,
            RadarAxis::Sca => p.sca,
            RadarAxis::ProgPasses => p.progressive_passes,
            RadarAxis::DefActions => p.defensive_actions(),
            RadarAxis::AerialPct => p.aerials_won_pct,
        }
    }

    /// Already on a 0-100 scale.
    pub fn is_percentage(&self) -> bool {
        matches!(self, RadarAxis::AerialPct)
    }
}

/// One player's values rescaled to [0,100], one per radar axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedVector {
    pub player_id: PlayerId,
    pub values: Vec<(RadarAxis, f64)>,
}

impl NormalizedVector {
    pub fn get(&self, axis: RadarAxis) -> Option<f64> {
        self.values.iter().find(|(a, _)| *a == axis).map(|(_, v)| *v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub axis: RadarAxis,
    pub subject: &'static str,
    pub a: f64,
    pub b: f64,
    pub full_mark: f64,
}

/// Two players on a shared radar.
#[derive(Debug, Clone, Serialize)]
pub struct RadarComparison {
    pub player_a: String,
    pub player_b: String,
    pub points: Vec<RadarPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub player_id: PlayerId,
    pub name: String,
    pub team: String,
    pub x: f64,
    pub y: f64,
}

/// Points sharing a position, drawn in one colour.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterSeries {
    pub position: Position,
    pub color: &'static str,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPlot {
    pub x_metric: MetricKey,
    pub y_metric: MetricKey,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<ScatterSeries>,
}

impl ScatterPlot {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Which side of a comparison leads a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHeadRow {
    pub metric: MetricKey,
    pub label: &'static str,
    pub a: f64,
    pub b: f64,
    /// None on a tie
    pub leader: Option<Side>,
    pub share_a: f64,
    pub share_b: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadToHead {
    pub player_a: String,
    pub player_b: String,
    pub rows: Vec<HeadToHeadRow>,
}

/// Headline numbers on the scouting page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutingCard {
    pub player_id: PlayerId,
    pub xg_per_match: f64,
    pub xg_per_90: f64,
    pub sca: f64,
    pub progressive_carries: f64,
    pub defensive_actions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotMarker {
    pub id: u32,
    pub player: String,
    pub minute: u32,
    pub outcome: ShotOutcome,
    pub xg: f64,
    pub x: f64,
    pub y: f64,
    pub size_px: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub scoreline: String,
    pub total_xg: String,
    pub shot_count: usize,
    pub outcome_counts: Vec<(ShotOutcome, usize)>,
    /// Latest shot first
    pub timeline: Vec<ShotMarker>,
    pub momentum: Vec<(u32, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub fixture: String,
    pub home_pct: String,
    pub draw_pct: String,
    pub away_pct: String,
    pub confidence_pct: String,
    pub predicted_score: String,
    pub favourite: MatchOutcome,
    pub consistent: bool,
}

/// Dashboard page: tiles, filter options and prospects list.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub league: String,
    pub season: String,
    pub summary: SummaryDisplay,
    pub leagues: Vec<String>,
    pub seasons: Vec<String>,
    pub prospects: Vec<&'a PlayerRecord>,
}
