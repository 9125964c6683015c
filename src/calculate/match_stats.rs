//! Match and prediction views.

use super::fixed;
use crate::models::{
    MatchPrediction, MatchRecord, MatchSummary, PredictionView, ShotEvent, ShotMarker, ShotOutcome,
};

/// Smallest marker drawn for a shot, in pixels.
pub const MIN_MARKER_PX: f64 = 8.0;

/// Marker pixels per unit of xG.
pub const MARKER_PX_PER_XG: f64 = 30.0;

pub fn marker_size(xg: f64) -> f64 {
    (xg * MARKER_PX_PER_XG).max(MIN_MARKER_PX)
}

pub fn shot_marker(shot: &ShotEvent) -> ShotMarker {
    ShotMarker {
        id: shot.id,
        player: shot.player.clone(),
        minute: shot.minute,
        outcome: shot.outcome,
        xg: shot.xg,
        x: shot.x,
        y: shot.y,
        size_px: marker_size(shot.xg),
        color: shot.outcome.color(),
    }
}

/// Shot map, totals and timeline for a match. The record is not reordered.
pub fn match_summary(m: &MatchRecord) -> MatchSummary {
    let total_xg: f64 = m.shots.iter().map(|s| s.xg).sum();

    let outcome_counts = ShotOutcome::ALL
        .iter()
        .map(|&o| (o, m.shots.iter().filter(|s| s.outcome == o).count()))
        .collect();

    let mut timeline: Vec<ShotMarker> = m.shots.iter().map(shot_marker).collect();
    timeline.sort_by(|a, b| b.minute.cmp(&a.minute));

    MatchSummary {
        match_id: m.id.clone(),
        scoreline: m.scoreline(),
        total_xg: fixed(total_xg, 2),
        shot_count: m.shots.len(),
        outcome_counts,
        timeline,
        momentum: m.momentum.iter().map(|s| (s.minute, s.value)).collect(),
    }
}

fn pct(probability: f64) -> String {
    fixed(probability * 100.0, 0)
}

pub fn prediction_view(p: &MatchPrediction) -> PredictionView {
    PredictionView {
        fixture: format!("{} vs {}", p.home_team, p.away_team),
        home_pct: pct(p.home_win_prob),
        draw_pct: pct(p.draw_prob),
        away_pct: pct(p.away_win_prob),
        confidence_pct: pct(p.confidence),
        predicted_score: p.predicted_score.clone(),
        favourite: p.favourite(),
        consistent: p.is_consistent(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchOutcome, MomentumSample};
    use chrono::NaiveDate;

    fn shot(id: u32, minute: u32, outcome: ShotOutcome, xg: f64) -> ShotEvent {
        ShotEvent {
            id,
            x: 85.0,
            y: 50.0,
            outcome,
            xg,
            player: format!("Shooter {}", id),
            minute,
        }
    }

    fn sample_match() -> MatchRecord {
        MatchRecord {
            id: "m1".into(),
            home_team: "Man City".to_string(),
            away_team: "Arsenal".to_string(),
            home_score: 1,
            away_score: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            momentum: vec![
                MomentumSample { minute: 0, value: 0.0 },
                MomentumSample { minute: 10, value: 25.0 },
            ],
            shots: vec![
                shot(1, 12, ShotOutcome::Goal, 0.45),
                shot(2, 78, ShotOutcome::Saved, 0.12),
                shot(3, 40, ShotOutcome::Missed, 0.08),
                shot(4, 40, ShotOutcome::Goal, 0.3),
            ],
        }
    }

    #[test]
    fn test_marker_size_floor() {
        assert_eq!(marker_size(0.05), 8.0);
        assert!((marker_size(0.5) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_match_summary_totals() {
        let summary = match_summary(&sample_match());

        assert_eq!(summary.total_xg, "0.95");
        assert_eq!(summary.shot_count, 4);
        assert_eq!(summary.scoreline, "Man City 1 - 1 Arsenal");
        assert_eq!(summary.outcome_counts[0], (ShotOutcome::Goal, 2));
        assert_eq!(summary.outcome_counts[3], (ShotOutcome::Blocked, 0));
        assert_eq!(summary.momentum, vec![(0, 0.0), (10, 25.0)]);
    }

    #[test]
    fn test_timeline_latest_first_without_mutating_record() {
        let m = sample_match();
        let summary = match_summary(&m);

        let minutes: Vec<_> = summary.timeline.iter().map(|s| s.minute).collect();
        assert_eq!(minutes, vec![78, 40, 40, 12]);
        // equal minutes keep record order
        assert_eq!(summary.timeline[1].id, 3);
        assert_eq!(m.shots[0].id, 1);
    }

    #[test]
    fn test_empty_match() {
        let mut m = sample_match();
        m.shots.clear();
        let summary = match_summary(&m);

        assert_eq!(summary.total_xg, "0.00");
        assert!(summary.timeline.is_empty());
    }

    #[test]
    fn test_prediction_view() {
        let p = MatchPrediction {
            id: "pred-1".into(),
            home_team: "Inter".to_string(),
            away_team: "Juventus".to_string(),
            home_win_prob: 0.48,
            draw_prob: 0.27,
            away_win_prob: 0.25,
            predicted_score: "2-1".to_string(),
            confidence: 0.69,
        };

        let view = prediction_view(&p);
        assert_eq!(view.fixture, "Inter vs Juventus");
        assert_eq!(view.home_pct, "48");
        assert_eq!(view.draw_pct, "27");
        assert_eq!(view.away_pct, "25");
        assert_eq!(view.confidence_pct, "69");
        assert_eq!(view.favourite, MatchOutcome::Home);
        assert!(view.consistent);
    }
}
