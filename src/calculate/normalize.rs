//! Radar normalization.
//!
//! Raw metrics are rescaled against fixed reference maxima so two players
//! share the same [0,100] axis. The maxima come from configuration and are
//! applied identically to both sides of a comparison.

use crate::config::ReferenceMaxima;
use crate::models::{NormalizedVector, PlayerRecord, RadarAxis, RadarComparison, RadarPoint};

/// Upper bound of every radar axis.
pub const FULL_MARK: f64 = 100.0;

/// `value / reference_max * 100`, clamped to [0, 100].
/// A non-positive reference gives 0.
pub fn normalize(value: f64, reference_max: f64) -> f64 {
    if reference_max <= 0.0 {
        return 0.0;
    }
    ((value / reference_max) * 100.0).clamp(0.0, FULL_MARK)
}

/// Reference maximum for an axis; `None` for percentage axes.
pub fn reference_for(axis: RadarAxis, maxima: &ReferenceMaxima) -> Option<f64> {
    match axis {
        RadarAxis::Goals => Some(maxima.goals),
        RadarAxis::Xg => Some(maxima.xg),
        RadarAxis::Assists => Some(maxima.assists),
        RadarAxis::Xa => Some(maxima.xa),
        RadarAxis::Sca => Some(maxima.sca),
        RadarAxis::ProgPasses => Some(maxima.progressive_passes),
        RadarAxis::DefActions => Some(maxima.defensive_actions),
        RadarAxis::AerialPct => None,
    }
}

/// Plotted value of `player` on `axis`.
pub fn axis_value(player: &PlayerRecord, axis: RadarAxis, maxima: &ReferenceMaxima) -> f64 {
    let raw = axis.raw(player);
    match reference_for(axis, maxima) {
        Some(max) => normalize(raw, max),
        None => raw,
    }
}

pub fn normalized_vector(player: &PlayerRecord, maxima: &ReferenceMaxima) -> NormalizedVector {
    NormalizedVector {
        player_id: player.id.clone(),
        values: RadarAxis::ALL
            .iter()
            .map(|&axis| (axis, axis_value(player, axis, maxima)))
            .collect(),
    }
}

/// Both players on the eight radar axes.
pub fn radar_comparison(
    a: &PlayerRecord,
    b: &PlayerRecord,
    maxima: &ReferenceMaxima,
) -> RadarComparison {
    let points = RadarAxis::ALL
        .iter()
        .map(|&axis| RadarPoint {
            axis,
            subject: axis.label(),
            a: axis_value(a, axis, maxima),
            b: axis_value(b, axis, maxima),
            full_mark: FULL_MARK,
        })
        .collect();

    RadarComparison {
        player_a: a.name.clone(),
        player_b: b.name.clone(),
        points,
    }
}
