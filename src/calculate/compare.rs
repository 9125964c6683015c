//! Head-to-head comparison and scouting card numbers.

use super::{per_90, per_match, ratio};
use crate::models::{HeadToHead, HeadToHeadRow, MetricKey, PlayerRecord, ScoutingCard, Side};

/// Metrics in the head-to-head table, in display order.
pub const HEAD_TO_HEAD_METRICS: [MetricKey; 7] = [
    MetricKey::Goals,
    MetricKey::Xg,
    MetricKey::Assists,
    MetricKey::Sca,
    MetricKey::ProgressiveCarries,
    MetricKey::Tackles,
    MetricKey::PotentialScore,
];

fn head_to_head_label(metric: MetricKey) -> &'static str {
    match metric {
        MetricKey::Xg => "xG",
        other => other.label(),
    }
}

pub fn head_to_head_row(a: &PlayerRecord, b: &PlayerRecord, metric: MetricKey) -> HeadToHeadRow {
    let va = metric.value(a);
    let vb = metric.value(b);
    let sum = va + vb;

    let leader = if va > vb {
        Some(Side::A)
    } else if vb > va {
        Some(Side::B)
    } else {
        None
    };

    HeadToHeadRow {
        metric,
        label: head_to_head_label(metric),
        a: va,
        b: vb,
        leader,
        share_a: ratio(va, sum) * 100.0,
        share_b: ratio(vb, sum) * 100.0,
    }
}

pub fn head_to_head(a: &PlayerRecord, b: &PlayerRecord) -> HeadToHead {
    HeadToHead {
        player_a: a.name.clone(),
        player_b: b.name.clone(),
        rows: HEAD_TO_HEAD_METRICS
            .iter()
            .map(|&m| head_to_head_row(a, b, m))
            .collect(),
    }
}

pub fn scouting_card(player: &PlayerRecord) -> ScoutingCard {
    ScoutingCard {
        player_id: player.id.clone(),
        xg_per_match: per_match(player.xg, player.matches_played),
        xg_per_90: per_90(player.xg, player.minutes),
        sca: player.sca,
        progressive_carries: player.progressive_carries,
        defensive_actions: player.defensive_actions(),
    }
}
