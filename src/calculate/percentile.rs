//! Positional percentile ranking.
//!
//! A player's rank on a metric is computed against the records sharing its
//! position. The rank is a lower-bound search over the sorted peer values,
//! so a value tied with several peers lands at the start of the tied block.
//! This is deliberately not textbook percentile-rank; outputs must stay
//! stable across releases.

use crate::models::{MetricKey, PercentileBand, PercentileEntry, PercentileProfile, PlayerRecord, Position};

/// Metrics shown on a percentile profile, in display order.
pub const PROFILE_METRICS: [MetricKey; 10] = [
    MetricKey::Npxg,
    MetricKey::Xa,
    MetricKey::Sca,
    MetricKey::ProgressivePasses,
    MetricKey::ProgressiveCarries,
    MetricKey::TouchesAttPen,
    MetricKey::Tackles,
    MetricKey::Interceptions,
    MetricKey::AerialsWonPct,
    MetricKey::Pressures,
];

/// Rank of a peer group too small to compare against.
pub const DEGENERATE_PERCENTILE: u8 = 100;

/// Records sharing `position`, in input order.
pub fn peer_group<'a, I>(players: I, position: Position) -> Vec<&'a PlayerRecord>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    players
        .into_iter()
        .filter(|p| p.position == position)
        .collect()
}

/// Rank `value` among the peers' values for `metric`, 0-100.
///
/// Peers of size 0 or 1 give [`DEGENERATE_PERCENTILE`]. When every peer is
/// below `value` the top rank is used, where a not-found search would
/// otherwise rank it 0.
pub fn percentile(peers: &[&PlayerRecord], metric: MetricKey, value: f64) -> u8 {
    let values: Vec<f64> = peers.iter().map(|p| metric.value(p)).collect();
    percentile_of(&values, value)
}

/// [`percentile`] over raw values.
pub fn percentile_of(peer_values: &[f64], value: f64) -> u8 {
    if peer_values.len() <= 1 {
        return DEGENERATE_PERCENTILE;
    }

    let mut sorted = peer_values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let index = sorted
        .iter()
        .position(|v| *v >= value)
        .unwrap_or(count - 1);

    let pct = ((index + 1) as f64 / count as f64) * 100.0;
    (pct + 0.5).floor().clamp(0.0, 100.0) as u8
}

/// Profile `player` against the records in `population` sharing its position.
pub fn percentile_profile<'a, I>(player: &PlayerRecord, population: I) -> PercentileProfile
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let peers = peer_group(population, player.position);

    let entries = PROFILE_METRICS
        .iter()
        .map(|&metric| {
            let value = metric.value(player);
            let rank = percentile(&peers, metric, value);
            PercentileEntry {
                metric,
                label: metric.label(),
                value,
                percentile: rank,
                band: PercentileBand::from_percentile(rank),
            }
        })
        .collect();

    PercentileProfile {
        player_id: player.id.clone(),
        position: player.position,
        sample_size: peers.len(),
        entries,
    }
}
