//! Statistics calculation engine.
//!
//! Pure derivations over the record store:
//! - League/season filtering
//! - Positional percentile profiles
//! - Dashboard aggregates
//! - Radar normalization and scatter bucketing
//! - Head-to-head, match and prediction views
//!
//! Every function here is total: degenerate input (empty sets, zero
//! denominators) resolves to a defined value instead of an error.

mod aggregate;
mod compare;
mod dashboard;
mod filter;
mod match_stats;
mod normalize;
mod percentile;
mod scatter;

pub use aggregate::*;
pub use compare::*;
pub use dashboard::*;
pub use filter::*;
pub use match_stats::*;
pub use normalize::*;
pub use percentile::*;
pub use scatter::*;

/// Divide, returning 0 when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Per-appearance rate. Zero matches gives 0.
pub fn per_match(value: f64, matches_played: u32) -> f64 {
    ratio(value, matches_played as f64)
}

/// Per-90-minutes rate. Zero minutes gives 0.
pub fn per_90(value: f64, minutes: u32) -> f64 {
    ratio(value * 90.0, minutes as f64)
}

/// Round to `decimals` places, halves rounded up.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}

/// Fixed-precision display string, rounding halves up.
pub fn fixed(value: f64, decimals: u32) -> String {
    format!(
        "{:.*}",
        decimals as usize,
        round_half_up(value, decimals)
    )
}
