//! Core data models for the scouting desk.

mod ids;
mod match_data;
mod player;
mod prediction;
mod views;

pub use ids::*;
pub use match_data::*;
pub use player::*;
pub use prediction::*;
pub use views::*;

#[cfg(test)]
pub(crate) use player::fixtures;
