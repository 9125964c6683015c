//! # Scout Desk
//!
//! Football scouting analytics over static player, match and prediction
//! fixtures, with AI-written scouting reports.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (player records, matches, predictions, derived views)
//! - **storage**: JSONL fixture loading and the in-memory record store
//! - **calculate**: Filtering, percentiles, aggregates and normalization
//! - **agents**: AI-powered scouting report generation
//! - **app**: Reducer-driven application state and the shared session
//! - **config**: Configuration loading and validation

pub mod agents;
pub mod app;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
