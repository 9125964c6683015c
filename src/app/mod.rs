//! Application state and the reducer that drives it.
//!
//! `AppState` is a plain value. Every [`Action`] produces a new state via
//! [`AppState::apply`]; nothing mutates it in place. The async side lives in
//! [`session`], which holds the state behind a lock only while a transition
//! is applied.

pub mod session;

pub use session::Session;

use serde::Serialize;
use tracing::debug;

use crate::agents::scout_report::ReportOutcome;
use crate::config::FilterConfig;
use crate::models::{PlayerId, Side};
use crate::storage::RecordStore;

/// Top-level page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppView {
    #[default]
    Dashboard,
    PlayerPerformance,
    Comparison,
    Scouting,
    MatchAnalysis,
    Predictions,
}

/// Generation of a report request. Responses carrying an older token are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ReportToken(u64);

impl ReportToken {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for ReportToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the scouting report: idle, requesting, then ready or failed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportState {
    #[default]
    Idle,
    Requesting {
        token: ReportToken,
        player_id: PlayerId,
    },
    Ready {
        token: ReportToken,
        player_id: PlayerId,
        text: String,
    },
    Failed {
        token: ReportToken,
        player_id: PlayerId,
        message: String,
    },
}

impl ReportState {
    pub fn is_requesting(&self) -> bool {
        matches!(self, ReportState::Requesting { .. })
    }

    /// Report text or failure message, once resolved.
    pub fn text(&self) -> Option<&str> {
        match self {
            ReportState::Ready { text, .. } => Some(text),
            ReportState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Everything the user can do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectView(AppView),
    SetLeague(String),
    SetSeason(String),
    SelectPlayer(Option<PlayerId>),
    SetComparison {
        slot: Side,
        player: Option<PlayerId>,
    },
    ReportRequested {
        player_id: PlayerId,
    },
    ReportResolved {
        token: ReportToken,
        outcome: ReportOutcome,
    },
}

/// Current selections and report status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
    pub view: AppView,
    pub league: String,
    pub season: String,
    pub selected_player: Option<PlayerId>,
    pub comparison_a: Option<PlayerId>,
    pub comparison_b: Option<PlayerId>,
    pub report: ReportState,
    generation: ReportToken,
}

impl AppState {
    /// Initial state: configured filters, the first two records in the
    /// comparison slots, no selected player.
    pub fn new(filters: &FilterConfig, store: &RecordStore) -> Self {
        let mut ids = store.players().iter().map(|p| p.id.clone());
        Self {
            view: AppView::default(),
            league: filters.league.clone(),
            season: filters.season.clone(),
            selected_player: None,
            comparison_a: ids.next(),
            comparison_b: ids.next(),
            report: ReportState::Idle,
            generation: ReportToken::default(),
        }
    }

    /// Token of the most recent report request or change of selected player.
    pub fn generation(&self) -> ReportToken {
        self.generation
    }

    pub fn comparison(&self, slot: Side) -> Option<&PlayerId> {
        match slot {
            Side::A => self.comparison_a.as_ref(),
            Side::B => self.comparison_b.as_ref(),
        }
    }

    /// Apply one action and return the resulting state.
    pub fn apply(self, action: Action) -> AppState {
        match action {
            Action::SelectView(view) => AppState { view, ..self },
            Action::SetLeague(league) => AppState { league, ..self },
            Action::SetSeason(season) => AppState { season, ..self },
            Action::SelectPlayer(player) if player == self.selected_player => self,
            Action::SelectPlayer(player) => AppState {
                selected_player: player,
                report: ReportState::Idle,
                generation: self.generation.next(),
                ..self
            },
            Action::SetComparison { slot, player } => match slot {
                Side::A => AppState {
                    comparison_a: player,
                    ..self
                },
                Side::B => AppState {
                    comparison_b: player,
                    ..self
                },
            },
            Action::ReportRequested { player_id } => {
                let token = self.generation.next();
                AppState {
                    report: ReportState::Requesting { token, player_id },
                    generation: token,
                    ..self
                }
            }
            Action::ReportResolved { token, outcome } => self.resolve_report(token, outcome),
        }
    }

    fn resolve_report(self, token: ReportToken, outcome: ReportOutcome) -> AppState {
        let pending = match &self.report {
            ReportState::Requesting {
                token: current,
                player_id,
            } if *current == token => Some(player_id.clone()),
            _ => None,
        };

        let Some(player_id) = pending else {
            debug!(
                "Dropping stale report response {} (current {})",
                token, self.generation
            );
            return self;
        };

        let report = match outcome {
            ReportOutcome::Ready(text) => ReportState::Ready {
                token,
                player_id,
                text,
            },
            ReportOutcome::Failed(message) => ReportState::Failed {
                token,
                player_id,
                message,
            },
        };

        AppState { report, ..self }
    }
}
