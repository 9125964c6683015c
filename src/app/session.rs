//! Shared session: record store, current state, and the report agent.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{Action, AppState, ReportState};
use crate::agents::scout_report::ScoutReportAgent;
use crate::calculate;
use crate::config::{FilterConfig, ReferenceMaxima};
use crate::models::{
    DashboardView, FilteredPlayerSet, HeadToHead, MatchId, MatchSummary, MetricKey,
    PercentileProfile, PlayerId, PlayerRecord, PredictionView, RadarComparison, ScatterPlot,
    ScoutingCard, Side,
};
use crate::storage::RecordStore;

/// Lookup failures when deriving a view.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Unknown match: {0}")]
    UnknownMatch(MatchId),

    #[error("No matches loaded")]
    NoMatches,

    #[error("Comparison slot {0:?} is empty")]
    ComparisonIncomplete(Side),
}

/// One user's view of the data.
///
/// The store is immutable and shared. The state lock is taken only to apply a
/// transition or copy a snapshot; it is never held across the report call.
pub struct Session {
    store: Arc<RecordStore>,
    state: RwLock<AppState>,
    agent: ScoutReportAgent,
    maxima: ReferenceMaxima,
}

impl Session {
    pub fn new(
        store: Arc<RecordStore>,
        agent: ScoutReportAgent,
        filters: &FilterConfig,
        maxima: ReferenceMaxima,
    ) -> Self {
        let state = AppState::new(filters, &store);
        Self {
            store,
            state: RwLock::new(state),
            agent,
            maxima,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Apply an action and return the new state.
    pub async fn dispatch(&self, action: Action) -> AppState {
        let mut state = self.state.write().await;
        let next = state.clone().apply(action);
        *state = next.clone();
        next
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// Request a scouting report for `player_id` and wait for it.
    ///
    /// Returns the report state after the response is applied. If another
    /// request or a player selection happened in the meantime the response is
    /// discarded and the newer state is returned unchanged.
    pub async fn request_report(&self, player_id: &PlayerId) -> Result<ReportState, SessionError> {
        let player = self.player(player_id)?.clone();

        let token = self
            .dispatch(Action::ReportRequested {
                player_id: player_id.clone(),
            })
            .await
            .generation();

        info!("Report {} requested for player {}", token, player_id);
        let outcome = self.agent.generate_report(&player).await;
        if !outcome.is_ready() {
            warn!("Report {} for player {}: {}", token, player_id, outcome.text());
        }

        let state = self
            .dispatch(Action::ReportResolved { token, outcome })
            .await;
        Ok(state.report)
    }

    fn player(&self, id: &PlayerId) -> Result<&PlayerRecord, SessionError> {
        self.store
            .find_player(id)
            .ok_or_else(|| SessionError::UnknownPlayer(id.clone()))
    }

    /// Players matching the state's league and season.
    pub fn filtered(&self, state: &AppState) -> FilteredPlayerSet<'_> {
        calculate::filter_players(self.store.players(), &state.league, &state.season)
    }

    pub fn dashboard(&self, state: &AppState) -> DashboardView<'_> {
        calculate::dashboard(self.store.players(), &state.league, &state.season)
    }

    /// Percentile profile against same-position players in the current filter.
    pub fn profile(
        &self,
        state: &AppState,
        id: &PlayerId,
    ) -> Result<PercentileProfile, SessionError> {
        let player = self.player(id)?;
        Ok(calculate::percentile_profile(
            player,
            self.filtered(state).iter(),
        ))
    }

    pub fn scouting_card(&self, id: &PlayerId) -> Result<ScoutingCard, SessionError> {
        Ok(calculate::scouting_card(self.player(id)?))
    }

    /// Radar and head-to-head for the two comparison slots.
    pub fn comparison(
        &self,
        state: &AppState,
    ) -> Result<(RadarComparison, HeadToHead), SessionError> {
        let a = state
            .comparison(Side::A)
            .ok_or(SessionError::ComparisonIncomplete(Side::A))?;
        let b = state
            .comparison(Side::B)
            .ok_or(SessionError::ComparisonIncomplete(Side::B))?;
        let (a, b) = (self.player(a)?, self.player(b)?);

        Ok((
            calculate::radar_comparison(a, b, &self.maxima),
            calculate::head_to_head(a, b),
        ))
    }

    pub fn scatter(&self, state: &AppState, x: MetricKey, y: MetricKey) -> ScatterPlot {
        calculate::scatter(self.filtered(state).iter(), x, y)
    }

    /// Summary of the given match, or the first loaded one.
    pub fn match_summary(&self, id: Option<&MatchId>) -> Result<MatchSummary, SessionError> {
        let record = match id {
            Some(id) => self
                .store
                .find_match(id)
                .ok_or_else(|| SessionError::UnknownMatch(id.clone()))?,
            None => self.store.matches().first().ok_or(SessionError::NoMatches)?,
        };
        Ok(calculate::match_summary(record))
    }

    pub fn predictions(&self) -> Vec<PredictionView> {
        self.store
            .predictions()
            .iter()
            .map(calculate::prediction_view)
            .collect()
    }
}
