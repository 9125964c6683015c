//! Scouting Report Agent.
//!
//! Turns a single player-season into a narrative Markdown report. The agent
//! never retries; every failure collapses into one of three fixed messages.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::backend::{AiBackend, ChatMessage, ChatRequest};
use super::{Agent, AgentError};
use crate::models::PlayerRecord;

/// Shown when no API key is configured. No request is sent.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API Key missing. Please configure the environment.";

/// Shown when the service call fails for any reason.
pub const SERVICE_ERROR_MESSAGE: &str =
    "Error connecting to AI Scout service. Please check your API key.";

/// Shown when the service answers with no text.
pub const EMPTY_REPORT_MESSAGE: &str = "Could not generate report.";

/// Final result of a report request, always displayable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Ready(String),
    Failed(String),
}

impl ReportOutcome {
    pub fn text(&self) -> &str {
        match self {
            ReportOutcome::Ready(text) | ReportOutcome::Failed(text) => text,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ReportOutcome::Ready(_))
    }

    /// Fixed user-facing message for an agent error.
    pub fn from_error(error: &AgentError) -> Self {
        let message = match error {
            AgentError::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
            AgentError::EmptyResponse => EMPTY_REPORT_MESSAGE,
            _ => SERVICE_ERROR_MESSAGE,
        };
        ReportOutcome::Failed(message.to_string())
    }
}

/// Scouting report agent implementation.
pub struct ScoutReportAgent {
    backend: Arc<dyn AiBackend>,
    temperature: Option<f32>,
}

impl ScoutReportAgent {
    pub fn new(backend: Arc<dyn AiBackend>) -> Self {
        Self {
            backend,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    fn build_prompt(&self, player: &PlayerRecord) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SCOUT_SYSTEM_PROMPT),
            ChatMessage::user(player_brief(player)),
        ]
    }

    /// Run the agent and fold every error into a displayable outcome.
    pub async fn generate_report(&self, player: &PlayerRecord) -> ReportOutcome {
        match self.execute(player.clone()).await {
            Ok(text) => ReportOutcome::Ready(text),
            Err(AgentError::MissingCredential) => {
                info!("Scouting report skipped: no API key configured");
                ReportOutcome::from_error(&AgentError::MissingCredential)
            }
            Err(e) => {
                warn!("Scouting report for {} failed: {}", player.name, e);
                ReportOutcome::from_error(&e)
            }
        }
    }
}

/// Finishing signal: post-shot xG over pre-shot xG.
pub fn finishing_delta(player: &PlayerRecord) -> f64 {
    player.psxg - player.xg
}

fn player_brief(player: &PlayerRecord) -> String {
    let delta = finishing_delta(player);
    let finishing = if delta > 0.0 {
        format!("PSxG exceeds xG by {:.2}: shot placement adds value.", delta)
    } else {
        format!("PSxG - xG = {:.2}: no finishing premium.", delta)
    };

    format!(
        "Analyze the player: {name} ({position}, {team}, {age}yo, Season: {season}).\n\
         \n\
         DEEP METRICS PROVIDED:\n\
         - Attacking: Goals {goals} (xG {xg}, npxG {npxg}, PSxG {psxg}).\n\
         - Creation: Assists {assists} (xA {xa}), SCA {sca}, GCA {gca}.\n\
         - Possession: Prog Passes {pp}, Prog Carries {pc}, Prog Received {pr}.\n\
         - Box Presence: Touches in Box {box_touches}.\n\
         - Defense/Workrate: Pressures {pressures} (Regains {regains}), Tackles {tackles} (Win% {tackle_pct}), Int {interceptions}.\n\
         - Technique: Pass % {pass_pct}, Dribble % {dribble_pct}.\n\
         - Finishing: {finishing}",
        name = player.name,
        position = player.position,
        team = player.team,
        age = player.age,
        season = player.season,
        goals = player.goals,
        xg = player.xg,
        npxg = player.npxg,
        psxg = player.psxg,
        assists = player.assists,
        xa = player.xa,
        sca = player.sca,
        gca = player.gca,
        pp = player.progressive_passes,
        pc = player.progressive_carries,
        pr = player.progressive_received,
        box_touches = player.touches_att_pen,
        pressures = player.pressures,
        regains = player.pressure_regains,
        tackles = player.tackles,
        tackle_pct = player.tackles_won_pct,
        interceptions = player.interceptions,
        pass_pct = player.pass_completion_rate,
        dribble_pct = player.dribbles_completed_pct,
        finishing = finishing,
    )
}

const SCOUT_SYSTEM_PROMPT: &str = r#"Act as a world-class football scout with deep event-data expertise.

Provide a professional scouting report in Markdown with exactly these sections:
1. **Archetype Analysis**: Define the player's specific role (e.g. "Mezzala", "Target Man", "Inverted Wingback") using the metrics.
2. **Elite Traits**: What separates the player? (e.g. if PSxG > xG -> "Elite Finisher").
3. **Areas for Improvement**: Statistical weaknesses.
4. **Tactical Fit**: Best system/formation for the player.

Keep it analytical and concise. Use the data provided to justify every point."#;

#[async_trait]
impl Agent for ScoutReportAgent {
    type Input = PlayerRecord;
    type Output = String;

    fn name(&self) -> &'static str {
        "scout_report"
    }

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError> {
        if !self.backend.is_configured() {
            return Err(AgentError::MissingCredential);
        }

        info!(
            "Requesting scouting report for {} via {}",
            input.name,
            self.backend.name()
        );

        let request =
            ChatRequest::new(self.build_prompt(&input)).with_temperature(self.temperature);
        let response = self.backend.chat(request).await?;
        debug!("AI response from {}: {} chars", response.model, response.content.len());
        if let Some(usage) = &response.tokens_used {
            debug!(
                "Tokens used: {} prompt, {} completion, {} total",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        if response.content.trim().is_empty() {
            return Err(AgentError::EmptyResponse);
        }

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::backend::MockBackend;
    use crate::models::fixtures::player;
    use crate::models::Position;

    fn striker() -> PlayerRecord {
        let mut p = player("haaland", Position::Forward);
        p.name = "Erling Haaland".to_string();
        p.team = "Man City".to_string();
        p.age = 23;
        p.goals = 27.0;
        p.xg = 29.2;
        p.npxg = 22.9;
        p.psxg = 31.5;
        p
    }

    #[tokio::test]
    async fn test_unconfigured_sends_nothing() {
        let backend = Arc::new(MockBackend::unconfigured());
        let agent = ScoutReportAgent::new(backend.clone());

        let outcome = agent.generate_report(&striker()).await;

        assert_eq!(
            outcome,
            ReportOutcome::Failed(MISSING_CREDENTIAL_MESSAGE.to_string())
        );
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_report_ready() {
        let backend = Arc::new(MockBackend::new("## Archetype Analysis\nPoacher"));
        let agent = ScoutReportAgent::new(backend.clone());

        let outcome = agent.generate_report(&striker()).await;

        assert!(outcome.is_ready());
        assert!(outcome.text().contains("Poacher"));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_service_failure_message() {
        let backend = Arc::new(MockBackend::failing("403 Forbidden"));
        let agent = ScoutReportAgent::new(backend.clone());

        let outcome = agent.generate_report(&striker()).await;

        assert_eq!(outcome.text(), SERVICE_ERROR_MESSAGE);
        assert_eq!(backend.calls(), 1);
    }

    #[test]
    fn test_empty_text_message() {
        let agent = ScoutReportAgent::new(Arc::new(MockBackend::new("  \n ")));

        let outcome = tokio_test::block_on(agent.generate_report(&striker()));

        assert_eq!(
            outcome,
            ReportOutcome::Failed(EMPTY_REPORT_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_outcome_from_error() {
        assert_eq!(
            ReportOutcome::from_error(&AgentError::Timeout(120)).text(),
            SERVICE_ERROR_MESSAGE
        );
        assert_eq!(
            ReportOutcome::from_error(&AgentError::ResponseParseError("x".into())).text(),
            SERVICE_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_prompt_contents() {
        let agent = ScoutReportAgent::new(Arc::new(MockBackend::new("")));
        let messages = agent.build_prompt(&striker());

        assert_eq!(messages.len(), 2);
        for section in [
            "Archetype Analysis",
            "Elite Traits",
            "Areas for Improvement",
            "Tactical Fit",
        ] {
            assert!(messages[0].content.contains(section), "missing {}", section);
        }

        let brief = &messages[1].content;
        assert!(brief.contains("Erling Haaland (FW, Man City, 23yo, Season: 23/24)"));
        assert!(brief.contains("xG 29.2, npxG 22.9, PSxG 31.5"));
        assert!(brief.contains("PSxG exceeds xG by 2.30"));
    }

    #[test]
    fn test_prompt_without_finishing_premium() {
        let mut p = striker();
        p.psxg = 25.0;
        let brief = player_brief(&p);
        assert!(brief.contains("no finishing premium"));
        assert!(brief.contains("-4.20"));
    }
}
