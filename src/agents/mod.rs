//! AI-powered agents.
//!
//! Agents turn structured records into prompts for a hosted text model and
//! interpret what comes back. All agents implement the `Agent` trait.

pub mod backend;
pub mod scout_report;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during agent execution.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("AI backend not configured: no API key")]
    MissingCredential,

    #[error("AI backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("AI response unparseable: {0}")]
    ResponseParseError(String),

    #[error("AI returned an empty response")]
    EmptyResponse,

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}

/// Core trait for all AI agents.
#[async_trait]
pub trait Agent {
    type Input;
    type Output;

    /// Agent identifier for logging.
    fn name(&self) -> &'static str;

    /// Execute the agent's task.
    async fn execute(&self, input: Self::Input) -> Result<Self::Output, AgentError>;
}
