//! Boardroom - a multi-agent business advisory engine.
//!
//! Specialized advisory agents (strategy, finance, leadership) each run
//! behind their own message queue and answer structured JSON requests with
//! deterministic analysis: financial ratios, investment appraisal, capital
//! structure optimization, strategic planning and leadership assessment.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use boardroom::agents::Orchestrator;
//! use boardroom::models::{AdvisoryRequest, BoardroomConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = boardroom::build_orchestrator(&BoardroomConfig::default());
//! let request = AdvisoryRequest::new("EVALUATE_TEAM_DYNAMICS", serde_json::json!({}));
//! let response = boardroom::advise(&orchestrator, "leadership", request).await?;
//! # Ok(())
//! # }
//! ```

pub use boardroom_agents as agents;
pub use boardroom_finance as finance;
pub use boardroom_models as models;

use boardroom_agents::{AgentError, Orchestrator};
use boardroom_models::advisory::{AdvisoryRequest, AdvisoryResponse};
use boardroom_models::config::BoardroomConfig;

/// Build an Orchestrator from configuration.
pub fn build_orchestrator(config: &BoardroomConfig) -> Orchestrator {
    Orchestrator::from_config(config)
}

/// Route one advisory request and await the structured response.
pub async fn advise(
    orchestrator: &Orchestrator,
    agent_id: &str,
    request: AdvisoryRequest,
) -> Result<AdvisoryResponse, AgentError> {
    orchestrator.dispatch(agent_id, request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn advise_through_the_facade() {
        let orchestrator = build_orchestrator(&BoardroomConfig::default());
        let response = advise(
            &orchestrator,
            "leadership",
            AdvisoryRequest::new("EVALUATE_TEAM_DYNAMICS", json!({})),
        )
        .await
        .unwrap();
        assert!(response.is_success());
        orchestrator.shutdown().await;
    }
}
