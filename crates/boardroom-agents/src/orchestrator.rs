//! The orchestrator owns the advisor roster and routes requests to the
//! right mailbox by agent id.

use std::collections::HashMap;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use boardroom_finance::valuation::DecisionThresholds;
use boardroom_models::advisory::{AdvisoryRequest, AdvisoryResponse};
use boardroom_models::config::BoardroomConfig;

use crate::error::AgentError;
use crate::finance::FinancialAdvisor;
use crate::leadership::LeadershipAdvisor;
use crate::mailbox::{spawn_advisor, AgentHandle};
use crate::strategy::StrategyAdvisor;

/// One roster entry, for introspection.
#[derive(Debug, Clone)]
pub struct AgentInfo {
    pub id: String,
    pub name: String,
}

pub struct Orchestrator {
    agents: HashMap<String, AgentHandle>,
    order: Vec<String>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl Orchestrator {
    /// Build the roster from configuration. Disabled advisors are skipped;
    /// each advisor kind maps to its specialized implementation.
    pub fn from_config(config: &BoardroomConfig) -> Self {
        let cancel = CancellationToken::new();
        let mut agents = HashMap::new();
        let mut order = Vec::new();
        let mut tasks = Vec::new();
        let thresholds = DecisionThresholds {
            required_rate: config.agents.default_required_rate,
            max_payback_period: config.agents.default_max_payback_period,
        };

        for advisor in config.agents.advisors.iter().filter(|a| a.enabled) {
            let (handle, task) = match advisor.advisor_kind() {
                "finance" => {
                    spawn_advisor(
                        FinancialAdvisor::new(advisor.id.clone(), thresholds.clone()),
                        cancel.child_token(),
                    )
                }
                "strategy" => {
                    spawn_advisor(StrategyAdvisor::new(advisor.id.clone()), cancel.child_token())
                }
                "leadership" => spawn_advisor(
                    LeadershipAdvisor::new(advisor.id.clone()),
                    cancel.child_token(),
                ),
                other => {
                    tracing::warn!(kind = %other, id = %advisor.id, "Unknown advisor kind, skipping");
                    continue;
                }
            };
            order.push(handle.id().to_string());
            agents.insert(handle.id().to_string(), handle);
            tasks.push(task);
        }

        info!(agents = agents.len(), "Orchestrator started");
        Self {
            agents,
            order,
            cancel,
            tasks,
        }
    }

    fn agent(&self, agent_id: &str) -> Result<&AgentHandle, AgentError> {
        self.agents
            .get(agent_id)
            .ok_or_else(|| AgentError::UnknownAgent(agent_id.to_string()))
    }

    /// Route a request to an agent and await its response.
    pub async fn dispatch(
        &self,
        agent_id: &str,
        request: AdvisoryRequest,
    ) -> Result<AdvisoryResponse, AgentError> {
        self.agent(agent_id)?.ask(request).await
    }

    /// Fire-and-forget routing; the message is processed in queue order.
    pub fn notify(&self, agent_id: &str, request: AdvisoryRequest) -> Result<(), AgentError> {
        self.agent(agent_id)?.send(request)
    }

    pub fn handle(&self, agent_id: &str) -> Result<AgentHandle, AgentError> {
        self.agent(agent_id).cloned()
    }

    /// Roster in registration order.
    pub fn agents(&self) -> Vec<AgentInfo> {
        self.order
            .iter()
            .filter_map(|id| self.agents.get(id))
            .map(|handle| AgentInfo {
                id: handle.id().to_string(),
                name: handle.name().to_string(),
            })
            .collect()
    }

    /// Stop every mailbox after its in-flight message and wait for the
    /// drain tasks to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
        info!("Orchestrator stopped");
    }
}
