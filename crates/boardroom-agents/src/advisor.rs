use async_trait::async_trait;
use serde_json::Value;

use boardroom_models::advisory::AdvisoryRequest;
use boardroom_models::knowledge::KnowledgeBase;

use crate::error::AgentError;

/// A specialized advisor: a pure dispatch over its closed set of request
/// kinds. Mockable for testing the mailbox and orchestrator.
///
/// Handlers receive mutable access to the agent's knowledge base so they
/// can accumulate context across messages. They must not send to their own
/// mailbox; replies flow only through the caller's channel.
#[async_trait]
pub trait Advisor: Send + 'static {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// The wire tags this advisor understands, for roster introspection.
    fn supported_kinds(&self) -> &'static [&'static str];

    /// Handle one request. `Err(AgentError::UnknownKind)` is the routing
    /// miss; any other error is a handler failure. Both are converted to
    /// structured error responses at the mailbox boundary.
    async fn handle(
        &mut self,
        request: &AdvisoryRequest,
        knowledge: &mut KnowledgeBase,
    ) -> Result<Value, AgentError>;
}
