//! The advisory agent layer: a per-agent asynchronous message queue
//! kernel, three specialized advisors (finance, strategy, leadership) and
//! the orchestrator that routes requests between them.

pub mod advisor;
pub mod error;
pub mod finance;
pub mod leadership;
pub mod mailbox;
pub mod orchestrator;
pub mod strategy;

pub use advisor::Advisor;
pub use error::AgentError;
pub use finance::{FinanceRequest, FinancialAdvisor};
pub use leadership::{LeadershipAdvisor, LeadershipRequest};
pub use mailbox::{spawn_advisor, AgentHandle};
pub use orchestrator::{AgentInfo, Orchestrator};
pub use strategy::{StrategyAdvisor, StrategyRequest};
