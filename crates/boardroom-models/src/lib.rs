pub mod advisory;
pub mod config;
pub mod finance;
pub mod knowledge;

pub use advisory::{AdvisoryContext, AdvisoryRequest, AdvisoryResponse};
pub use config::{AdvisorConfig, AgentsConfig, BoardroomConfig};
pub use finance::{
    BalanceSheet, CapitalStructure, CashFlowStatement, FinancialStatements, ForecastAssumptions,
    IncomeStatement, Investment, RatioBenchmarks, ValuationAssumptions,
};
pub use knowledge::KnowledgeBase;
