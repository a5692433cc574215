//! The financial advisory agent: ratio analysis, forecasting, capital
//! structure optimization and investment appraisal, all delegated to the
//! deterministic engine in `boardroom-finance`.

use std::str::FromStr;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use boardroom_finance::valuation::{self, DecisionThresholds};
use boardroom_finance::{capital, forecast, ratios};
use boardroom_models::advisory::{AdvisoryContext, AdvisoryRequest};
use boardroom_models::finance::{
    CapitalStructure, FinancialStatements, ForecastAssumptions, Investment, RatioBenchmarks,
    ValuationAssumptions,
};
use boardroom_models::knowledge::KnowledgeBase;

use crate::advisor::Advisor;
use crate::error::AgentError;

/// The closed set of request kinds this agent routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinanceRequest {
    AnalyzeFinancials,
    ForecastFinancials,
    OptimizeCapitalStructure,
    EvaluateInvestment,
}

impl FinanceRequest {
    pub const KINDS: &'static [&'static str] = &[
        "ANALYZE_FINANCIALS",
        "FORECAST_FINANCIALS",
        "OPTIMIZE_CAPITAL_STRUCTURE",
        "EVALUATE_INVESTMENT",
    ];
}

impl FromStr for FinanceRequest {
    type Err = AgentError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "ANALYZE_FINANCIALS" => Ok(Self::AnalyzeFinancials),
            "FORECAST_FINANCIALS" => Ok(Self::ForecastFinancials),
            "OPTIMIZE_CAPITAL_STRUCTURE" => Ok(Self::OptimizeCapitalStructure),
            "EVALUATE_INVESTMENT" => Ok(Self::EvaluateInvestment),
            other => Err(AgentError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzePayload {
    financial_statements: FinancialStatements,
    #[serde(default)]
    benchmarks: RatioBenchmarks,
}

fn default_forecast_period() -> u32 {
    5
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPayload {
    financial_statements: FinancialStatements,
    assumptions: ForecastAssumptions,
    #[serde(default = "default_forecast_period")]
    forecast_period: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizePayload {
    current_capital_structure: CapitalStructure,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluatePayload {
    investment: Investment,
    #[serde(default)]
    assumptions: Option<ValuationAssumptions>,
}

pub struct FinancialAdvisor {
    id: String,
    name: String,
    description: String,
    defaults: DecisionThresholds,
}

impl FinancialAdvisor {
    pub fn new(id: impl Into<String>, defaults: DecisionThresholds) -> Self {
        Self {
            id: id.into(),
            name: "Financial Advisory Agent".to_string(),
            description: "Specializes in financial analysis, forecasting, and investment advice"
                .to_string(),
            defaults,
        }
    }

    fn thresholds(&self, context: &AdvisoryContext) -> DecisionThresholds {
        DecisionThresholds {
            required_rate: context.required_rate.unwrap_or(self.defaults.required_rate),
            max_payback_period: context
                .max_payback_period
                .unwrap_or(self.defaults.max_payback_period),
        }
    }

    fn analyze_financials(
        &self,
        data: &Value,
        knowledge: &mut KnowledgeBase,
    ) -> Result<Value, AgentError> {
        let payload: AnalyzePayload = serde_json::from_value(data.clone())
            .map_err(|e| AgentError::invalid_payload("ANALYZE_FINANCIALS", e))?;

        let analysis = ratios::analyze(&payload.financial_statements, &payload.benchmarks);
        knowledge.merge(json!({ "lastAnalysis": { "ratios": analysis.ratios } }));
        Ok(serde_json::to_value(analysis)?)
    }

    fn forecast_financials(
        &self,
        data: &Value,
        knowledge: &mut KnowledgeBase,
    ) -> Result<Value, AgentError> {
        let payload: ForecastPayload = serde_json::from_value(data.clone())
            .map_err(|e| AgentError::invalid_payload("FORECAST_FINANCIALS", e))?;

        let forecast = forecast::forecast(
            &payload.financial_statements.income_statement,
            &payload.assumptions,
            payload.forecast_period,
        )?;
        knowledge.merge(json!({
            "lastForecast": {
                "forecastPeriod": forecast.forecast_period,
                "enterpriseValue": forecast.valuation.enterprise_value,
            }
        }));
        Ok(json!({ "forecast": forecast }))
    }

    fn optimize_capital_structure(
        &self,
        data: &Value,
        knowledge: &mut KnowledgeBase,
    ) -> Result<Value, AgentError> {
        let payload: OptimizePayload = serde_json::from_value(data.clone())
            .map_err(|e| AgentError::invalid_payload("OPTIMIZE_CAPITAL_STRUCTURE", e))?;

        let review = capital::review(&payload.current_capital_structure)?;
        knowledge.merge(json!({
            "lastCapitalReview": { "recommendation": review.recommendation.name }
        }));
        Ok(serde_json::to_value(review)?)
    }

    fn evaluate_investment(
        &self,
        data: &Value,
        context: &AdvisoryContext,
        knowledge: &mut KnowledgeBase,
    ) -> Result<Value, AgentError> {
        let payload: EvaluatePayload = serde_json::from_value(data.clone())
            .map_err(|e| AgentError::invalid_payload("EVALUATE_INVESTMENT", e))?;

        valuation::validate_investment(&payload.investment)?;
        let thresholds = self.thresholds(context);
        let discount_rate = payload
            .assumptions
            .map(|a| a.discount_rate)
            .unwrap_or(thresholds.required_rate);

        let flows = payload.investment.cash_flow_sequence();
        let npv = valuation::npv(&flows, discount_rate)?;
        let irr = valuation::irr(&flows)?;
        let payback = valuation::payback_period(&payload.investment);
        let sensitivity = valuation::sensitivity(&payload.investment, discount_rate)?;
        let recommendation = valuation::recommend(npv, irr, &payback, &thresholds);
        let risks = valuation::assess_risks();

        knowledge.merge(json!({
            "lastInvestmentEvaluation": { "npv": npv, "irr": irr }
        }));

        Ok(json!({
            "evaluation": {
                "npv": npv,
                "irr": irr,
                "paybackPeriod": payback,
                "sensitivityAnalysis": sensitivity,
                "riskAssessment": risks,
                "recommendation": recommendation,
            }
        }))
    }
}

#[async_trait]
impl Advisor for FinancialAdvisor {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn supported_kinds(&self) -> &'static [&'static str] {
        FinanceRequest::KINDS
    }

    async fn handle(
        &mut self,
        request: &AdvisoryRequest,
        knowledge: &mut KnowledgeBase,
    ) -> Result<Value, AgentError> {
        match FinanceRequest::from_str(&request.kind)? {
            FinanceRequest::AnalyzeFinancials => self.analyze_financials(&request.data, knowledge),
            FinanceRequest::ForecastFinancials => {
                self.forecast_financials(&request.data, knowledge)
            }
            FinanceRequest::OptimizeCapitalStructure => {
                self.optimize_capital_structure(&request.data, knowledge)
            }
            FinanceRequest::EvaluateInvestment => {
                self.evaluate_investment(&request.data, &request.context, knowledge)
            }
        }
    }
}
