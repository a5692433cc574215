//! The strategic planning agent: strategy-goal alignment analysis, plan
//! generation and option evaluation.
//!
//! Narrative content (risks, opportunities, KPI templates) follows a fixed
//! catalog; everything quantitative is a deterministic function of the
//! request payload.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use boardroom_models::advisory::{AdvisoryContext, AdvisoryRequest};
use boardroom_models::knowledge::KnowledgeBase;

use crate::advisor::Advisor;
use crate::error::AgentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyRequest {
    AnalyzeStrategy,
    GenerateStrategicPlan,
    EvaluateStrategicOptions,
}

impl StrategyRequest {
    pub const KINDS: &'static [&'static str] = &[
        "ANALYZE_STRATEGY",
        "GENERATE_STRATEGIC_PLAN",
        "EVALUATE_STRATEGIC_OPTIONS",
    ];
}

impl FromStr for StrategyRequest {
    type Err = AgentError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "ANALYZE_STRATEGY" => Ok(Self::AnalyzeStrategy),
            "GENERATE_STRATEGIC_PLAN" => Ok(Self::GenerateStrategicPlan),
            "EVALUATE_STRATEGIC_OPTIONS" => Ok(Self::EvaluateStrategicOptions),
            other => Err(AgentError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StrategyProfile {
    #[serde(default)]
    focus_areas: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeStrategyPayload {
    #[serde(default)]
    current_strategy: StrategyProfile,
    business_goals: Vec<String>,
    #[serde(default)]
    timeframe: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanPayload {
    business_goals: Vec<String>,
    /// Planning horizon in months.
    #[serde(default = "default_timeframe")]
    timeframe: u32,
}

fn default_timeframe() -> u32 {
    12
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsPayload {
    options: Vec<StrategicOption>,
    evaluation_criteria: Vec<EvaluationCriterion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrategicOption {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Caller-supplied ratings per criterion name, on a 0-10 scale.
    #[serde(default)]
    pub ratings: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationCriterion {
    pub name: String,
    pub weight: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct StrategicGap {
    area: String,
    description: String,
}

pub struct StrategyAdvisor {
    id: String,
    name: String,
    description: String,
}

impl StrategyAdvisor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "Strategic Planning Agent".to_string(),
            description: "Specializes in long-term business strategy and planning".to_string(),
        }
    }

    /// A goal is covered when any focus area mentions it (or vice versa),
    /// compared case-insensitively.
    fn goal_covered(focus_areas: &[String], goal: &str) -> bool {
        let goal = goal.to_lowercase();
        focus_areas.iter().any(|area| {
            let area = area.to_lowercase();
            area.contains(&goal) || goal.contains(&area)
        })
    }

    fn analyze_strategy(
        &self,
        data: &Value,
        context: &AdvisoryContext,
        knowledge: &mut KnowledgeBase,
    ) -> Result<Value, AgentError> {
        let payload: AnalyzeStrategyPayload = serde_json::from_value(data.clone())
            .map_err(|e| AgentError::invalid_payload("ANALYZE_STRATEGY", e))?;

        let covered = payload
            .business_goals
            .iter()
            .filter(|goal| Self::goal_covered(&payload.current_strategy.focus_areas, goal))
            .count();
        // Fixed one-decimal scale so the score always reads like "62.5".
        let mut alignment_score = if payload.business_goals.is_empty() {
            Decimal::ZERO
        } else {
            (Decimal::from(covered) * Decimal::ONE_HUNDRED
                / Decimal::from(payload.business_goals.len()))
            .round_dp(1)
        };
        alignment_score.rescale(1);

        let strategic_gaps: Vec<StrategicGap> = payload
            .business_goals
            .iter()
            .filter(|goal| !Self::goal_covered(&payload.current_strategy.focus_areas, goal))
            .map(|goal| StrategicGap {
                area: goal.clone(),
                description: format!("Current strategy does not address the goal: {goal}"),
            })
            .collect();

        let industry = context.industry.as_deref().unwrap_or("your industry");
        let horizon = payload.timeframe.unwrap_or(12);
        let recommendations: Vec<Value> = strategic_gaps
            .iter()
            .map(|gap| {
                json!({
                    "area": gap.area,
                    "recommendation": format!(
                        "Define an initiative closing the {} gap, tailored to {industry}",
                        gap.area
                    ),
                    "timeframe": format!("{horizon} months"),
                })
            })
            .collect();

        knowledge.merge(json!({ "lastAlignmentScore": alignment_score }));

        Ok(json!({
            "alignmentScore": alignment_score,
            "strategicGaps": strategic_gaps,
            "recommendations": recommendations,
        }))
    }

    fn generate_plan(&self, data: &Value) -> Result<Value, AgentError> {
        let payload: PlanPayload = serde_json::from_value(data.clone())
            .map_err(|e| AgentError::invalid_payload("GENERATE_STRATEGIC_PLAN", e))?;

        let goal_count = payload.business_goals.len();
        let initiatives: Vec<Value> = payload
            .business_goals
            .iter()
            .enumerate()
            .map(|(index, goal)| {
                // Earlier goals rank higher; scores shrink toward a floor of 1.
                let rank = Decimal::from(10 - (index.min(9) as u32));
                json!({
                    "name": format!("Advance: {goal}"),
                    "description": format!(
                        "Initiative delivering the goal \"{goal}\" within {} months",
                        payload.timeframe
                    ),
                    "priority": rank,
                    "impact": rank,
                    "resourceRequirements": Decimal::from(5),
                })
            })
            .collect();

        let now = Utc::now();
        let span_days = i64::from(payload.timeframe) * 30;
        let timeline: Vec<Value> = initiatives
            .iter()
            .enumerate()
            .map(|(index, initiative)| {
                // Stagger starts evenly across the horizon.
                let offset = if goal_count > 1 {
                    span_days * index as i64 / (2 * (goal_count as i64 - 1).max(1))
                } else {
                    0
                };
                let start = now + Duration::days(offset);
                let end = now + Duration::days(span_days);
                json!({
                    "initiative": initiative["name"],
                    "startDate": start.date_naive(),
                    "endDate": end.date_naive(),
                    "milestones": [
                        { "name": "Planning complete", "date": (start + Duration::days(30)).date_naive() },
                        { "name": "Implementation 50% complete", "date": (start + Duration::days(90)).date_naive() },
                    ],
                })
            })
            .collect();

        let kpis: Vec<Value> = payload
            .business_goals
            .iter()
            .map(|goal| {
                json!({
                    "name": format!("Progress toward: {goal}"),
                    "target": format!("Goal achieved within {} months", payload.timeframe),
                    "measurementFrequency": "Quarterly",
                })
            })
            .collect();

        let roadmap = json!({
            "phases": [
                { "name": "Phase 1: Planning", "duration": "2 months",
                  "initiatives": initiatives.iter().take(2).collect::<Vec<_>>() },
                { "name": "Phase 2: Implementation", "duration": format!("{} months", payload.timeframe.saturating_sub(3).max(1)),
                  "initiatives": initiatives.iter().take(4).collect::<Vec<_>>() },
                { "name": "Phase 3: Evaluation", "duration": "1 month", "initiatives": [] },
            ],
            "dependencies": [
                { "from": "Planning complete", "to": "Implementation 50% complete" }
            ],
        });

        Ok(json!({
            "strategicPlan": {
                "initiatives": initiatives,
                "timeline": timeline,
                "kpis": kpis,
                "implementationRoadmap": roadmap,
            }
        }))
    }

    fn evaluate_options(&self, data: &Value) -> Result<Value, AgentError> {
        let payload: OptionsPayload = serde_json::from_value(data.clone())
            .map_err(|e| AgentError::invalid_payload("EVALUATE_STRATEGIC_OPTIONS", e))?;

        let mut evaluated: Vec<Value> = payload
            .options
            .iter()
            .map(|option| {
                let mut scores = Map::new();
                let mut total = Decimal::ZERO;
                for criterion in &payload.evaluation_criteria {
                    // Score = criterion weight x the caller's 0-10 rating;
                    // an unrated criterion scores zero.
                    let rating = option
                        .ratings
                        .get(&criterion.name)
                        .and_then(rating_as_decimal)
                        .unwrap_or(Decimal::ZERO);
                    let mut score = (criterion.weight * rating).round_dp(2);
                    score.rescale(2);
                    total += score;
                    scores.insert(criterion.name.clone(), json!(score));
                }
                total.rescale(2);
                json!({
                    "option": option,
                    "scores": scores,
                    "totalScore": total,
                    "risks": option_risks(),
                    "opportunities": option_opportunities(),
                })
            })
            .collect();

        // Highest total first; equal totals keep their submission order.
        evaluated.sort_by(|a, b| {
            let score = |v: &Value| {
                v["totalScore"]
                    .as_str()
                    .and_then(|s| s.parse::<Decimal>().ok())
                    .unwrap_or(Decimal::ZERO)
            };
            score(b).cmp(&score(a))
        });

        Ok(json!({ "evaluatedOptions": evaluated }))
    }
}

/// Ratings arrive as JSON numbers or as decimal strings.
fn rating_as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

fn option_risks() -> Value {
    json!([
        { "description": "Market resistance to new offering", "probability": "Medium", "impact": "High" },
        { "description": "Implementation delays", "probability": "High", "impact": "Medium" },
    ])
}

fn option_opportunities() -> Value {
    json!([
        { "description": "First-mover advantage in emerging market segment", "impact": "High" },
        { "description": "Potential for strategic partnerships", "impact": "Medium" },
    ])
}

#[async_trait]
impl Advisor for StrategyAdvisor {
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
        StrategyRequest::KINDS
    }

    async fn handle(
        &mut self,
        request: &AdvisoryRequest,
        knowledge: &mut KnowledgeBase,
    ) -> Result<Value, AgentError> {
        match StrategyRequest::from_str(&request.kind)? {
            StrategyRequest::AnalyzeStrategy => {
                self.analyze_strategy(&request.data, &request.context, knowledge)
            }
            StrategyRequest::GenerateStrategicPlan => self.generate_plan(&request.data),
            StrategyRequest::EvaluateStrategicOptions => self.evaluate_options(&request.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advisor() -> StrategyAdvisor {
        StrategyAdvisor::new("strategy-1")
    }

    #[tokio::test]
    async fn alignment_score_counts_covered_goals() {
        let mut advisor = advisor();
        let mut knowledge = KnowledgeBase::default();
        let data = json!({
            "currentStrategy": { "focusAreas": ["Market expansion in Europe", "Cost reduction"] },
            "businessGoals": ["Market expansion", "Digital transformation"],
        });
        let request = AdvisoryRequest::new("ANALYZE_STRATEGY", data);

        let body = advisor.handle(&request, &mut knowledge).await.unwrap();
        assert_eq!(body["alignmentScore"], json!("50.0"));

        let gaps = body["strategicGaps"].as_array().unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0]["area"], json!("Digital transformation"));
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_goals_score_zero_with_no_gaps() {
        let mut advisor = advisor();
        let mut knowledge = KnowledgeBase::default();
        let request = AdvisoryRequest::new(
            "ANALYZE_STRATEGY",
            json!({ "currentStrategy": {}, "businessGoals": [] }),
        );

        let body = advisor.handle(&request, &mut knowledge).await.unwrap();
        assert_eq!(body["alignmentScore"], json!("0.0"));
        assert!(body["strategicGaps"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn plan_builds_one_initiative_per_goal() {
        let mut advisor = advisor();
        let mut knowledge = KnowledgeBase::default();
        let data = json!({
            "businessGoals": ["Grow revenue", "Enter new markets", "Improve retention"],
            "timeframe": 18,
        });
        let request = AdvisoryRequest::new("GENERATE_STRATEGIC_PLAN", data);

        let body = advisor.handle(&request, &mut knowledge).await.unwrap();
        let plan = &body["strategicPlan"];
        assert_eq!(plan["initiatives"].as_array().unwrap().len(), 3);
        assert_eq!(plan["timeline"].as_array().unwrap().len(), 3);
        assert_eq!(plan["kpis"].as_array().unwrap().len(), 3);
        assert_eq!(
            plan["implementationRoadmap"]["phases"].as_array().unwrap().len(),
            3
        );
        // First goal carries the highest priority.
        assert_eq!(plan["initiatives"][0]["priority"], json!("10"));
        assert_eq!(plan["initiatives"][2]["priority"], json!("8"));
    }

    #[tokio::test]
    async fn options_are_scored_and_sorted_deterministically() {
        let mut advisor = advisor();
        let mut knowledge = KnowledgeBase::default();
        let data = json!({
            "options": [
                { "name": "Organic growth", "ratings": { "Cost": 8, "Speed": 3 } },
                { "name": "Acquisition", "ratings": { "Cost": 2, "Speed": 9 } },
            ],
            "evaluationCriteria": [
                { "name": "Cost", "weight": "0.6" },
                { "name": "Speed", "weight": "0.4" },
            ],
        });
        let request = AdvisoryRequest::new("EVALUATE_STRATEGIC_OPTIONS", data);

        let body = advisor.handle(&request, &mut knowledge).await.unwrap();
        let options = body["evaluatedOptions"].as_array().unwrap();
        // Organic: 0.6*8 + 0.4*3 = 6.0; Acquisition: 0.6*2 + 0.4*9 = 4.8.
        assert_eq!(options[0]["option"]["name"], json!("Organic growth"));
        assert_eq!(options[0]["totalScore"], json!("6.00"));
        assert_eq!(options[1]["totalScore"], json!("4.80"));
        assert!(options[0]["risks"].is_array());
    }

    #[tokio::test]
    async fn unrated_criterion_scores_zero() {
        let mut advisor = advisor();
        let mut knowledge = KnowledgeBase::default();
        let data = json!({
            "options": [{ "name": "Partial", "ratings": { "Cost": 5 } }],
            "evaluationCriteria": [
                { "name": "Cost", "weight": "1.0" },
                { "name": "Risk", "weight": "1.0" },
            ],
        });
        let request = AdvisoryRequest::new("EVALUATE_STRATEGIC_OPTIONS", data);

        let body = advisor.handle(&request, &mut knowledge).await.unwrap();
        let scores = &body["evaluatedOptions"][0]["scores"];
        assert_eq!(scores["Cost"], json!("5.00"));
        assert_eq!(scores["Risk"], json!("0.00"));
    }
}
