//! The leadership development agent: style assessment, development
//! planning, team dynamics evaluation and practice recommendations.
//!
//! These handlers are shape contracts: the assessment catalogs are fixed
//! content, while everything keyed off the payload (styles, challenges,
//! goals, timeframes) flows through deterministically.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{Datelike, Months, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use boardroom_models::advisory::AdvisoryRequest;
use boardroom_models::knowledge::KnowledgeBase;

use crate::advisor::Advisor;
use crate::error::AgentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadershipRequest {
    AssessLeadership,
    DevelopLeadershipPlan,
    EvaluateTeamDynamics,
    RecommendLeadershipPractices,
}

impl LeadershipRequest {
    pub const KINDS: &'static [&'static str] = &[
        "ASSESS_LEADERSHIP",
        "DEVELOP_LEADERSHIP_PLAN",
        "EVALUATE_TEAM_DYNAMICS",
        "RECOMMEND_LEADERSHIP_PRACTICES",
    ];
}

impl FromStr for LeadershipRequest {
    type Err = AgentError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "ASSESS_LEADERSHIP" => Ok(Self::AssessLeadership),
            "DEVELOP_LEADERSHIP_PLAN" => Ok(Self::DevelopLeadershipPlan),
            "EVALUATE_TEAM_DYNAMICS" => Ok(Self::EvaluateTeamDynamics),
            "RECOMMEND_LEADERSHIP_PRACTICES" => Ok(Self::RecommendLeadershipPractices),
            other => Err(AgentError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeadershipStyle {
    #[serde(default)]
    primary: Option<String>,
    #[serde(default)]
    secondary: Option<String>,
    #[serde(default)]
    decision_making: Option<String>,
    #[serde(default)]
    communication: Option<String>,
    #[serde(default)]
    conflict_management: Option<String>,
    #[serde(default)]
    change_management: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssessPayload {
    #[serde(default)]
    leadership_style: LeadershipStyle,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanPayload {
    /// Development horizon in months.
    #[serde(default = "default_plan_months")]
    timeframe: u32,
}

fn default_plan_months() -> u32 {
    12
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Challenge {
    description: String,
    #[serde(default)]
    r#type: Option<String>,
    #[serde(default)]
    complexity: Option<String>,
    #[serde(default)]
    urgency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BusinessContext {
    #[serde(default)]
    market_volatility: Option<String>,
    #[serde(default)]
    disruption_level: Option<String>,
    #[serde(default)]
    organization_structure: Option<String>,
    #[serde(default)]
    primary_strategy: Option<String>,
    #[serde(default)]
    secondary_strategy: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Goal {
    description: String,
    #[serde(default)]
    r#type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PracticesPayload {
    #[serde(default)]
    business_context: BusinessContext,
    #[serde(default)]
    leadership_challenges: Vec<Challenge>,
    #[serde(default)]
    organizational_goals: Vec<Goal>,
}

pub struct LeadershipAdvisor {
    id: String,
    name: String,
    description: String,
}

impl LeadershipAdvisor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "Leadership Development Agent".to_string(),
            description: "Specializes in leadership assessment and development".to_string(),
        }
    }

    fn assess_leadership(
        &self,
        data: &Value,
        knowledge: &mut KnowledgeBase,
    ) -> Result<Value, AgentError> {
        let payload: AssessPayload = serde_json::from_value(data.clone())
            .map_err(|e| AgentError::invalid_payload("ASSESS_LEADERSHIP", e))?;
        let style = &payload.leadership_style;

        let style_analysis = json!({
            "primaryStyle": style.primary,
            "secondaryStyle": style.secondary,
            "decisionMakingApproach": {
                "style": style.decision_making.as_deref().unwrap_or("Consultative"),
                "strengths": ["Incorporates diverse perspectives", "Builds team buy-in"],
                "limitations": ["May slow decision process", "Can create decision paralysis in crisis"],
            },
            "communicationStyle": {
                "style": style.communication.as_deref().unwrap_or("Direct"),
                "strengths": ["Clear expectations", "Efficient information sharing"],
                "limitations": ["May be perceived as abrupt", "Could limit open dialogue"],
            },
            "conflictManagementApproach": {
                "style": style.conflict_management.as_deref().unwrap_or("Collaborative"),
                "strengths": ["Seeks win-win solutions", "Addresses underlying issues"],
                "limitations": ["Time-intensive", "May not be effective in all situations"],
            },
            "changeManagementApproach": {
                "style": style.change_management.as_deref().unwrap_or("Transformational"),
                "strengths": ["Inspires commitment", "Creates compelling vision"],
                "limitations": ["May overlook operational details", "Can create change fatigue"],
            },
        });

        knowledge.merge(json!({ "lastAssessedStyle": style.primary }));

        Ok(json!({
            "styleAnalysis": style_analysis,
            "effectivenessAssessment": effectiveness_assessment(),
            "strengthsAndDevelopmentAreas": strengths_and_development_areas(),
            "recommendations": leadership_recommendations(),
        }))
    }

    fn develop_plan(&self, data: &Value) -> Result<Value, AgentError> {
        let payload: PlanPayload = serde_json::from_value(data.clone())
            .map_err(|e| AgentError::invalid_payload("DEVELOP_LEADERSHIP_PLAN", e))?;

        let objectives = development_objectives();
        let objective_areas: Vec<&str> = objectives
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|o| o["area"].as_str())
            .collect();

        let activities: Vec<Value> = objective_areas
            .iter()
            .map(|area| {
                json!({
                    "objective": area,
                    "activities": [
                        { "type": "Learning",
                          "description": format!("Executive education program on {area}"),
                          "timeCommitment": "2 days", "resources": "External training provider" },
                        { "type": "Experience",
                          "description": format!("Lead cross-functional project requiring {area} skills"),
                          "timeCommitment": "3 months (part-time)", "resources": "Project opportunity, executive sponsor" },
                        { "type": "Coaching",
                          "description": format!("One-on-one coaching focused on {area}"),
                          "timeCommitment": "1 hour biweekly for 6 months", "resources": "Executive coach" },
                        { "type": "Reflection",
                          "description": format!("Structured reflection journal on {area} practices and outcomes"),
                          "timeCommitment": "15 minutes daily", "resources": "Reflection template, development journal" },
                    ],
                })
            })
            .collect();

        // Objectives rotate through the months in order.
        let start = Utc::now().date_naive();
        let timeline: Vec<Value> = (1..=payload.timeframe)
            .map(|month| {
                let date = start + Months::new(month - 1);
                let group = &activities[((month - 1) as usize) % activities.len().max(1)];
                json!({
                    "month": month,
                    "date": format!("{:04}-{:02}-01", date.year(), date.month()),
                    "activities": group["activities"].as_array().into_iter().flatten()
                        .map(|a| json!({
                            "objective": group["objective"],
                            "activity": a["description"],
                        }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();

        let success_metrics: Vec<Value> = objective_areas
            .iter()
            .map(|area| {
                json!({
                    "objective": area,
                    "metrics": [
                        { "metric": format!("{area} assessment score"),
                          "baseline": "3/10", "target": "7/10",
                          "measurementMethod": "360-degree feedback assessment" },
                        { "metric": format!("{area} behavior demonstration"),
                          "baseline": "Inconsistent application",
                          "target": "Consistent application across multiple contexts",
                          "measurementMethod": "Manager observation and feedback" },
                        { "metric": format!("{area} business impact"),
                          "baseline": "Limited evidence of impact",
                          "target": "Clear evidence of positive business outcomes",
                          "measurementMethod": "Business performance metrics and case examples" },
                    ],
                })
            })
            .collect();

        Ok(json!({
            "developmentPlan": {
                "objectives": objectives,
                "activities": activities,
                "timeline": timeline,
                "successMetrics": success_metrics,
                "supportResources": support_resources(),
            }
        }))
    }

    fn evaluate_team_dynamics(&self) -> Value {
        json!({
            "compositionAnalysis": composition_analysis(),
            "interactionAssessment": interaction_assessment(),
            "performanceEvaluation": performance_evaluation(),
            "strengthsAndChallenges": team_strengths_and_challenges(),
            "recommendations": team_recommendations(),
        })
    }

    fn recommend_practices(&self, data: &Value) -> Result<Value, AgentError> {
        let payload: PracticesPayload = serde_json::from_value(data.clone())
            .map_err(|e| AgentError::invalid_payload("RECOMMEND_LEADERSHIP_PRACTICES", e))?;
        let context = &payload.business_context;

        let context_analysis = json!({
            "marketDynamics": {
                "volatility": context.market_volatility.as_deref().unwrap_or("High"),
                "disruptionLevel": context.disruption_level.as_deref().unwrap_or("Moderate"),
            },
            "organizationalFactors": {
                "structure": context.organization_structure.as_deref().unwrap_or("Matrix"),
            },
            "strategicPriorities": {
                "primary": context.primary_strategy.as_deref().unwrap_or("Market expansion"),
                "secondary": context.secondary_strategy.as_deref().unwrap_or("Operational excellence"),
            },
        });

        let challenge_assessment: Vec<Value> = payload
            .leadership_challenges
            .iter()
            .map(|challenge| {
                json!({
                    "challenge": challenge.description,
                    "type": challenge.r#type.as_deref().unwrap_or("Operational"),
                    "complexity": challenge.complexity.as_deref().unwrap_or("Moderate"),
                    "urgency": challenge.urgency.as_deref().unwrap_or("Medium"),
                })
            })
            .collect();

        let practices = relevant_practices(&context_analysis, &payload);
        let prioritized: Vec<Value> = practices
            .into_iter()
            .enumerate()
            .map(|(index, mut practice)| {
                let priority = if index < 3 {
                    "High"
                } else if index < 5 {
                    "Medium"
                } else {
                    "Low"
                };
                if let Some(map) = practice.as_object_mut() {
                    map.insert("priority".to_string(), json!(priority));
                    map.insert(
                        "potentialImpact".to_string(),
                        json!({
                            "businessPerformance": "High",
                            "teamEffectiveness": "High",
                            "leadershipEffectiveness": "High",
                        }),
                    );
                    map.insert("implementationComplexity".to_string(), json!("Medium"));
                    map.insert("timeToImpact".to_string(), json!("Medium-term"));
                }
                practice
            })
            .collect();

        let guidance: Vec<Value> = prioritized
            .iter()
            .take(3)
            .map(|practice| {
                json!({
                    "practice": practice["practice"],
                    "steps": [
                        "Assess current behaviors against the practice",
                        "Select two concrete situations to apply it this quarter",
                        "Review outcomes with a coach or peer group",
                    ],
                })
            })
            .collect();

        Ok(json!({
            "contextAnalysis": context_analysis,
            "challengeAssessment": challenge_assessment,
            "prioritizedPractices": prioritized,
            "implementationGuidance": guidance,
        }))
    }
}

/// Practice selection rules keyed off the analyzed context, challenges and
/// goals. Order determines priority downstream.
fn relevant_practices(context_analysis: &Value, payload: &PracticesPayload) -> Vec<Value> {
    let mut practices = Vec::new();

    if context_analysis["marketDynamics"]["volatility"] == json!("High") {
        practices.push(json!({
            "practice": "Adaptive Leadership",
            "relevance": "High volatility requires flexible leadership approach that can adjust to changing conditions",
            "description": "Leadership approach that helps organizations adapt to changing environments and effectively respond to recurring problems",
        }));
    }
    if context_analysis["marketDynamics"]["disruptionLevel"] == json!("High") {
        practices.push(json!({
            "practice": "Transformational Leadership",
            "relevance": "Disruptive environment requires inspiring vision and change orientation",
            "description": "Leadership approach focused on inspiring and motivating teams through a compelling vision and intellectual stimulation",
        }));
    }
    if context_analysis["organizationalFactors"]["structure"] == json!("Matrix") {
        practices.push(json!({
            "practice": "Influence Without Authority",
            "relevance": "Matrix structure requires ability to lead through influence rather than positional authority",
            "description": "Leadership approach focused on building coalitions, leveraging networks, and creating mutual benefit",
        }));
    }
    if context_analysis["strategicPriorities"]["primary"] == json!("Market expansion") {
        practices.push(json!({
            "practice": "Strategic Leadership",
            "relevance": "Market expansion requires clear strategic direction and execution",
            "description": "Leadership approach focused on setting direction, aligning resources, and enabling organizational success",
        }));
    }
    if context_analysis["strategicPriorities"]["secondary"] == json!("Operational excellence") {
        practices.push(json!({
            "practice": "Operational Leadership",
            "relevance": "Operational excellence requires focus on process optimization and performance management",
            "description": "Leadership approach focused on efficiency, quality, and continuous improvement",
        }));
    }

    let change_related = payload.leadership_challenges.iter().any(|c| {
        matches!(c.r#type.as_deref(), Some("Change") | Some("Transformation"))
    });
    if change_related {
        practices.push(json!({
            "practice": "Change Leadership",
            "relevance": "Multiple change-related challenges require structured change management approach",
            "description": "Leadership approach focused on planning, implementing, and sustaining organizational change",
        }));
    }

    let people_related = payload
        .leadership_challenges
        .iter()
        .any(|c| matches!(c.r#type.as_deref(), Some("People") | Some("Team")));
    if people_related {
        practices.push(json!({
            "practice": "Coaching Leadership",
            "relevance": "People-related challenges require developmental leadership approach",
            "description": "Leadership approach focused on developing capabilities and performance through questioning and feedback",
        }));
    }

    let innovation_goals = payload.organizational_goals.iter().any(|g| {
        g.r#type.as_deref() == Some("Innovation")
            || g.description.to_lowercase().contains("innovat")
    });
    if innovation_goals {
        practices.push(json!({
            "practice": "Innovation Leadership",
            "relevance": "Innovation goals require leadership that fosters creativity and calculated risk-taking",
            "description": "Leadership approach focused on creating conditions for innovation and managing the innovation process",
        }));
    }

    practices
}

fn effectiveness_assessment() -> Value {
    json!({
        "overallEffectiveness": "Moderate",
        "contextualFit": {
            "rating": "Moderate",
            "analysis": "Leadership style partially aligns with team needs and business challenges",
        },
        "teamImpact": {
            "engagement": { "rating": "High", "evidence": "Strong commitment and motivation observed" },
            "productivity": { "rating": "Moderate", "evidence": "Team consistently meets but rarely exceeds targets" },
            "development": { "rating": "Moderate", "evidence": "Some team members advancing, others stagnating" },
        },
        "businessImpact": {
            "strategicAlignment": { "rating": "Moderate", "evidence": "Team initiatives partially aligned with strategic priorities" },
            "changeAdaptability": { "rating": "High", "evidence": "Successfully navigated recent market disruption" },
            "innovationSupport": { "rating": "Low", "evidence": "Few new initiatives or innovations in past year" },
        },
    })
}

fn strengths_and_development_areas() -> Value {
    json!({
        "strengths": [
            { "area": "Team Engagement",
              "description": "Effectively builds team commitment and motivation",
              "impact": "High team retention and satisfaction scores" },
            { "area": "Change Leadership",
              "description": "Successfully guides team through organizational changes",
              "impact": "Minimal disruption during recent restructuring" },
            { "area": "Relationship Building",
              "description": "Develops strong working relationships across organization",
              "impact": "Effective cross-functional collaboration" },
        ],
        "developmentAreas": [
            { "area": "Strategic Decision Making",
              "description": "Tendency to focus on short-term over long-term considerations",
              "impact": "Missed opportunities for strategic positioning" },
            { "area": "Performance Management",
              "description": "Inconsistent in addressing performance issues",
              "impact": "Performance gaps persist in some team areas" },
            { "area": "Innovation Leadership",
              "description": "Limited encouragement of creative thinking and experimentation",
              "impact": "Few innovative initiatives from team" },
        ],
    })
}

fn leadership_recommendations() -> Value {
    json!([
        { "area": "Strategic Decision Making",
          "recommendation": "Implement structured decision-making framework that balances short and long-term considerations",
          "expectedOutcome": "More balanced decisions that support both immediate needs and strategic objectives" },
        { "area": "Performance Management",
          "recommendation": "Establish consistent performance feedback and accountability system",
          "expectedOutcome": "Improved team performance and faster resolution of performance issues" },
        { "area": "Innovation Leadership",
          "recommendation": "Create structured innovation process and supportive environment",
          "expectedOutcome": "Increased innovative initiatives and creative problem-solving" },
    ])
}

fn development_objectives() -> Value {
    json!([
        { "area": "Strategic Thinking",
          "currentState": "Primarily focused on operational execution with limited strategic perspective",
          "targetState": "Balances operational excellence with strategic foresight and planning" },
        { "area": "Coaching Capability",
          "currentState": "Provides direction but limited developmental coaching to team members",
          "targetState": "Regularly coaches team members to develop capabilities and improve performance" },
        { "area": "Change Leadership",
          "currentState": "Implements changes but struggles with resistance and sustainability",
          "targetState": "Effectively leads change initiatives with high adoption and minimal resistance" },
    ])
}

fn support_resources() -> Value {
    json!({
        "people": [
            { "role": "Executive Coach", "contribution": "One-on-one coaching and feedback" },
            { "role": "Manager", "contribution": "Regular feedback and development discussions" },
            { "role": "Mentor", "contribution": "Guidance and perspective from experienced leader" },
        ],
        "tools": [
            { "name": "Leadership Journal", "purpose": "Structured reflection on leadership experiences" },
            { "name": "Development Plan Template", "purpose": "Tracking progress against development objectives" },
            { "name": "360-Degree Feedback Tool", "purpose": "Gathering comprehensive feedback on leadership behaviors" },
        ],
    })
}

fn composition_analysis() -> Value {
    json!({
        "diversityAssessment": {
            "cognitive": { "level": "Moderate", "gaps": ["Limited systems thinking capability"] },
            "experiential": { "level": "High", "gaps": ["Limited startup or entrepreneurial experience"] },
        },
        "skillsAssessment": {
            "technical": { "level": "High", "gaps": ["Limited emerging technology knowledge"] },
            "leadership": { "level": "Moderate", "gaps": ["Few strategic leadership capabilities"] },
            "interpersonal": { "level": "Moderate", "gaps": ["Limited conflict resolution capability"] },
        },
        "roleClarity": {
            "level": "Moderate",
            "gaps": ["Overlapping decision rights", "Unclear accountability in cross-functional work"],
        },
    })
}

fn interaction_assessment() -> Value {
    json!({
        "communicationPatterns": {
            "openness": { "rating": "Moderate" },
            "frequency": { "rating": "High" },
            "effectiveness": { "rating": "Moderate" },
        },
        "decisionMakingProcess": {
            "clarity": { "rating": "Low" },
            "participation": { "rating": "Moderate" },
        },
        "conflictManagement": {
            "approach": { "rating": "Low" },
            "resolution": { "rating": "Low" },
        },
        "trustLevel": {
            "competence": { "rating": "High" },
            "character": { "rating": "Moderate" },
            "reliability": { "rating": "Moderate" },
        },
    })
}

fn performance_evaluation() -> Value {
    json!({
        "resultsAchievement": { "rating": "Moderate" },
        "processEffectiveness": { "rating": "Moderate" },
        "adaptability": { "rating": "Low" },
        "innovation": { "rating": "Low" },
        "teamHealth": {
            "engagement": { "rating": "Moderate" },
            "satisfaction": { "rating": "Moderate" },
            "development": { "rating": "Low" },
        },
    })
}

fn team_strengths_and_challenges() -> Value {
    json!({
        "strengths": [
            { "area": "Technical Expertise",
              "description": "Strong domain knowledge and technical capabilities",
              "impact": "Enables effective problem-solving and quality deliverables" },
            { "area": "Communication Frequency",
              "description": "Regular and active communication channels",
              "impact": "Facilitates information sharing and coordination" },
        ],
        "challenges": [
            { "area": "Decision Making Process",
              "description": "Unclear decision rights and inconsistent processes",
              "impact": "Causes delays, revisiting of decisions, and frustration" },
            { "area": "Conflict Management",
              "description": "Avoidance of constructive conflict and difficult conversations",
              "impact": "Limits innovation and allows problems to persist unresolved" },
            { "area": "Adaptability",
              "description": "Slow response to changes and resistance to new approaches",
              "impact": "Reduces competitiveness and ability to seize opportunities" },
        ],
    })
}

fn team_recommendations() -> Value {
    json!([
        { "area": "Decision Making",
          "recommendation": "Implement RACI framework for key decision areas and establish consistent decision processes",
          "expectedOutcome": "Clearer accountability, faster decisions, and reduced confusion" },
        { "area": "Constructive Conflict",
          "recommendation": "Build team capability in productive disagreement and establish norms for healthy debate",
          "expectedOutcome": "More innovative solutions and thorough evaluation of alternatives" },
        { "area": "Adaptability",
          "recommendation": "Create change readiness through regular environmental scanning and scenario planning",
          "expectedOutcome": "Faster response to market changes and more proactive adaptation" },
    ])
}

#[async_trait]
impl Advisor for LeadershipAdvisor {
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
        LeadershipRequest::KINDS
    }

    async fn handle(
        &mut self,
        request: &AdvisoryRequest,
        knowledge: &mut KnowledgeBase,
    ) -> Result<Value, AgentError> {
        match LeadershipRequest::from_str(&request.kind)? {
            LeadershipRequest::AssessLeadership => {
                self.assess_leadership(&request.data, knowledge)
            }
            LeadershipRequest::DevelopLeadershipPlan => self.develop_plan(&request.data),
            LeadershipRequest::EvaluateTeamDynamics => Ok(self.evaluate_team_dynamics()),
            LeadershipRequest::RecommendLeadershipPractices => {
                self.recommend_practices(&request.data)
            }
        }
    }
}
