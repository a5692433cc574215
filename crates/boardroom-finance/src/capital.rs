//! WACC, capital-structure analysis, alternative generation and scoring.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boardroom_models::finance::CapitalStructure;

use crate::error::FinanceError;
use crate::valuation::RiskLevel;

/// Weighted average cost of capital with the debt shield:
/// `E/(D+E) * costOfEquity + D/(D+E) * costOfDebt * (1 - taxRate)`.
pub fn wacc(structure: &CapitalStructure) -> Result<Decimal, FinanceError> {
    let capital = structure.total_debt + structure.total_equity;
    if capital.is_zero() {
        return Err(FinanceError::ZeroCapitalBase);
    }
    let equity_weight = structure.total_equity / capital;
    let debt_weight = structure.total_debt / capital;
    Ok(equity_weight * structure.cost_of_equity
        + debt_weight * structure.cost_of_debt * (Decimal::ONE - structure.tax_rate))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapitalStructureAnalysis {
    pub debt_to_equity: Decimal,
    pub debt_to_assets: Decimal,
    pub weighted_average_cost_of_capital: Decimal,
    /// EBIT over interest expense; omitted when there is no interest burden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_coverage: Option<Decimal>,
    pub financial_leverage: Decimal,
}

pub fn analyze(structure: &CapitalStructure) -> Result<CapitalStructureAnalysis, FinanceError> {
    if structure.total_equity.is_zero() {
        return Err(FinanceError::ZeroEquity);
    }
    let capital = structure.total_debt + structure.total_equity;
    Ok(CapitalStructureAnalysis {
        debt_to_equity: structure.total_debt / structure.total_equity,
        debt_to_assets: structure.total_debt / capital,
        weighted_average_cost_of_capital: wacc(structure)?,
        interest_coverage: if structure.interest_expense.is_zero() {
            None
        } else {
            Some(structure.ebit / structure.interest_expense)
        },
        financial_leverage: capital / structure.total_equity,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapitalAlternative {
    pub name: String,
    pub description: String,
    pub structure: CapitalStructure,
}

/// The fixed set of named alternatives, each derived from the current
/// structure by fixed multipliers.
pub fn alternatives(current: &CapitalStructure) -> Vec<CapitalAlternative> {
    vec![
        CapitalAlternative {
            name: "Debt Reduction".to_string(),
            description: "Reduce debt levels to improve financial stability".to_string(),
            structure: CapitalStructure {
                total_debt: current.total_debt * Decimal::new(8, 1),
                total_equity: current.total_equity * Decimal::new(11, 1),
                cost_of_debt: current.cost_of_debt * Decimal::new(95, 2),
                cost_of_equity: current.cost_of_equity,
                tax_rate: current.tax_rate,
                ebit: current.ebit,
                interest_expense: current.interest_expense * Decimal::new(8, 1),
            },
        },
        CapitalAlternative {
            name: "Optimal Leverage".to_string(),
            description: "Adjust debt and equity to minimize WACC".to_string(),
            structure: CapitalStructure {
                total_debt: current.total_debt * Decimal::new(11, 1),
                total_equity: current.total_equity,
                cost_of_debt: current.cost_of_debt * Decimal::new(105, 2),
                cost_of_equity: current.cost_of_equity * Decimal::new(98, 2),
                tax_rate: current.tax_rate,
                ebit: current.ebit,
                interest_expense: current.interest_expense * Decimal::new(11, 1),
            },
        },
        CapitalAlternative {
            name: "Equity Focused".to_string(),
            description: "Shift toward equity financing to reduce financial risk".to_string(),
            structure: CapitalStructure {
                total_debt: current.total_debt * Decimal::new(7, 1),
                total_equity: current.total_equity * Decimal::new(12, 1),
                cost_of_debt: current.cost_of_debt * Decimal::new(9, 1),
                cost_of_equity: current.cost_of_equity * Decimal::new(102, 2),
                tax_rate: current.tax_rate,
                ebit: current.ebit,
                interest_expense: current.interest_expense * Decimal::new(7, 1),
            },
        },
    ]
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlignmentLevel {
    High,
    Medium,
    Low,
}

impl AlignmentLevel {
    fn from_score(score: Decimal) -> Self {
        if score >= Decimal::from(7) {
            Self::High
        } else if score >= Decimal::from(4) {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalScore {
    pub goal: String,
    pub alignment: AlignmentLevel,
    pub score: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalAlignment {
    pub overall_score: Decimal,
    pub details: Vec<GoalScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessment {
    pub description: String,
    pub score: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialImpact {
    pub profitability_impact: ImpactAssessment,
    pub liquidity_impact: ImpactAssessment,
    pub valuation_impact: ImpactAssessment,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeasibilityLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feasibility {
    pub overall_feasibility: FeasibilityLevel,
    pub timeframe: String,
    pub challenges: Vec<String>,
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructureRisk {
    #[serde(rename = "type")]
    pub risk_type: String,
    pub description: String,
    pub severity: RiskLevel,
    pub mitigation_strategies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedAlternative {
    pub name: String,
    pub description: String,
    pub structure: CapitalStructure,
    pub analysis: CapitalStructureAnalysis,
    pub goal_alignment: GoalAlignment,
    pub financial_impact: FinancialImpact,
    pub implementation_feasibility: Feasibility,
    pub risks: Vec<StructureRisk>,
    /// The ranking key: goal-alignment overall score.
    pub composite_score: Decimal,
}

fn clamp_score(score: Decimal) -> Decimal {
    score
        .max(Decimal::ZERO)
        .min(Decimal::from(10))
        .round_dp(1)
}

/// Score every alternative against the current structure. All scores are
/// deterministic functions of the structural deltas, on a 0-10 scale.
pub fn evaluate(
    current: &CapitalStructure,
    candidates: Vec<CapitalAlternative>,
) -> Result<Vec<EvaluatedAlternative>, FinanceError> {
    let base = analyze(current)?;
    let midpoint = Decimal::from(5);

    candidates
        .into_iter()
        .map(|candidate| {
            let analysis = analyze(&candidate.structure)?;

            let leverage_delta = base.debt_to_equity - analysis.debt_to_equity;
            let risk_score = clamp_score(midpoint + leverage_delta * Decimal::from(10));

            let wacc_delta = base.weighted_average_cost_of_capital
                - analysis.weighted_average_cost_of_capital;
            let cost_score = clamp_score(midpoint + wacc_delta * Decimal::from(200));

            let growth_score = match (base.interest_coverage, analysis.interest_coverage) {
                (Some(before), Some(after)) => {
                    clamp_score(midpoint + (after - before) * Decimal::new(5, 1))
                }
                _ => midpoint,
            };

            let overall_score =
                ((risk_score + cost_score + growth_score) / Decimal::from(3)).round_dp(2);

            let goal_alignment = GoalAlignment {
                overall_score,
                details: vec![
                    GoalScore {
                        goal: "Reduce financial risk".to_string(),
                        alignment: AlignmentLevel::from_score(risk_score),
                        score: risk_score,
                    },
                    GoalScore {
                        goal: "Minimize cost of capital".to_string(),
                        alignment: AlignmentLevel::from_score(cost_score),
                        score: cost_score,
                    },
                    GoalScore {
                        goal: "Support growth initiatives".to_string(),
                        alignment: AlignmentLevel::from_score(growth_score),
                        score: growth_score,
                    },
                ],
            };

            let interest_falls =
                candidate.structure.interest_expense < current.interest_expense;
            let financial_impact = FinancialImpact {
                profitability_impact: ImpactAssessment {
                    description: if interest_falls {
                        "Improvement in profitability due to lower interest expenses".to_string()
                    } else {
                        "Higher interest expenses weigh on profitability".to_string()
                    },
                    score: cost_score,
                },
                liquidity_impact: ImpactAssessment {
                    description: if interest_falls {
                        "Improved liquidity position due to lower debt service requirements"
                            .to_string()
                    } else {
                        "Increased debt service requirements reduce liquidity headroom"
                            .to_string()
                    },
                    score: risk_score,
                },
                valuation_impact: ImpactAssessment {
                    description: if leverage_delta > Decimal::ZERO {
                        "Potential for higher valuation multiples due to lower financial risk"
                            .to_string()
                    } else {
                        "Valuation multiples constrained by elevated financial risk".to_string()
                    },
                    score: overall_score,
                },
            };

            let implementation_feasibility =
                feasibility(current.total_debt, candidate.structure.total_debt);
            let risks = structure_risks(current, &candidate.structure);

            Ok(EvaluatedAlternative {
                name: candidate.name,
                description: candidate.description,
                structure: candidate.structure,
                analysis,
                goal_alignment,
                financial_impact,
                implementation_feasibility,
                risks,
                composite_score: overall_score,
            })
        })
        .collect()
}

/// Feasibility is driven by how far total debt has to move.
fn feasibility(current_debt: Decimal, target_debt: Decimal) -> Feasibility {
    let relative_change = if current_debt.is_zero() {
        Decimal::ONE
    } else {
        ((target_debt - current_debt) / current_debt).abs()
    };

    let (overall, timeframe) = if relative_change <= Decimal::new(10, 2) {
        (FeasibilityLevel::High, "6-12 months")
    } else if relative_change <= Decimal::new(25, 2) {
        (FeasibilityLevel::Medium, "12-18 months")
    } else {
        (FeasibilityLevel::Low, "18-24 months")
    };

    Feasibility {
        overall_feasibility: overall,
        timeframe: timeframe.to_string(),
        challenges: vec![
            "Requires significant cash flow allocation to debt reduction".to_string(),
            "May limit near-term growth investments".to_string(),
        ],
        requirements: vec![
            "Consistent operating cash flow generation".to_string(),
            "Supportive debt markets for refinancing".to_string(),
        ],
    }
}

fn structure_risks(
    current: &CapitalStructure,
    target: &CapitalStructure,
) -> Vec<StructureRisk> {
    let rate_severity = if target.total_debt > current.total_debt {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    };

    vec![
        StructureRisk {
            risk_type: "Interest Rate Risk".to_string(),
            description: "Vulnerability to rising interest rates on variable rate debt"
                .to_string(),
            severity: rate_severity,
            mitigation_strategies: vec![
                "Convert portion of variable rate debt to fixed rate".to_string(),
                "Implement interest rate hedging strategy".to_string(),
            ],
        },
        StructureRisk {
            risk_type: "Refinancing Risk".to_string(),
            description: "Risk of unfavorable terms when refinancing debt".to_string(),
            severity: RiskLevel::Low,
            mitigation_strategies: vec![
                "Stagger debt maturities".to_string(),
                "Maintain strong banking relationships".to_string(),
            ],
        },
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapitalRecommendation {
    pub name: String,
    pub structure: CapitalStructure,
    pub rationale: Vec<String>,
    pub expected_benefits: Vec<String>,
}

/// Pick the winning alternative: highest composite score, ties broken by
/// the lowest WACC.
pub fn recommend(
    evaluated: &[EvaluatedAlternative],
) -> Result<CapitalRecommendation, FinanceError> {
    let best = evaluated
        .iter()
        .reduce(|best, candidate| {
            if candidate.composite_score > best.composite_score
                || (candidate.composite_score == best.composite_score
                    && candidate.analysis.weighted_average_cost_of_capital
                        < best.analysis.weighted_average_cost_of_capital)
            {
                candidate
            } else {
                best
            }
        })
        .ok_or(FinanceError::NoAlternatives)?;

    Ok(CapitalRecommendation {
        name: best.name.clone(),
        structure: best.structure.clone(),
        rationale: vec![
            format!(
                "{} scores highest against the stated goals ({})",
                best.name, best.composite_score
            ),
            "Improves financial flexibility while maintaining tax benefits of debt".to_string(),
            "Most feasible implementation path given current market conditions".to_string(),
        ],
        expected_benefits: vec![
            "Reduced financial risk profile".to_string(),
            "Lower weighted average cost of capital".to_string(),
            "Improved debt service coverage ratios".to_string(),
        ],
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanPhase {
    pub name: String,
    pub duration: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    pub timeline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contingency {
    pub trigger: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationPlan {
    pub phases: Vec<PlanPhase>,
    pub milestones: Vec<Milestone>,
    pub contingencies: Vec<Contingency>,
}

/// Phased transition plan toward the target structure.
pub fn implementation_plan(target: &CapitalStructure) -> ImplementationPlan {
    let target_leverage = if target.total_equity.is_zero() {
        None
    } else {
        Some((target.total_debt / target.total_equity).round_dp(2))
    };

    let mut milestones = Vec::new();
    if let Some(leverage) = target_leverage {
        milestones.push(Milestone {
            name: format!("Reach a debt-to-equity ratio of {leverage}"),
            timeline: "6 months".to_string(),
        });
    }
    milestones.push(Milestone {
        name: "Complete refinancing of high-interest debt".to_string(),
        timeline: "9 months".to_string(),
    });
    milestones.push(Milestone {
        name: "Achieve target capital structure".to_string(),
        timeline: "24 months".to_string(),
    });

    ImplementationPlan {
        phases: vec![
            PlanPhase {
                name: "Phase 1: Initial Debt Reduction".to_string(),
                duration: "6 months".to_string(),
                actions: vec![
                    "Allocate 70% of free cash flow to debt repayment".to_string(),
                    "Refinance high-interest debt".to_string(),
                ],
            },
            PlanPhase {
                name: "Phase 2: Capital Structure Optimization".to_string(),
                duration: "12 months".to_string(),
                actions: vec![
                    "Issue new equity if market conditions favorable".to_string(),
                    "Continue debt reduction at moderate pace".to_string(),
                    "Renegotiate debt covenants".to_string(),
                ],
            },
            PlanPhase {
                name: "Phase 3: Stabilization".to_string(),
                duration: "6 months".to_string(),
                actions: vec![
                    "Establish new debt policy".to_string(),
                    "Implement ongoing capital structure monitoring".to_string(),
                ],
            },
        ],
        milestones,
        contingencies: vec![
            Contingency {
                trigger: "Deteriorating operating performance".to_string(),
                action: "Accelerate debt reduction, postpone growth investments".to_string(),
            },
            Contingency {
                trigger: "Unfavorable equity markets".to_string(),
                action: "Extend timeline, focus on internal cash flow generation".to_string(),
            },
        ],
    }
}

/// The complete OPTIMIZE_CAPITAL_STRUCTURE result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapitalStructureReview {
    pub current_analysis: CapitalStructureAnalysis,
    pub evaluated_alternatives: Vec<EvaluatedAlternative>,
    pub recommendation: CapitalRecommendation,
    pub implementation_plan: ImplementationPlan,
}

pub fn review(current: &CapitalStructure) -> Result<CapitalStructureReview, FinanceError> {
    let current_analysis = analyze(current)?;
    let evaluated_alternatives = evaluate(current, alternatives(current))?;
    let recommendation = recommend(&evaluated_alternatives)?;
    let implementation_plan = implementation_plan(&recommendation.structure);
    Ok(CapitalStructureReview {
        current_analysis,
        evaluated_alternatives,
        recommendation,
        implementation_plan,
    })
}
