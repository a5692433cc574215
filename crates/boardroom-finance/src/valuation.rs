//! Investment appraisal: NPV, IRR, payback period, sensitivity sweeps and
//! the proceed / do-not-proceed decision rule.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boardroom_models::finance::Investment;
use tracing::trace;

use crate::error::FinanceError;

/// Search interval and stopping criteria for the IRR bisection solver.
const IRR_LOWER_BOUND: f64 = -0.9999;
const IRR_UPPER_BOUND: f64 = 10.0;
const IRR_TOLERANCE: f64 = 1e-7;
const IRR_MAX_ITERATIONS: u32 = 200;

/// Net present value of a signed cash-flow sequence. `cash_flows[0]` is the
/// year-zero flow (typically the negative outlay) and is not discounted.
pub fn npv(cash_flows: &[Decimal], rate: Decimal) -> Result<Decimal, FinanceError> {
    if cash_flows.is_empty() {
        return Err(FinanceError::EmptyCashFlows);
    }
    if rate <= Decimal::NEGATIVE_ONE {
        return Err(FinanceError::InvalidDiscountRate(rate));
    }

    let growth = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;
    let mut total = Decimal::ZERO;
    for (period, flow) in cash_flows.iter().enumerate() {
        if period > 0 {
            discount *= growth;
        }
        total += flow / discount;
    }
    Ok(total)
}

/// Internal rate of return by bisection: the rate at which NPV crosses zero.
///
/// The solver iterates in `f64` (a decimal power tower overflows for deep
/// negative rates) and converts the root back to `Decimal` at 6 decimal
/// places, so rates that are analytically exact (e.g. a clean 10%) come
/// back exact. Sequences whose NPV never changes sign over the search
/// interval have no IRR and yield `IrrNotBracketed`.
pub fn irr(cash_flows: &[Decimal]) -> Result<Decimal, FinanceError> {
    if cash_flows.is_empty() {
        return Err(FinanceError::EmptyCashFlows);
    }

    let flows: Vec<f64> = cash_flows
        .iter()
        .map(|d| d.to_f64().ok_or(FinanceError::NumericOverflow))
        .collect::<Result<_, _>>()?;

    let npv_at = |rate: f64| -> f64 {
        flows
            .iter()
            .enumerate()
            .map(|(period, flow)| flow / (1.0 + rate).powi(period as i32))
            .sum()
    };

    let mut lo = IRR_LOWER_BOUND;
    let mut hi = IRR_UPPER_BOUND;
    let mut npv_lo = npv_at(lo);
    let npv_hi = npv_at(hi);

    if npv_lo == 0.0 {
        return to_decimal(lo);
    }
    if npv_hi == 0.0 {
        return to_decimal(hi);
    }
    if npv_lo.signum() == npv_hi.signum() {
        return Err(FinanceError::IrrNotBracketed);
    }

    let mut mid = (lo + hi) / 2.0;
    for iteration in 0..IRR_MAX_ITERATIONS {
        mid = (lo + hi) / 2.0;
        let npv_mid = npv_at(mid);
        if npv_mid.abs() < IRR_TOLERANCE {
            trace!(rate = mid, iteration, "IRR bisection converged");
            break;
        }
        if npv_mid.signum() == npv_lo.signum() {
            lo = mid;
            npv_lo = npv_mid;
        } else {
            hi = mid;
        }
    }

    to_decimal(mid)
}

fn to_decimal(rate: f64) -> Result<Decimal, FinanceError> {
    Decimal::from_f64(rate)
        .map(|d| d.round_dp(6))
        .ok_or(FinanceError::NumericOverflow)
}

/// Outcome of a payback-period walk. An investment that never recovers its
/// outlay is a defined non-error outcome, distinct from any numeric value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Payback {
    Recovered { years: Decimal },
    NeverRecovers,
}

impl Payback {
    pub fn years(&self) -> Option<Decimal> {
        match self {
            Self::Recovered { years } => Some(*years),
            Self::NeverRecovers => None,
        }
    }
}

/// Walk the projected cash flows year by year from the negative outlay,
/// interpolating linearly inside the year where the cumulative balance first
/// turns non-negative.
pub fn payback_period(investment: &Investment) -> Payback {
    let mut cumulative = -investment.initial_outlay;
    for (year, flow) in investment.projected_cash_flows.iter().enumerate() {
        let previous = cumulative;
        cumulative += *flow;
        if cumulative >= Decimal::ZERO {
            // A zero flow can only cross if the balance was already zero.
            let fraction = if flow.is_zero() {
                Decimal::ZERO
            } else {
                -previous / *flow
            };
            return Payback::Recovered {
                years: Decimal::from(year as u64) + fraction,
            };
        }
    }
    Payback::NeverRecovers
}

/// Validate an investment's shape before computing on it.
pub fn validate_investment(investment: &Investment) -> Result<(), FinanceError> {
    if investment.projected_cash_flows.is_empty() {
        return Err(FinanceError::EmptyCashFlows);
    }
    if investment.projected_cash_flows.len() != investment.projection_period as usize {
        return Err(FinanceError::ProjectionMismatch {
            expected: investment.projection_period,
            actual: investment.projected_cash_flows.len(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatePoint {
    pub rate: Decimal,
    pub npv: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScalePoint {
    /// Relative change applied to the varied input (e.g. -0.2 = -20%).
    pub change: Decimal,
    pub npv: Decimal,
}

/// One-variable-at-a-time NPV sweeps over discount rate, cash-flow
/// magnitude and initial outlay. All other inputs stay at base values for
/// each table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityAnalysis {
    pub discount_rate: Vec<RatePoint>,
    pub cash_flows: Vec<ScalePoint>,
    pub initial_outlay: Vec<ScalePoint>,
}

fn rate_steps() -> [Decimal; 5] {
    [
        Decimal::new(-2, 2),
        Decimal::new(-1, 2),
        Decimal::ZERO,
        Decimal::new(1, 2),
        Decimal::new(2, 2),
    ]
}

fn scale_steps() -> [Decimal; 5] {
    [
        Decimal::new(-2, 1),
        Decimal::new(-1, 1),
        Decimal::ZERO,
        Decimal::new(1, 1),
        Decimal::new(2, 1),
    ]
}

pub fn sensitivity(
    investment: &Investment,
    discount_rate: Decimal,
) -> Result<SensitivityAnalysis, FinanceError> {
    validate_investment(investment)?;
    let base_flows = investment.cash_flow_sequence();

    let mut rate_points = Vec::with_capacity(5);
    for step in rate_steps() {
        let rate = discount_rate + step;
        rate_points.push(RatePoint {
            rate,
            npv: npv(&base_flows, rate)?,
        });
    }

    let mut flow_points = Vec::with_capacity(5);
    for change in scale_steps() {
        let scale = Decimal::ONE + change;
        let mut flows = Vec::with_capacity(base_flows.len());
        flows.push(-investment.initial_outlay);
        flows.extend(investment.projected_cash_flows.iter().map(|cf| cf * scale));
        flow_points.push(ScalePoint {
            change,
            npv: npv(&flows, discount_rate)?,
        });
    }

    let mut outlay_points = Vec::with_capacity(5);
    for change in scale_steps() {
        let scale = Decimal::ONE + change;
        let mut flows = Vec::with_capacity(base_flows.len());
        flows.push(-(investment.initial_outlay * scale));
        flows.extend(investment.projected_cash_flows.iter().copied());
        outlay_points.push(ScalePoint {
            change,
            npv: npv(&flows, discount_rate)?,
        });
    }

    Ok(SensitivityAnalysis {
        discount_rate: rate_points,
        cash_flows: flow_points,
        initial_outlay: outlay_points,
    })
}

/// Thresholds for the investment decision rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionThresholds {
    pub required_rate: Decimal,
    pub max_payback_period: Decimal,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            required_rate: Decimal::new(10, 2),
            max_payback_period: Decimal::from(3),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Decision {
    #[serde(rename = "Proceed with Investment")]
    Proceed,
    #[serde(rename = "Do Not Proceed with Investment")]
    DoNotProceed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecommendation {
    pub decision: Decision,
    pub rationale: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

fn format_currency(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-${:.2}", -amount)
    } else {
        format!("${amount:.2}")
    }
}

fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", rate * Decimal::ONE_HUNDRED)
}

/// The decision rule: proceed only when NPV is positive, IRR clears the
/// required rate and payback lands inside the acceptable window. On
/// rejection the rationale names only the thresholds that failed.
pub fn recommend(
    npv: Decimal,
    irr: Decimal,
    payback: &Payback,
    thresholds: &DecisionThresholds,
) -> InvestmentRecommendation {
    let npv_ok = npv > Decimal::ZERO;
    let irr_ok = irr > thresholds.required_rate;
    let payback_ok = matches!(
        payback,
        Payback::Recovered { years } if *years < thresholds.max_payback_period
    );

    if npv_ok && irr_ok && payback_ok {
        let years = payback.years().unwrap_or_default();
        InvestmentRecommendation {
            decision: Decision::Proceed,
            rationale: vec![
                format!("Positive NPV of {}", format_currency(npv)),
                format!(
                    "IRR of {} exceeds required rate of {}",
                    format_percent(irr),
                    format_percent(thresholds.required_rate)
                ),
                format!(
                    "Payback period of {years:.2} years is within acceptable range"
                ),
            ],
            conditions: vec![
                "Secure projected financing at assumed rates".to_string(),
                "Implement recommended risk mitigation strategies".to_string(),
                "Establish regular performance monitoring framework".to_string(),
            ],
            alternatives: Vec::new(),
        }
    } else {
        let mut rationale = Vec::new();
        if !npv_ok {
            rationale.push(format!(
                "Negative or zero NPV of {}",
                format_currency(npv)
            ));
        }
        if !irr_ok {
            rationale.push(format!(
                "IRR of {} below required rate of {}",
                format_percent(irr),
                format_percent(thresholds.required_rate)
            ));
        }
        if !payback_ok {
            rationale.push(match payback {
                Payback::Recovered { years } => format!(
                    "Payback period of {years:.2} years exceeds maximum acceptable period"
                ),
                Payback::NeverRecovers => {
                    "Investment does not recover its initial outlay within the projection period"
                        .to_string()
                }
            });
        }
        InvestmentRecommendation {
            decision: Decision::DoNotProceed,
            rationale,
            conditions: Vec::new(),
            alternatives: vec![
                "Explore modified version of investment with lower initial outlay".to_string(),
                "Reassess project scope to improve financial metrics".to_string(),
                "Consider alternative investment opportunities with better risk-return profile"
                    .to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRisk {
    #[serde(rename = "type")]
    pub risk_type: String,
    pub description: String,
    pub probability: RiskLevel,
    pub impact: RiskLevel,
    pub mitigation_strategies: Vec<String>,
}

/// Fixed risk taxonomy attached to every investment evaluation.
pub fn assess_risks() -> Vec<InvestmentRisk> {
    vec![
        InvestmentRisk {
            risk_type: "Market Risk".to_string(),
            description: "Risk of lower than projected market adoption".to_string(),
            probability: RiskLevel::Medium,
            impact: RiskLevel::High,
            mitigation_strategies: vec![
                "Phased implementation approach".to_string(),
                "Comprehensive market testing before full rollout".to_string(),
            ],
        },
        InvestmentRisk {
            risk_type: "Operational Risk".to_string(),
            description: "Risk of implementation delays or cost overruns".to_string(),
            probability: RiskLevel::Medium,
            impact: RiskLevel::Medium,
            mitigation_strategies: vec![
                "Detailed implementation planning".to_string(),
                "Regular progress monitoring and contingency planning".to_string(),
            ],
        },
        InvestmentRisk {
            risk_type: "Financial Risk".to_string(),
            description: "Risk of insufficient funding for project completion".to_string(),
            probability: RiskLevel::Low,
            impact: RiskLevel::High,
            mitigation_strategies: vec![
                "Secure financing before project initiation".to_string(),
                "Maintain capital reserve for contingencies".to_string(),
            ],
        },
    ]
}
