//! Deterministic financial computation engine.
//!
//! Pure functions over the value objects in `boardroom-models`: ratio
//! analysis, NPV/IRR/payback appraisal, sensitivity sweeps, WACC and
//! capital-structure optimization, and multi-year forecasting with a DCF
//! valuation. Stateless per call; all arithmetic is `rust_decimal` except
//! the IRR root finder, which iterates in `f64` and converts back.

pub mod capital;
pub mod error;
pub mod forecast;
pub mod ratios;
pub mod valuation;

pub use capital::{wacc, CapitalRecommendation, CapitalStructureReview, EvaluatedAlternative};
pub use error::FinanceError;
pub use forecast::{FinancialForecast, IncomeProjection};
pub use ratios::{FinancialAnalysis, FinancialRatios, RatioComparison};
pub use valuation::{
    irr, npv, payback_period, sensitivity, DecisionThresholds, InvestmentRecommendation, Payback,
    SensitivityAnalysis,
};
