//! Multi-year income projection and DCF valuation of the projected stream.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boardroom_models::finance::{ForecastAssumptions, IncomeStatement};

use crate::error::FinanceError;

/// Engine default discount rate when the assumptions carry none.
pub const DEFAULT_WACC: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
/// Engine default perpetuity growth for the terminal value.
pub const DEFAULT_TERMINAL_GROWTH: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeProjection {
    pub year: u32,
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub gross_profit: Decimal,
    pub operating_expenses: Decimal,
    pub operating_income: Decimal,
    pub interest_expense: Decimal,
    pub tax_expense: Decimal,
    pub net_income: Decimal,
}

/// Project the income statement forward year by year. Revenue compounds at
/// the growth rate; cost lines track revenue via the assumed percentages;
/// tax applies to earnings before tax whatever its sign.
pub fn project_income(
    current: &IncomeStatement,
    assumptions: &ForecastAssumptions,
    years: u32,
) -> Result<Vec<IncomeProjection>, FinanceError> {
    if years == 0 {
        return Err(FinanceError::InvalidForecastPeriod);
    }
    if current.revenue <= Decimal::ZERO {
        return Err(FinanceError::NonPositiveRevenue);
    }

    let growth_factor = Decimal::ONE + assumptions.revenue_growth;
    let mut revenue = current.revenue;
    let mut projections = Vec::with_capacity(years as usize);

    for year in 1..=years {
        revenue *= growth_factor;
        let cogs = revenue * assumptions.cogs_percentage;
        let gross_profit = revenue - cogs;
        let operating_expenses = revenue * assumptions.opex_percentage;
        let operating_income = gross_profit - operating_expenses;
        let earnings_before_tax = operating_income - assumptions.interest_expense;
        let tax_expense = earnings_before_tax * assumptions.tax_rate;

        projections.push(IncomeProjection {
            year,
            revenue: revenue.round_dp(2),
            cogs: cogs.round_dp(2),
            gross_profit: gross_profit.round_dp(2),
            operating_expenses: operating_expenses.round_dp(2),
            operating_income: operating_income.round_dp(2),
            interest_expense: assumptions.interest_expense,
            tax_expense: tax_expense.round_dp(2),
            net_income: (earnings_before_tax - tax_expense).round_dp(2),
        });
    }

    Ok(projections)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearMetrics {
    pub year: u32,
    pub gross_margin: Decimal,
    pub operating_margin: Decimal,
    pub net_margin: Decimal,
    /// Year-over-year revenue growth; equals the assumed rate by construction.
    pub revenue_growth: Decimal,
}

pub fn metrics(
    projections: &[IncomeProjection],
    assumptions: &ForecastAssumptions,
) -> Vec<YearMetrics> {
    projections
        .iter()
        .map(|p| YearMetrics {
            year: p.year,
            gross_margin: (p.gross_profit / p.revenue).round_dp(4),
            operating_margin: (p.operating_income / p.revenue).round_dp(4),
            net_margin: (p.net_income / p.revenue).round_dp(4),
            revenue_growth: assumptions.revenue_growth,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DcfValuation {
    pub discount_rate: Decimal,
    pub terminal_growth: Decimal,
    pub present_value_of_projections: Decimal,
    pub terminal_value: Decimal,
    pub present_value_of_terminal: Decimal,
    pub enterprise_value: Decimal,
}

/// Discount the projected earnings stream and a Gordon-growth terminal
/// value. Earnings proxy for free cash flow here; the assumptions carry no
/// reinvestment schedule to adjust by.
pub fn dcf_valuation(
    projections: &[IncomeProjection],
    assumptions: &ForecastAssumptions,
) -> Result<DcfValuation, FinanceError> {
    let discount_rate = assumptions.wacc.unwrap_or(DEFAULT_WACC);
    let terminal_growth = assumptions.terminal_growth.unwrap_or(DEFAULT_TERMINAL_GROWTH);

    if discount_rate <= Decimal::NEGATIVE_ONE {
        return Err(FinanceError::InvalidDiscountRate(discount_rate));
    }
    if terminal_growth >= discount_rate {
        return Err(FinanceError::TerminalGrowthExceedsWacc {
            wacc: discount_rate,
            growth: terminal_growth,
        });
    }
    let last = projections.last().ok_or(FinanceError::InvalidForecastPeriod)?;

    let base = Decimal::ONE + discount_rate;
    let mut factor = Decimal::ONE;
    let mut present_value = Decimal::ZERO;
    for projection in projections {
        factor *= base;
        present_value += projection.net_income / factor;
    }

    let terminal_value =
        last.net_income * (Decimal::ONE + terminal_growth) / (discount_rate - terminal_growth);
    let present_value_of_terminal = terminal_value / factor;

    Ok(DcfValuation {
        discount_rate,
        terminal_growth,
        present_value_of_projections: present_value.round_dp(2),
        terminal_value: terminal_value.round_dp(2),
        present_value_of_terminal: present_value_of_terminal.round_dp(2),
        enterprise_value: (present_value + present_value_of_terminal).round_dp(2),
    })
}

/// The complete FORECAST_FINANCIALS result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialForecast {
    pub forecast_period: u32,
    pub assumptions: ForecastAssumptions,
    pub projections: Vec<IncomeProjection>,
    pub metrics: Vec<YearMetrics>,
    pub valuation: DcfValuation,
}

pub fn forecast(
    current: &IncomeStatement,
    assumptions: &ForecastAssumptions,
    years: u32,
) -> Result<FinancialForecast, FinanceError> {
    let projections = project_income(current, assumptions, years)?;
    let metrics = metrics(&projections, assumptions);
    let valuation = dcf_valuation(&projections, assumptions)?;
    Ok(FinancialForecast {
        forecast_period: years,
        assumptions: assumptions.clone(),
        projections,
        metrics,
        valuation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_income() -> IncomeStatement {
        IncomeStatement {
            revenue: dec!(1_000_000),
            cogs: dec!(600_000),
            operating_expenses: dec!(200_000),
            interest_expense: dec!(20_000),
            tax_expense: dec!(45_000),
            net_income: dec!(135_000),
        }
    }

    fn base_assumptions() -> ForecastAssumptions {
        ForecastAssumptions {
            revenue_growth: dec!(0.10),
            cogs_percentage: dec!(0.60),
            opex_percentage: dec!(0.20),
            interest_expense: dec!(20_000),
            tax_rate: dec!(0.25),
            wacc: Some(dec!(0.10)),
            terminal_growth: Some(dec!(0.02)),
        }
    }

    #[test]
    fn revenue_compounds_each_year() {
        let projections =
            project_income(&base_income(), &base_assumptions(), 3).unwrap();
        assert_eq!(projections[0].revenue, dec!(1_100_000));
        assert_eq!(projections[1].revenue, dec!(1_210_000));
        assert_eq!(projections[2].revenue, dec!(1_331_000));
    }

    #[test]
    fn first_year_income_statement_lines() {
        let projections =
            project_income(&base_income(), &base_assumptions(), 1).unwrap();
        let year_one = &projections[0];
        assert_eq!(year_one.cogs, dec!(660_000));
        assert_eq!(year_one.gross_profit, dec!(440_000));
        assert_eq!(year_one.operating_expenses, dec!(220_000));
        assert_eq!(year_one.operating_income, dec!(220_000));
        // EBT 200k, tax 50k, net 150k.
        assert_eq!(year_one.tax_expense, dec!(50_000));
        assert_eq!(year_one.net_income, dec!(150_000));
    }

    #[test]
    fn tax_applies_to_losses_as_a_credit() {
        let mut assumptions = base_assumptions();
        assumptions.opex_percentage = dec!(0.50);
        let projections = project_income(&base_income(), &assumptions, 1).unwrap();
        // EBT = 1.1M - 0.66M - 0.55M - 20k = -130k, tax -32.5k, net -97.5k.
        assert_eq!(projections[0].tax_expense, dec!(-32_500));
        assert_eq!(projections[0].net_income, dec!(-97_500));
    }

    #[test]
    fn zero_period_is_rejected() {
        assert_eq!(
            project_income(&base_income(), &base_assumptions(), 0),
            Err(FinanceError::InvalidForecastPeriod)
        );
    }

    #[test]
    fn non_positive_revenue_is_rejected() {
        let mut income = base_income();
        income.revenue = Decimal::ZERO;
        assert_eq!(
            project_income(&income, &base_assumptions(), 3),
            Err(FinanceError::NonPositiveRevenue)
        );
    }

    #[test]
    fn margins_are_stable_under_percentage_assumptions() {
        let projections =
            project_income(&base_income(), &base_assumptions(), 3).unwrap();
        let metrics = metrics(&projections, &base_assumptions());
        assert_eq!(metrics[0].gross_margin, dec!(0.4000));
        assert_eq!(metrics[0].operating_margin, dec!(0.2000));
        // Fixed interest shrinks relative to revenue, so net margin rises.
        assert!(metrics[2].net_margin > metrics[0].net_margin);
    }

    #[test]
    fn terminal_growth_must_stay_below_discount_rate() {
        let mut assumptions = base_assumptions();
        assumptions.terminal_growth = Some(dec!(0.12));
        let projections =
            project_income(&base_income(), &base_assumptions(), 2).unwrap();
        assert_eq!(
            dcf_valuation(&projections, &assumptions),
            Err(FinanceError::TerminalGrowthExceedsWacc {
                wacc: dec!(0.10),
                growth: dec!(0.12),
            })
        );
    }

    #[test]
    fn dcf_discounts_and_adds_terminal_value() {
        let projections =
            project_income(&base_income(), &base_assumptions(), 1).unwrap();
        let valuation = dcf_valuation(&projections, &base_assumptions()).unwrap();
        // Net 150k discounted one year at 10%.
        assert_eq!(valuation.present_value_of_projections, dec!(136_363.64));
        // Terminal: 150k * 1.02 / 0.08 = 1.9125M, discounted one year.
        assert_eq!(valuation.terminal_value, dec!(1_912_500));
        assert_eq!(
            valuation.enterprise_value,
            valuation.present_value_of_projections + valuation.present_value_of_terminal
        );
    }

    #[test]
    fn forecast_defaults_discount_inputs() {
        let mut assumptions = base_assumptions();
        assumptions.wacc = None;
        assumptions.terminal_growth = None;
        let result = forecast(&base_income(), &assumptions, 5).unwrap();
        assert_eq!(result.valuation.discount_rate, DEFAULT_WACC);
        assert_eq!(result.valuation.terminal_growth, DEFAULT_TERMINAL_GROWTH);
        assert_eq!(result.projections.len(), 5);
        assert_eq!(result.metrics.len(), 5);
    }
}
