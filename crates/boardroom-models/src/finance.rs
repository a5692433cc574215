use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A full statement set for one reporting period. Immutable input to the
/// computation engine; the engine never writes these back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatements {
    pub income_statement: IncomeStatement,
    pub balance_sheet: BalanceSheet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_flow: Option<CashFlowStatement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub operating_expenses: Decimal,
    pub interest_expense: Decimal,
    pub tax_expense: Decimal,
    pub net_income: Decimal,
}

impl IncomeStatement {
    pub fn gross_profit(&self) -> Decimal {
        self.revenue - self.cogs
    }

    pub fn operating_income(&self) -> Decimal {
        self.revenue - self.cogs - self.operating_expenses
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub cash: Decimal,
    pub accounts_receivable: Decimal,
    pub inventory: Decimal,
    #[serde(default)]
    pub other_current_assets: Decimal,
    pub non_current_assets: Decimal,
    pub accounts_payable: Decimal,
    pub short_term_debt: Decimal,
    #[serde(default)]
    pub other_current_liabilities: Decimal,
    pub long_term_debt: Decimal,
    #[serde(default)]
    pub other_non_current_liabilities: Decimal,
    pub total_equity: Decimal,
}

impl BalanceSheet {
    pub fn current_assets(&self) -> Decimal {
        self.cash + self.accounts_receivable + self.inventory + self.other_current_assets
    }

    pub fn total_assets(&self) -> Decimal {
        self.current_assets() + self.non_current_assets
    }

    pub fn current_liabilities(&self) -> Decimal {
        self.accounts_payable + self.short_term_debt + self.other_current_liabilities
    }

    pub fn total_debt(&self) -> Decimal {
        self.short_term_debt + self.long_term_debt
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    pub operating: Decimal,
    pub investing: Decimal,
    pub financing: Decimal,
}

/// Growth and margin assumptions driving a multi-year forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastAssumptions {
    /// Annual revenue growth rate (e.g. 0.08 = 8% per year, compounded).
    pub revenue_growth: Decimal,
    /// COGS as a fraction of revenue.
    pub cogs_percentage: Decimal,
    /// Operating expenses as a fraction of revenue.
    pub opex_percentage: Decimal,
    /// Flat annual interest expense over the forecast horizon.
    pub interest_expense: Decimal,
    pub tax_rate: Decimal,
    /// Discount rate for the DCF valuation of the forecast. Falls back to
    /// the engine default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wacc: Option<Decimal>,
    /// Perpetuity growth rate for the terminal value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_growth: Option<Decimal>,
}

/// Assumptions for a single investment appraisal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationAssumptions {
    pub discount_rate: Decimal,
}

/// An investment proposal: outlay now, projected inflows per year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    /// Positive amount spent at year zero.
    pub initial_outlay: Decimal,
    /// One entry per projection year, starting at year 1.
    pub projected_cash_flows: Vec<Decimal>,
    pub projection_period: u32,
}

impl Investment {
    /// The full signed cash-flow sequence, outlay first.
    pub fn cash_flow_sequence(&self) -> Vec<Decimal> {
        let mut flows = Vec::with_capacity(self.projected_cash_flows.len() + 1);
        flows.push(-self.initial_outlay);
        flows.extend(self.projected_cash_flows.iter().copied());
        flows
    }
}

/// The unit operated on by WACC and capital-structure optimization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapitalStructure {
    pub total_debt: Decimal,
    pub total_equity: Decimal,
    pub cost_of_debt: Decimal,
    pub cost_of_equity: Decimal,
    pub tax_rate: Decimal,
    pub ebit: Decimal,
    pub interest_expense: Decimal,
}

/// Industry benchmark values, one optional slot per ratio. Ratios without a
/// benchmark are omitted from comparisons rather than defaulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RatioBenchmarks {
    pub current_ratio: Option<Decimal>,
    pub quick_ratio: Option<Decimal>,
    pub cash_ratio: Option<Decimal>,
    pub gross_margin: Option<Decimal>,
    pub operating_margin: Option<Decimal>,
    pub net_margin: Option<Decimal>,
    pub roe: Option<Decimal>,
    pub roa: Option<Decimal>,
    pub asset_turnover: Option<Decimal>,
    pub inventory_turnover: Option<Decimal>,
    pub receivables_turnover: Option<Decimal>,
    pub debt_to_equity: Option<Decimal>,
    pub debt_to_assets: Option<Decimal>,
    pub interest_coverage: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    pub(crate) fn sample_statements() -> FinancialStatements {
        FinancialStatements {
            income_statement: IncomeStatement {
                revenue: dec!(10_000_000),
                cogs: dec!(6_500_000),
                operating_expenses: dec!(2_000_000),
                interest_expense: dec!(300_000),
                tax_expense: dec!(300_000),
                net_income: dec!(900_000),
            },
            balance_sheet: BalanceSheet {
                cash: dec!(800_000),
                accounts_receivable: dec!(1_200_000),
                inventory: dec!(1_000_000),
                other_current_assets: dec!(200_000),
                non_current_assets: dec!(6_800_000),
                accounts_payable: dec!(900_000),
                short_term_debt: dec!(500_000),
                other_current_liabilities: dec!(600_000),
                long_term_debt: dec!(3_000_000),
                other_non_current_liabilities: dec!(500_000),
                total_equity: dec!(4_500_000),
            },
            cash_flow: Some(CashFlowStatement {
                operating: dec!(1_500_000),
                investing: dec!(-600_000),
                financing: dec!(-400_000),
            }),
        }
    }

    #[test]
    fn balance_sheet_derived_totals() {
        let sheet = sample_statements().balance_sheet;
        assert_eq!(sheet.current_assets(), dec!(3_200_000));
        assert_eq!(sheet.total_assets(), dec!(10_000_000));
        assert_eq!(sheet.current_liabilities(), dec!(2_000_000));
        assert_eq!(sheet.total_debt(), dec!(3_500_000));
    }

    #[test]
    fn income_statement_derived_lines() {
        let income = sample_statements().income_statement;
        assert_eq!(income.gross_profit(), dec!(3_500_000));
        assert_eq!(income.operating_income(), dec!(1_500_000));
    }

    #[test]
    fn roundtrip_statements() {
        let statements = sample_statements();
        let json = serde_json::to_string(&statements).unwrap();
        let deserialized: FinancialStatements = serde_json::from_str(&json).unwrap();
        assert_eq!(statements, deserialized);
    }

    #[test]
    fn investment_cash_flow_sequence_starts_negative() {
        let investment = Investment {
            initial_outlay: dec!(1000),
            projected_cash_flows: vec![dec!(400), dec!(400)],
            projection_period: 2,
        };
        assert_eq!(
            investment.cash_flow_sequence(),
            vec![dec!(-1000), dec!(400), dec!(400)]
        );
    }

    #[test]
    fn partial_benchmarks_deserialize() {
        let benchmarks: RatioBenchmarks =
            serde_json::from_str(r#"{"currentRatio": "1.8", "netMargin": "0.10"}"#).unwrap();
        assert_eq!(benchmarks.current_ratio, Some(dec!(1.8)));
        assert_eq!(benchmarks.net_margin, Some(dec!(0.10)));
        assert_eq!(benchmarks.roe, None);
    }
}
