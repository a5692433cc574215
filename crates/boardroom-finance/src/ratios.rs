//! Ratio computation and benchmark comparison.
//!
//! Every ratio is `Option<Decimal>`: a zero denominator omits the ratio
//! rather than producing a NaN-like value, and omitted ratios drop out of
//! benchmark comparisons instead of defaulting to zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boardroom_models::finance::{FinancialStatements, RatioBenchmarks};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityRatios {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_ratio: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityRatios {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_margin: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_margin: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_margin: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roe: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roa: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyRatios {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_turnover: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_turnover: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receivables_turnover: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeverageRatios {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_equity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_assets: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_coverage: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRatios {
    pub liquidity: LiquidityRatios,
    pub profitability: ProfitabilityRatios,
    pub efficiency: EfficiencyRatios,
    pub leverage: LeverageRatios,
}

fn div(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Derive the full ratio set from one statement period.
pub fn compute(statements: &FinancialStatements) -> FinancialRatios {
    let income = &statements.income_statement;
    let sheet = &statements.balance_sheet;

    let current_liabilities = sheet.current_liabilities();
    let total_assets = sheet.total_assets();

    FinancialRatios {
        liquidity: LiquidityRatios {
            current_ratio: div(sheet.current_assets(), current_liabilities),
            quick_ratio: div(sheet.current_assets() - sheet.inventory, current_liabilities),
            cash_ratio: div(sheet.cash, current_liabilities),
        },
        profitability: ProfitabilityRatios {
            gross_margin: div(income.gross_profit(), income.revenue),
            operating_margin: div(income.operating_income(), income.revenue),
            net_margin: div(income.net_income, income.revenue),
            roe: div(income.net_income, sheet.total_equity),
            roa: div(income.net_income, total_assets),
        },
        efficiency: EfficiencyRatios {
            asset_turnover: div(income.revenue, total_assets),
            inventory_turnover: div(income.cogs, sheet.inventory),
            receivables_turnover: div(income.revenue, sheet.accounts_receivable),
        },
        leverage: LeverageRatios {
            debt_to_equity: div(sheet.total_debt(), sheet.total_equity),
            debt_to_assets: div(sheet.total_debt(), total_assets),
            interest_coverage: div(income.operating_income(), income.interest_expense),
        },
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RatioCategory {
    Liquidity,
    Profitability,
    Efficiency,
    Leverage,
}

impl RatioCategory {
    fn label(self) -> &'static str {
        match self {
            Self::Liquidity => "Liquidity",
            Self::Profitability => "Profitability",
            Self::Efficiency => "Efficiency",
            Self::Leverage => "Leverage",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatioComparison {
    pub category: RatioCategory,
    pub ratio: String,
    pub actual: Decimal,
    pub benchmark: Decimal,
    pub difference: Decimal,
    pub percentage_difference: Decimal,
}

/// For debt ratios a value below benchmark is the favorable side.
fn lower_is_better(ratio: &str) -> bool {
    matches!(ratio, "debtToEquity" | "debtToAssets")
}

fn comparison_table(
    ratios: &FinancialRatios,
    benchmarks: &RatioBenchmarks,
) -> Vec<(RatioCategory, &'static str, Option<Decimal>, Option<Decimal>)> {
    use RatioCategory::*;
    vec![
        (Liquidity, "currentRatio", ratios.liquidity.current_ratio, benchmarks.current_ratio),
        (Liquidity, "quickRatio", ratios.liquidity.quick_ratio, benchmarks.quick_ratio),
        (Liquidity, "cashRatio", ratios.liquidity.cash_ratio, benchmarks.cash_ratio),
        (Profitability, "grossMargin", ratios.profitability.gross_margin, benchmarks.gross_margin),
        (
            Profitability,
            "operatingMargin",
            ratios.profitability.operating_margin,
            benchmarks.operating_margin,
        ),
        (Profitability, "netMargin", ratios.profitability.net_margin, benchmarks.net_margin),
        (Profitability, "roe", ratios.profitability.roe, benchmarks.roe),
        (Profitability, "roa", ratios.profitability.roa, benchmarks.roa),
        (Efficiency, "assetTurnover", ratios.efficiency.asset_turnover, benchmarks.asset_turnover),
        (
            Efficiency,
            "inventoryTurnover",
            ratios.efficiency.inventory_turnover,
            benchmarks.inventory_turnover,
        ),
        (
            Efficiency,
            "receivablesTurnover",
            ratios.efficiency.receivables_turnover,
            benchmarks.receivables_turnover,
        ),
        (Leverage, "debtToEquity", ratios.leverage.debt_to_equity, benchmarks.debt_to_equity),
        (Leverage, "debtToAssets", ratios.leverage.debt_to_assets, benchmarks.debt_to_assets),
        (
            Leverage,
            "interestCoverage",
            ratios.leverage.interest_coverage,
            benchmarks.interest_coverage,
        ),
    ]
}

/// Compare computed ratios against industry benchmarks. Ratios lacking a
/// computed value or a benchmark are omitted; a zero benchmark is omitted
/// too since the percentage difference is undefined against it.
pub fn compare(ratios: &FinancialRatios, benchmarks: &RatioBenchmarks) -> Vec<RatioComparison> {
    comparison_table(ratios, benchmarks)
        .into_iter()
        .filter_map(|(category, name, actual, benchmark)| {
            let actual = actual?;
            let benchmark = benchmark?;
            if benchmark.is_zero() {
                return None;
            }
            let difference = actual - benchmark;
            Some(RatioComparison {
                category,
                ratio: name.to_string(),
                actual,
                benchmark,
                difference,
                percentage_difference: difference / benchmark * Decimal::ONE_HUNDRED,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub area: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrengthsAndWeaknesses {
    pub strengths: Vec<Finding>,
    pub weaknesses: Vec<Finding>,
}

/// Margin (in percent of benchmark) beyond which a deviation counts as a
/// strength or weakness rather than noise.
const SIGNIFICANCE_THRESHOLD_PCT: i64 = 10;

/// Classify benchmark deviations into strengths and weaknesses.
pub fn assess(comparisons: &[RatioComparison]) -> StrengthsAndWeaknesses {
    let threshold = Decimal::from(SIGNIFICANCE_THRESHOLD_PCT);
    let mut result = StrengthsAndWeaknesses::default();

    for comparison in comparisons {
        let favorable_pct = if lower_is_better(&comparison.ratio) {
            -comparison.percentage_difference
        } else {
            comparison.percentage_difference
        };

        let magnitude = comparison.percentage_difference.abs().round_dp(1);
        let side = if comparison.percentage_difference >= Decimal::ZERO {
            "above"
        } else {
            "below"
        };
        let finding = Finding {
            area: comparison.category.label().to_string(),
            detail: format!(
                "{} is {magnitude}% {side} the industry benchmark",
                comparison.ratio
            ),
        };

        if favorable_pct >= threshold {
            result.strengths.push(finding);
        } else if favorable_pct <= -threshold {
            result.weaknesses.push(finding);
        }
    }

    result
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecommendation {
    pub area: String,
    pub recommendation: String,
    pub impact: String,
    pub priority: Priority,
}

/// Turn weak categories into concrete recommendations. One recommendation
/// per category; priority escalates when any ratio in the category trails
/// its benchmark by more than 25%.
pub fn recommendations(comparisons: &[RatioComparison]) -> Vec<FinancialRecommendation> {
    use RatioCategory::*;

    let severe = Decimal::from(25);
    let threshold = Decimal::from(SIGNIFICANCE_THRESHOLD_PCT);
    let mut result = Vec::new();

    for category in [Liquidity, Profitability, Efficiency, Leverage] {
        let unfavorable: Vec<Decimal> = comparisons
            .iter()
            .filter(|c| c.category == category)
            .map(|c| {
                if lower_is_better(&c.ratio) {
                    c.percentage_difference
                } else {
                    -c.percentage_difference
                }
            })
            .filter(|shortfall| *shortfall >= threshold)
            .collect();

        if unfavorable.is_empty() {
            continue;
        }

        let priority = if unfavorable.iter().any(|s| *s >= severe) {
            Priority::High
        } else {
            Priority::Medium
        };

        let (area, recommendation, impact) = match category {
            Liquidity => (
                "Liquidity Management",
                "Improve working capital management by negotiating longer payment terms with suppliers",
                "Increase current ratio by 0.2-0.3 within 6 months",
            ),
            Profitability => (
                "Profitability Improvement",
                "Review pricing and cost structure to restore margins toward industry levels",
                "Lift net margin by 1-2 percentage points within 12 months",
            ),
            Efficiency => (
                "Asset Utilization",
                "Tighten inventory and receivables cycles to raise turnover",
                "Shorten the cash conversion cycle by 10-15 days within 9 months",
            ),
            Leverage => (
                "Capital Structure",
                "Gradually reduce debt levels by allocating 60% of excess cash flow to debt repayment",
                "Reduce debt-to-equity ratio to industry norms within 18 months",
            ),
        };

        result.push(FinancialRecommendation {
            area: area.to_string(),
            recommendation: recommendation.to_string(),
            impact: impact.to_string(),
            priority,
        });
    }

    result
}

/// The complete ANALYZE_FINANCIALS result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAnalysis {
    pub ratios: FinancialRatios,
    pub benchmark_comparison: Vec<RatioComparison>,
    pub strengths_and_weaknesses: StrengthsAndWeaknesses,
    pub recommendations: Vec<FinancialRecommendation>,
}

pub fn analyze(
    statements: &FinancialStatements,
    benchmarks: &RatioBenchmarks,
) -> FinancialAnalysis {
    let ratios = compute(statements);
    let benchmark_comparison = compare(&ratios, benchmarks);
    let strengths_and_weaknesses = assess(&benchmark_comparison);
    let recommendations = recommendations(&benchmark_comparison);
    FinancialAnalysis {
        ratios,
        benchmark_comparison,
        strengths_and_weaknesses,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_models::finance::{BalanceSheet, IncomeStatement};
    use rust_decimal_macros::dec;

    fn sample_statements() -> FinancialStatements {
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
            cash_flow: None,
        }
    }

    #[test]
    fn computes_all_ratio_groups() {
        let ratios = compute(&sample_statements());

        assert_eq!(ratios.liquidity.current_ratio, Some(dec!(1.6)));
        assert_eq!(ratios.liquidity.quick_ratio, Some(dec!(1.1)));
        assert_eq!(ratios.liquidity.cash_ratio, Some(dec!(0.4)));
        assert_eq!(ratios.profitability.gross_margin, Some(dec!(0.35)));
        assert_eq!(ratios.profitability.operating_margin, Some(dec!(0.15)));
        assert_eq!(ratios.profitability.net_margin, Some(dec!(0.09)));
        assert_eq!(ratios.profitability.roe, Some(dec!(0.2)));
        assert_eq!(ratios.profitability.roa, Some(dec!(0.09)));
        assert_eq!(ratios.efficiency.asset_turnover, Some(dec!(1)));
        assert_eq!(ratios.efficiency.inventory_turnover, Some(dec!(6.5)));
        assert_eq!(
            ratios.efficiency.receivables_turnover,
            Some(dec!(10_000_000) / dec!(1_200_000))
        );
        assert_eq!(
            ratios.leverage.debt_to_equity,
            Some(dec!(3_500_000) / dec!(4_500_000))
        );
        assert_eq!(ratios.leverage.debt_to_assets, Some(dec!(0.35)));
        assert_eq!(ratios.leverage.interest_coverage, Some(dec!(5)));
    }

    #[test]
    fn zero_denominator_omits_ratio() {
        let mut statements = sample_statements();
        statements.balance_sheet.inventory = Decimal::ZERO;
        statements.income_statement.interest_expense = Decimal::ZERO;

        let ratios = compute(&statements);
        assert_eq!(ratios.efficiency.inventory_turnover, None);
        assert_eq!(ratios.leverage.interest_coverage, None);
        // Other ratios are unaffected.
        assert!(ratios.liquidity.current_ratio.is_some());
    }

    #[test]
    fn comparison_computes_differences() {
        let ratios = compute(&sample_statements());
        let benchmarks = RatioBenchmarks {
            current_ratio: Some(dec!(2.0)),
            ..Default::default()
        };

        let comparisons = compare(&ratios, &benchmarks);
        assert_eq!(comparisons.len(), 1);
        let current = &comparisons[0];
        assert_eq!(current.ratio, "currentRatio");
        assert_eq!(current.actual, dec!(1.6));
        assert_eq!(current.difference, dec!(-0.4));
        assert_eq!(current.percentage_difference, dec!(-20));
    }

    #[test]
    fn missing_benchmarks_are_omitted_not_zeroed() {
        let ratios = compute(&sample_statements());
        let comparisons = compare(&ratios, &RatioBenchmarks::default());
        assert!(comparisons.is_empty());
    }

    #[test]
    fn below_benchmark_liquidity_is_a_weakness() {
        let ratios = compute(&sample_statements());
        let benchmarks = RatioBenchmarks {
            current_ratio: Some(dec!(2.0)),
            gross_margin: Some(dec!(0.30)),
            ..Default::default()
        };

        let comparisons = compare(&ratios, &benchmarks);
        let sw = assess(&comparisons);

        assert_eq!(sw.weaknesses.len(), 1);
        assert_eq!(sw.weaknesses[0].area, "Liquidity");
        // Gross margin 0.35 vs 0.30 benchmark = +16.7%, a strength.
        assert_eq!(sw.strengths.len(), 1);
        assert_eq!(sw.strengths[0].area, "Profitability");
    }

    #[test]
    fn low_leverage_is_favorable() {
        let ratios = compute(&sample_statements());
        // D/E ~0.78 against a benchmark of 1.2 is well below: favorable.
        let benchmarks = RatioBenchmarks {
            debt_to_equity: Some(dec!(1.2)),
            ..Default::default()
        };

        let sw = assess(&compare(&ratios, &benchmarks));
        assert_eq!(sw.strengths.len(), 1);
        assert!(sw.weaknesses.is_empty());
    }

    #[test]
    fn severe_shortfall_escalates_priority() {
        let ratios = compute(&sample_statements());
        let benchmarks = RatioBenchmarks {
            // current 1.6 vs 2.5 = -36%: severe.
            current_ratio: Some(dec!(2.5)),
            ..Default::default()
        };

        let recs = recommendations(&compare(&ratios, &benchmarks));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].area, "Liquidity Management");
        assert_eq!(recs[0].priority, Priority::High);
    }

    #[test]
    fn analyze_assembles_the_full_report() {
        let benchmarks = RatioBenchmarks {
            current_ratio: Some(dec!(2.0)),
            net_margin: Some(dec!(0.08)),
            ..Default::default()
        };
        let analysis = analyze(&sample_statements(), &benchmarks);

        assert_eq!(analysis.benchmark_comparison.len(), 2);
        assert!(!analysis.strengths_and_weaknesses.weaknesses.is_empty());
        assert!(!analysis.recommendations.is_empty());
    }
}
