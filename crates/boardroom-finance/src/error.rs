use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    #[error("cash-flow sequence is empty")]
    EmptyCashFlows,

    #[error("discount rate {0} is at or below -100%")]
    InvalidDiscountRate(Decimal),

    #[error("IRR is undefined: NPV does not change sign over the search interval")]
    IrrNotBracketed,

    #[error("value exceeds the representable numeric range")]
    NumericOverflow,

    #[error("projected cash flows ({actual}) do not match the projection period ({expected})")]
    ProjectionMismatch { expected: u32, actual: usize },

    #[error("capital structure has neither debt nor equity")]
    ZeroCapitalBase,

    #[error("capital structure has zero equity")]
    ZeroEquity,

    #[error("no capital-structure alternatives to evaluate")]
    NoAlternatives,

    #[error("forecast period must be at least one year")]
    InvalidForecastPeriod,

    #[error("revenue must be positive to build a forecast")]
    NonPositiveRevenue,

    #[error("terminal growth {growth} must be below the discount rate {wacc}")]
    TerminalGrowthExceedsWacc { wacc: Decimal, growth: Decimal },
}
