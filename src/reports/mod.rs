//! Derived reports for spendtrack
//!
//! Pure, synchronous computations over entity snapshots: trend bucketing
//! and aggregation, budget evaluation, and alert derivation. Nothing here
//! is persisted - every report is recomputed from its inputs on each call.

pub mod alerts;
pub mod budget_status;
pub mod trends;

pub use alerts::{derive_alerts, AlertEvent};
pub use budget_status::{
    evaluate, evaluate_with_threshold, BudgetState, BudgetStatus, NEAR_LIMIT_PERCENT,
};
pub use trends::{
    cashflow_summary, category_spend, expense_distribution, monthly_trend, recent_months,
    total_expense_in, weekly_breakdown, CashflowSummary, CategorySlice, DayPoint, MonthlyPoint,
    PeriodTotals,
};
