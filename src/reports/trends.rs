//! Spending trend aggregation
//!
//! Buckets transactions by time period and folds them into income/expense
//! totals for chart series: monthly trend lines, the Sun-Sat weekly bar
//! chart, and the per-category distribution. All sums run on exact
//! integer-cent arithmetic.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{CategoryId, Money, Month, SpendingWeek, Transaction, DAY_LABELS};

/// Running income/expense totals for one bucket
///
/// Accumulation is a fold: transactions may be added one at a time in any
/// order, and partial totals merge associatively, so the result never
/// depends on visit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodTotals {
    pub income: Money,
    pub expense: Money,
}

impl PeriodTotals {
    /// Fold a single transaction into the totals
    pub fn add(&mut self, txn: &Transaction) {
        if txn.is_income() {
            self.income += txn.amount;
        } else {
            self.expense += txn.amount;
        }
    }

    /// Merge another partial total into this one
    pub fn merge(&mut self, other: PeriodTotals) {
        self.income += other.income;
        self.expense += other.expense;
    }

    /// Savings = income - expense, always derived from the current totals
    pub fn savings(&self) -> Money {
        self.income - self.expense
    }

    pub fn is_zero(&self) -> bool {
        self.income.is_zero() && self.expense.is_zero()
    }
}

/// One month of the trend series
#[derive(Debug, Clone)]
pub struct MonthlyPoint {
    pub month: Month,
    pub totals: PeriodTotals,
}

/// One day of the weekly breakdown
#[derive(Debug, Clone, Copy)]
pub struct DayPoint {
    /// Day label, "Sun" through "Sat"
    pub label: &'static str,
    pub totals: PeriodTotals,
}

/// Whole-set income/expense totals (dashboard summary cards)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashflowSummary {
    pub income: Money,
    pub expenses: Money,
}

impl CashflowSummary {
    pub fn balance(&self) -> Money {
        self.income - self.expenses
    }
}

/// One slice of the expense distribution
#[derive(Debug, Clone, Copy)]
pub struct CategorySlice {
    pub category_id: CategoryId,
    pub total: Money,
}

/// Monthly income/expense/savings series in chronological order
///
/// Every month a transaction falls in gets a bucket; the same calendar
/// month in different years yields distinct buckets. Callers slice the
/// tail for windows like "last 6 months" (see [`recent_months`]).
pub fn monthly_trend(transactions: &[Transaction]) -> Vec<MonthlyPoint> {
    let mut buckets: BTreeMap<Month, PeriodTotals> = BTreeMap::new();

    for txn in transactions {
        buckets.entry(Month::from_date(txn.date)).or_default().add(txn);
    }

    buckets
        .into_iter()
        .map(|(month, totals)| MonthlyPoint { month, totals })
        .collect()
}

/// The most recent `n` points of a monthly series
pub fn recent_months(points: &[MonthlyPoint], n: usize) -> &[MonthlyPoint] {
    &points[points.len().saturating_sub(n)..]
}

/// Income/expense per day for the week containing `reference`
///
/// Always returns exactly seven buckets, Sunday through Saturday, with
/// zero totals for days without transactions. Transactions outside the
/// week are ignored; both week endpoints are inclusive.
pub fn weekly_breakdown(transactions: &[Transaction], reference: NaiveDate) -> [DayPoint; 7] {
    let week = SpendingWeek::containing(reference);
    let mut days = DAY_LABELS.map(|label| DayPoint {
        label,
        totals: PeriodTotals::default(),
    });

    for txn in transactions {
        if let Some(index) = week.day_index(txn.date) {
            days[index].totals.add(txn);
        }
    }

    days
}

/// Expense total for one category in one calendar month
pub fn category_spend(
    transactions: &[Transaction],
    category_id: CategoryId,
    month: Month,
) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.category_id == category_id && month.contains(t.date))
        .map(|t| t.amount)
        .sum()
}

/// Expense total across all categories in one calendar month
pub fn total_expense_in(transactions: &[Transaction], month: Month) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date))
        .map(|t| t.amount)
        .sum()
}

/// Income and expense totals over the full transaction set
pub fn cashflow_summary(transactions: &[Transaction]) -> CashflowSummary {
    let mut totals = PeriodTotals::default();
    for txn in transactions {
        totals.add(txn);
    }

    CashflowSummary {
        income: totals.income,
        expenses: totals.expense,
    }
}

/// Expense total per category over the full transaction set (pie slices)
///
/// Sorted by descending total; ties break on category ID so identical
/// inputs always produce the identical slice order.
pub fn expense_distribution(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let mut buckets: BTreeMap<CategoryId, Money> = BTreeMap::new();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let entry = buckets.entry(txn.category_id).or_insert_with(Money::zero);
        *entry += txn.amount;
    }

    let mut slices: Vec<CategorySlice> = buckets
        .into_iter()
        .map(|(category_id, total)| CategorySlice { category_id, total })
        .collect();

    slices.sort_by(|a, b| b.total.cmp(&a.total).then(a.category_id.cmp(&b.category_id)));
    slices
}
