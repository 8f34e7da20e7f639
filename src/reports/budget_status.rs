//! Budget evaluation
//!
//! Compares aggregated spend against each budget ceiling for a calendar
//! month and classifies the result. A pure function of its inputs: no
//! state is kept, and evaluating the same snapshot twice yields the same
//! statuses.

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, Category, Money, Month, Transaction};
use crate::reports::trends::category_spend;

/// Default near-limit threshold: spend at or past this percentage of the
/// ceiling (without exceeding it) reads as "approaching the limit"
pub const NEAR_LIMIT_PERCENT: u8 = 90;

/// How a budget stands after spend is counted against it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetState {
    /// Comfortably under the ceiling
    Under,
    /// At or past the near-limit threshold but not over
    NearLimit,
    /// Spent strictly more than the ceiling
    OverBudget,
    /// The budget references a category missing from the snapshot;
    /// spend is still counted rather than silently read as zero
    UnknownCategory,
}

/// The evaluated standing of one budget
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub budget: Budget,
    /// Expense total for the budget's category and month
    pub spent: Money,
    pub state: BudgetState,
}

impl BudgetStatus {
    /// Raw spend/ceiling ratio; may exceed 1.0 when over budget.
    ///
    /// Display-only - classification never goes through this float.
    pub fn ratio(&self) -> f64 {
        self.spent.cents() as f64 / self.budget.amount.cents() as f64
    }

    /// Progress percentage clamped to 100 for progress bars
    pub fn percent_used(&self) -> f64 {
        (self.ratio() * 100.0).min(100.0)
    }

    /// How far past the ceiling the spend is, when over budget
    pub fn exceeded_by(&self) -> Option<Money> {
        if self.spent > self.budget.amount {
            Some(self.spent - self.budget.amount)
        } else {
            None
        }
    }
}

/// Evaluate all budgets for one calendar month with the default
/// near-limit threshold
pub fn evaluate(
    budgets: &[Budget],
    transactions: &[Transaction],
    categories: &[Category],
    month: Month,
) -> TrackerResult<Vec<BudgetStatus>> {
    evaluate_with_threshold(budgets, transactions, categories, month, NEAR_LIMIT_PERCENT)
}

/// Evaluate all budgets for one calendar month
///
/// Budgets for other months are skipped. A non-positive ceiling fails
/// fast: the ratio would be undefined and budgets are validated positive
/// at creation, so encountering one here means corrupted input.
pub fn evaluate_with_threshold(
    budgets: &[Budget],
    transactions: &[Transaction],
    categories: &[Category],
    month: Month,
    near_limit_percent: u8,
) -> TrackerResult<Vec<BudgetStatus>> {
    if near_limit_percent == 0 || near_limit_percent > 100 {
        return Err(TrackerError::Validation(format!(
            "Near-limit threshold must be within 1-100, got {}",
            near_limit_percent
        )));
    }

    let mut statuses = Vec::new();

    for budget in budgets.iter().filter(|b| b.month == month) {
        if !budget.amount.is_positive() {
            return Err(TrackerError::Validation(format!(
                "Budget {} has non-positive amount {}",
                budget.id, budget.amount
            )));
        }

        let spent = category_spend(transactions, budget.category_id, month);

        let state = if Category::find_by_id(categories, budget.category_id).is_none() {
            BudgetState::UnknownCategory
        } else {
            classify(spent, budget.amount, near_limit_percent)
        };

        statuses.push(BudgetStatus {
            budget: budget.clone(),
            spent,
            state,
        });
    }

    Ok(statuses)
}

/// Classify spend against a ceiling using exact integer arithmetic
///
/// Over requires spend strictly greater than the ceiling, so spending the
/// ceiling to the cent reads as near-limit. The threshold comparison
/// cross-multiplies in i128 cents; no float rounding can flip a boundary.
fn classify(spent: Money, ceiling: Money, near_limit_percent: u8) -> BudgetState {
    if spent > ceiling {
        return BudgetState::OverBudget;
    }

    let reaches_threshold = i128::from(spent.cents()) * 100
        >= i128::from(ceiling.cents()) * i128::from(near_limit_percent);
    if reaches_threshold {
        BudgetState::NearLimit
    } else {
        BudgetState::Under
    }
}
