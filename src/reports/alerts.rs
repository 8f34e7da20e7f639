//! Alert derivation
//!
//! Turns evaluated budget statuses into notification events for the
//! presentation layer. The emitter itself has no side effects; it yields a
//! lazy, finite sequence in a stable order - per-budget alerts following
//! the input statuses, the global cashflow alert last.

use std::fmt;

use crate::models::{Category, Money, Transaction};
use crate::reports::budget_status::{BudgetState, BudgetStatus};
use crate::reports::trends::cashflow_summary;

/// A notification-worthy condition
#[derive(Debug, Clone, PartialEq)]
pub enum AlertEvent {
    /// Spend reached the near-limit threshold of a budget
    BudgetNearLimit {
        category: String,
        percent_used: f64,
    },
    /// Spend exceeded a budget ceiling
    BudgetExceeded {
        category: String,
        over_amount: Money,
    },
    /// Total expenses exceed total income across all categories,
    /// independent of any budget
    ExpensesExceedIncome { income: Money, expenses: Money },
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetNearLimit {
                category,
                percent_used,
            } => write!(
                f,
                "Budget for '{}' is {:.0}% used",
                category, percent_used
            ),
            Self::BudgetExceeded {
                category,
                over_amount,
            } => write!(f, "Budget for '{}' exceeded by {}", category, over_amount),
            Self::ExpensesExceedIncome { income, expenses } => write!(
                f,
                "Expenses ({}) exceed income ({})",
                expenses, income
            ),
        }
    }
}

/// Derive alert events from evaluated statuses
///
/// Near-limit and over-budget statuses yield one event each, named after
/// the category; under-budget and unknown-category statuses yield nothing.
/// The global expenses-exceed-income check runs over the full transaction
/// set passed in.
pub fn derive_alerts<'a>(
    statuses: &'a [BudgetStatus],
    categories: &'a [Category],
    transactions: &'a [Transaction],
) -> impl Iterator<Item = AlertEvent> + 'a {
    let per_budget = statuses.iter().filter_map(move |status| {
        let category = Category::find_by_id(categories, status.budget.category_id)?;
        match status.state {
            BudgetState::NearLimit => Some(AlertEvent::BudgetNearLimit {
                category: category.name.clone(),
                percent_used: status.percent_used(),
            }),
            BudgetState::OverBudget => Some(AlertEvent::BudgetExceeded {
                category: category.name.clone(),
                over_amount: status.exceeded_by().unwrap_or_else(Money::zero),
            }),
            BudgetState::Under | BudgetState::UnknownCategory => None,
        }
    });

    let global = std::iter::once_with(move || {
        let summary = cashflow_summary(transactions);
        if summary.expenses > summary.income {
            Some(AlertEvent::ExpensesExceedIncome {
                income: summary.income,
                expenses: summary.expenses,
            })
        } else {
            None
        }
    })
    .flatten();

    per_budget.chain(global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, CategoryId, FlowKind, Month, UserId};
    use crate::reports::budget_status::evaluate;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn june() -> Month {
        Month::new(2024, 6).unwrap()
    }

    fn expense(user: UserId, category_id: CategoryId, cents: i64, on: NaiveDate) -> Transaction {
        Transaction::new(
            user,
            category_id,
            FlowKind::Expense,
            Money::from_cents(cents),
            on,
            "",
        )
    }

    fn income(user: UserId, category_id: CategoryId, cents: i64, on: NaiveDate) -> Transaction {
        Transaction::new(
            user,
            category_id,
            FlowKind::Income,
            Money::from_cents(cents),
            on,
            "",
        )
    }

    #[test]
    fn test_near_limit_alert() {
        let user = UserId::new();
        let food = Category::new(user, "Food", FlowKind::Expense);
        let budgets = vec![Budget::new(user, food.id, Money::from_cents(100_000), june())];
        let categories = vec![food.clone()];
        let txns = vec![
            expense(user, food.id, 50_000, date(2024, 6, 5)),
            expense(user, food.id, 40_000, date(2024, 6, 20)),
            income(user, food.id, 500_000, date(2024, 6, 1)),
        ];

        let statuses = evaluate(&budgets, &txns, &categories, june()).unwrap();
        let alerts: Vec<AlertEvent> = derive_alerts(&statuses, &categories, &txns).collect();

        assert_eq!(alerts.len(), 1);
        match &alerts[0] {
            AlertEvent::BudgetNearLimit {
                category,
                percent_used,
            } => {
                assert_eq!(category, "Food");
                assert!((percent_used - 90.0).abs() < 1e-9);
            }
            other => panic!("expected near-limit alert, got {:?}", other),
        }
    }

    #[test]
    fn test_exceeded_alert_carries_overshoot() {
        let user = UserId::new();
        let food = Category::new(user, "Food", FlowKind::Expense);
        let budgets = vec![Budget::new(user, food.id, Money::from_cents(100_000), june())];
        let categories = vec![food.clone()];
        let txns = vec![
            expense(user, food.id, 120_000, date(2024, 6, 5)),
            income(user, food.id, 500_000, date(2024, 6, 1)),
        ];

        let statuses = evaluate(&budgets, &txns, &categories, june()).unwrap();
        let alerts: Vec<AlertEvent> = derive_alerts(&statuses, &categories, &txns).collect();

        assert_eq!(
            alerts,
            vec![AlertEvent::BudgetExceeded {
                category: "Food".into(),
                over_amount: Money::from_cents(20_000),
            }]
        );
        assert_eq!(
            alerts[0].to_string(),
            "Budget for 'Food' exceeded by $200.00"
        );
    }

    #[test]
    fn test_under_budget_emits_nothing() {
        let user = UserId::new();
        let food = Category::new(user, "Food", FlowKind::Expense);
        let budgets = vec![Budget::new(user, food.id, Money::from_cents(100_000), june())];
        let categories = vec![food.clone()];
        let txns = vec![
            expense(user, food.id, 30_000, date(2024, 6, 5)),
            income(user, food.id, 500_000, date(2024, 6, 1)),
        ];

        let statuses = evaluate(&budgets, &txns, &categories, june()).unwrap();
        let alerts: Vec<AlertEvent> = derive_alerts(&statuses, &categories, &txns).collect();
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_global_alert_independent_of_budgets() {
        // No budgets at all; expenses exceed income across the whole set
        let user = UserId::new();
        let salary = CategoryId::new();
        let rent = CategoryId::new();
        let txns = vec![
            income(user, salary, 500_000, date(2024, 6, 1)),
            expense(user, rent, 600_000, date(2024, 6, 2)),
        ];

        let alerts: Vec<AlertEvent> = derive_alerts(&[], &[], &txns).collect();
        assert_eq!(
            alerts,
            vec![AlertEvent::ExpensesExceedIncome {
                income: Money::from_cents(500_000),
                expenses: Money::from_cents(600_000),
            }]
        );
    }

    #[test]
    fn test_global_alert_emitted_last_in_stable_order() {
        let user = UserId::new();
        let food = Category::new(user, "Food", FlowKind::Expense);
        let fun = Category::new(user, "Entertainment", FlowKind::Expense);
        let budgets = vec![
            Budget::new(user, food.id, Money::from_cents(100_000), june()),
            Budget::new(user, fun.id, Money::from_cents(10_000), june()),
        ];
        let categories = vec![food.clone(), fun.clone()];
        let txns = vec![
            expense(user, food.id, 120_000, date(2024, 6, 5)),
            expense(user, fun.id, 9_500, date(2024, 6, 6)),
        ];

        let statuses = evaluate(&budgets, &txns, &categories, june()).unwrap();
        let alerts: Vec<AlertEvent> = derive_alerts(&statuses, &categories, &txns).collect();

        // Two per-budget alerts in status order, then the global alert
        assert_eq!(alerts.len(), 3);
        assert!(matches!(
            &alerts[0],
            AlertEvent::BudgetExceeded { category, .. } if category == "Food"
        ));
        assert!(matches!(
            &alerts[1],
            AlertEvent::BudgetNearLimit { category, .. } if category == "Entertainment"
        ));
        assert!(matches!(&alerts[2], AlertEvent::ExpensesExceedIncome { .. }));
    }

    #[test]
    fn test_unknown_category_status_skipped() {
        let user = UserId::new();
        let ghost = CategoryId::new();
        let budgets = vec![Budget::new(user, ghost, Money::from_cents(100_000), june())];
        let txns = vec![expense(user, ghost, 120_000, date(2024, 6, 5))];

        let statuses = evaluate(&budgets, &txns, &[], june()).unwrap();
        assert_eq!(statuses[0].state, BudgetState::UnknownCategory);

        // Income covers expenses, so no global alert either
        let mut all = txns.clone();
        all.push(income(user, ghost, 900_000, date(2024, 6, 1)));
        let alerts: Vec<AlertEvent> = derive_alerts(&statuses, &[], &all).collect();
        assert!(alerts.is_empty());
    }
}
