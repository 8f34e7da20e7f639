//! Budget model
//!
//! A spending ceiling for one category in one calendar month. At most one
//! budget may exist per (user, category, month); the budget service rejects
//! duplicates at creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId, UserId};
use super::money::Money;
use super::period::Month;

/// A monthly spending ceiling for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Owning user
    pub user_id: UserId,

    /// The category this budget caps
    pub category_id: CategoryId,

    /// The ceiling amount; must be positive
    pub amount: Money,

    /// The calendar month this budget applies to
    pub month: Month,

    /// When the budget was created
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(user_id: UserId, category_id: CategoryId, amount: Money, month: Month) -> Self {
        Self {
            id: BudgetId::new(),
            user_id,
            category_id,
            amount,
            month,
            created_at: Utc::now(),
        }
    }

    /// Validate the budget
    ///
    /// A zero or negative ceiling would make the spend ratio undefined, so
    /// it is rejected here rather than guarded at every evaluation site.
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount);
        }

        Ok(())
    }

    /// Check if this budget covers the same slot as another
    /// (same user, category and month)
    pub fn same_slot(&self, other: &Budget) -> bool {
        self.user_id == other.user_id
            && self.category_id == other.category_id
            && self.month == other.month
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ceiling {} for {}", self.month, self.amount, self.category_id)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Budget amount must be positive"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn june() -> Month {
        Month::new(2024, 6).unwrap()
    }

    #[test]
    fn test_new_budget() {
        let budget = Budget::new(UserId::new(), CategoryId::new(), Money::from_cents(100_000), june());
        assert_eq!(budget.amount.cents(), 100_000);
        assert_eq!(budget.month, june());
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let budget = Budget::new(UserId::new(), CategoryId::new(), Money::zero(), june());
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let budget = Budget::new(
            UserId::new(),
            CategoryId::new(),
            Money::from_cents(-500),
            june(),
        );
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_same_slot() {
        let user = UserId::new();
        let category = CategoryId::new();
        let a = Budget::new(user, category, Money::from_cents(100_000), june());
        let b = Budget::new(user, category, Money::from_cents(50_000), june());
        let c = Budget::new(user, category, Money::from_cents(50_000), Month::new(2024, 7).unwrap());

        assert!(a.same_slot(&b));
        assert!(!a.same_slot(&c));
    }

    #[test]
    fn test_serialization() {
        let budget = Budget::new(UserId::new(), CategoryId::new(), Money::from_cents(75_000), june());
        let json = serde_json::to_string(&budget).unwrap();
        let deserialized: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(budget.id, deserialized.id);
        assert_eq!(budget.month, deserialized.month);
        assert_eq!(budget.amount, deserialized.amount);
    }
}
