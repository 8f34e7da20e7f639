//! Budget service
//!
//! Budget creation with uniqueness enforcement, plus the snapshot-and-
//! evaluate wrappers the presentation layer calls for statuses and alerts.

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, BudgetId, CategoryId, Money, Month, UserId};
use crate::reports::alerts::{derive_alerts, AlertEvent};
use crate::reports::budget_status::{evaluate_with_threshold, BudgetStatus, NEAR_LIMIT_PERCENT};
use crate::storage::MemoryStore;

/// Service for budget management
pub struct BudgetService<'a> {
    store: &'a MemoryStore,
    near_limit_percent: u8,
}

impl<'a> BudgetService<'a> {
    /// Create a budget service with the default near-limit threshold
    pub fn new(store: &'a MemoryStore) -> Self {
        Self {
            store,
            near_limit_percent: NEAR_LIMIT_PERCENT,
        }
    }

    /// Create a budget service using the threshold from user settings
    pub fn with_settings(store: &'a MemoryStore, settings: &Settings) -> Self {
        Self {
            store,
            near_limit_percent: settings.near_limit_percent,
        }
    }

    /// Set a spending ceiling for a category in a month
    ///
    /// At most one budget may exist per (user, category, month); a second
    /// one is rejected rather than silently shadowing the first.
    pub fn create(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        amount: Money,
        month: Month,
    ) -> TrackerResult<Budget> {
        let budget = Budget::new(user_id, category_id, amount, month);
        budget
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let category = self
            .store
            .categories
            .get(category_id)?
            .filter(|c| c.user_id == user_id)
            .ok_or_else(|| TrackerError::category_not_found(category_id.to_string()))?;

        let existing = self.store.budgets.for_user_month(user_id, month)?;
        if existing.iter().any(|b| b.same_slot(&budget)) {
            return Err(TrackerError::duplicate_budget(format!(
                "{} {}",
                category.name, month
            )));
        }

        self.store.budgets.upsert(budget.clone())?;
        Ok(budget)
    }

    /// Delete a budget
    pub fn delete(&self, user_id: UserId, id: BudgetId) -> TrackerResult<()> {
        let owned = self
            .store
            .budgets
            .get(id)?
            .filter(|b| b.user_id == user_id)
            .is_some();
        if !owned {
            return Err(TrackerError::budget_not_found(id.to_string()));
        }

        self.store.budgets.remove(id)?;
        Ok(())
    }

    /// List all of a user's budgets
    pub fn list(&self, user_id: UserId) -> TrackerResult<Vec<Budget>> {
        self.store.budgets.for_user(user_id)
    }

    /// Evaluate the user's budgets for a month against current spend
    pub fn statuses_for_month(
        &self,
        user_id: UserId,
        month: Month,
    ) -> TrackerResult<Vec<BudgetStatus>> {
        let budgets = self.store.budgets.for_user(user_id)?;
        let transactions = self.store.transactions.for_user(user_id)?;
        let categories = self.store.categories.for_user(user_id)?;

        evaluate_with_threshold(
            &budgets,
            &transactions,
            &categories,
            month,
            self.near_limit_percent,
        )
    }

    /// Derive the user's alert events for a month
    pub fn alerts_for_month(
        &self,
        user_id: UserId,
        month: Month,
    ) -> TrackerResult<Vec<AlertEvent>> {
        let statuses = self.statuses_for_month(user_id, month)?;
        let transactions = self.store.transactions.for_user(user_id)?;
        let categories = self.store.categories.for_user(user_id)?;

        Ok(derive_alerts(&statuses, &categories, &transactions).collect())
    }
}
